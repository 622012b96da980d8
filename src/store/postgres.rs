// src/store/postgres.rs

//! Postgres-backed document store. Each collection is a table of
//! `(id, body JSONB, created_at, updated_at)` rows; ids are generated on
//! insert and timestamps are assigned by the database server.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Order, OrderDraft, Product, ProductDraft};

use super::images::{delete_image_best_effort, product_image_key, replace_image, store_image_or_placeholder};
use super::{ImageStore, ImageUpload, OrderRepository, ProductRepository, StoreError, StoreResult, StoredImage};

const SCHEMA_SQL: &str = include_str!("schema.sql");

pub async fn connect(database_url: &str) -> StoreResult<PgPool> {
  let pool = PgPool::connect(database_url).await?;
  debug!("Ensuring document store schema");
  sqlx::raw_sql(SCHEMA_SQL).execute(&pool).await?;
  info!("Connected to the document store.");
  Ok(pool)
}

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
  id: Uuid,
  body: serde_json::Value,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

async fn list_documents(pool: &PgPool, table: &str) -> StoreResult<Vec<DocumentRow>> {
  let query = format!(
    "SELECT id, body, created_at, updated_at FROM {} ORDER BY created_at DESC",
    table
  );
  let rows: Vec<DocumentRow> = sqlx::query_as(&query).fetch_all(pool).await?;
  Ok(rows)
}

async fn insert_document<B: Serialize>(pool: &PgPool, table: &str, body: &B) -> StoreResult<DocumentRow> {
  let query = format!(
    "INSERT INTO {} (id, body) VALUES ($1, $2) RETURNING id, body, created_at, updated_at",
    table
  );
  let row: DocumentRow = sqlx::query_as(&query)
    .bind(Uuid::new_v4())
    .bind(serde_json::to_value(body)?)
    .fetch_one(pool)
    .await?;
  Ok(row)
}

async fn update_document<B: Serialize>(pool: &PgPool, table: &str, id: Uuid, body: &B) -> StoreResult<DocumentRow> {
  let query = format!(
    "UPDATE {} SET body = $2, updated_at = now() WHERE id = $1 \
     RETURNING id, body, created_at, updated_at",
    table
  );
  let row: Option<DocumentRow> = sqlx::query_as(&query)
    .bind(id)
    .bind(serde_json::to_value(body)?)
    .fetch_optional(pool)
    .await?;
  row.ok_or_else(|| StoreError::NotFound(format!("{} document {}", table, id)))
}

async fn delete_document(pool: &PgPool, table: &str, id: Uuid) -> StoreResult<()> {
  let query = format!("DELETE FROM {} WHERE id = $1", table);
  let result = sqlx::query(&query).bind(id).execute(pool).await?;
  debug!(table, %id, rows = result.rows_affected(), "Deleted document");
  Ok(())
}

fn decode<B: DeserializeOwned>(row: &DocumentRow) -> StoreResult<B> {
  Ok(serde_json::from_value(row.body.clone())?)
}

// --- Product repository ---

pub struct PgProductRepository {
  pool: PgPool,
  images: Arc<dyn ImageStore>,
}

impl PgProductRepository {
  pub fn new(pool: PgPool, images: Arc<dyn ImageStore>) -> Self {
    PgProductRepository { pool, images }
  }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
  async fn list(&self) -> StoreResult<Vec<Product>> {
    let rows = list_documents(&self.pool, "products").await?;
    rows
      .iter()
      .map(|row| Ok(Product::from_draft(row.id, decode(row)?, row.created_at, row.updated_at)))
      .collect()
  }

  async fn create(&self, mut draft: ProductDraft, image: Option<ImageUpload>) -> StoreResult<Product> {
    if let Some(upload) = image {
      draft.image_url = Some(store_image_or_placeholder(self.images.as_ref(), upload).await);
    }
    let row = insert_document(&self.pool, "products", &draft).await?;
    Ok(Product::from_draft(row.id, draft, row.created_at, row.updated_at))
  }

  async fn update(&self, id: Uuid, mut draft: ProductDraft, new_image: Option<ImageUpload>) -> StoreResult<Product> {
    draft.image_url = replace_image(self.images.as_ref(), draft.image_url.as_deref(), new_image).await;
    let row = update_document(&self.pool, "products", id, &draft).await?;
    Ok(Product::from_draft(row.id, draft, row.created_at, row.updated_at))
  }

  async fn delete(&self, id: Uuid, image_url: Option<&str>) -> StoreResult<()> {
    delete_image_best_effort(self.images.as_ref(), image_url).await;
    delete_document(&self.pool, "products", id).await
  }
}

// --- Order repository ---

pub struct PgOrderRepository {
  pool: PgPool,
}

impl PgOrderRepository {
  pub fn new(pool: PgPool) -> Self {
    PgOrderRepository { pool }
  }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
  async fn list(&self) -> StoreResult<Vec<Order>> {
    let rows = list_documents(&self.pool, "orders").await?;
    rows
      .iter()
      .map(|row| Ok(Order::from_draft(row.id, decode(row)?, row.created_at, row.updated_at)))
      .collect()
  }

  async fn create(&self, draft: OrderDraft) -> StoreResult<Order> {
    let row = insert_document(&self.pool, "orders", &draft).await?;
    Ok(Order::from_draft(row.id, draft, row.created_at, row.updated_at))
  }

  async fn update(&self, id: Uuid, draft: OrderDraft) -> StoreResult<Order> {
    let row = update_document(&self.pool, "orders", id, &draft).await?;
    Ok(Order::from_draft(row.id, draft, row.created_at, row.updated_at))
  }

  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    delete_document(&self.pool, "orders", id).await
  }
}

// --- Image store ---

pub struct PgImageStore {
  pool: PgPool,
}

impl PgImageStore {
  pub fn new(pool: PgPool) -> Self {
    PgImageStore { pool }
  }
}

#[async_trait]
impl ImageStore for PgImageStore {
  async fn put(&self, upload: ImageUpload) -> StoreResult<String> {
    let key = product_image_key(&upload.filename);
    sqlx::query("INSERT INTO images (key, filename, content_type, data) VALUES ($1, $2, $3, $4)")
      .bind(&key)
      .bind(&upload.filename)
      .bind(&upload.content_type)
      .bind(&upload.bytes)
      .execute(&self.pool)
      .await?;
    debug!(key, size = upload.bytes.len(), "Stored image");
    Ok(key)
  }

  async fn get(&self, reference: &str) -> StoreResult<Option<StoredImage>> {
    let row: Option<(String, Option<String>, Vec<u8>)> =
      sqlx::query_as("SELECT filename, content_type, data FROM images WHERE key = $1")
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?;
    Ok(row.map(|(filename, content_type, bytes)| StoredImage {
      filename,
      content_type,
      bytes,
    }))
  }

  async fn delete(&self, reference: &str) -> StoreResult<()> {
    // Idempotent: deleting a missing key is not an error.
    sqlx::query("DELETE FROM images WHERE key = $1")
      .bind(reference)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

// src/store/mod.rs

//! Persistence boundary: repository interfaces over the remote document
//! store plus the image store, with Postgres and in-memory backends.

pub mod images;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Order, OrderDraft, Product, ProductDraft};

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Database Error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Document Error: {0}")]
  Document(#[from] serde_json::Error),

  #[error("Not Found: {0}")]
  NotFound(String),

  #[error("Store Unavailable: {0}")]
  Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Image bytes handed over by a form submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
  pub filename: String,
  pub content_type: Option<String>,
  pub bytes: Vec<u8>,
}

/// Blob storage: store bytes under a generated key and get the key back as
/// a retrievable reference. Deleting a missing key is not an error.
#[async_trait]
pub trait ImageStore: Send + Sync {
  async fn put(&self, upload: ImageUpload) -> StoreResult<String>;
  async fn get(&self, reference: &str) -> StoreResult<Option<StoredImage>>;
  async fn delete(&self, reference: &str) -> StoreResult<()>;
}

#[derive(Debug, Clone)]
pub struct StoredImage {
  pub filename: String,
  pub content_type: Option<String>,
  pub bytes: Vec<u8>,
}

/// Product catalog CRUD. Image handling is part of the contract: a failed
/// upload degrades to the placeholder marker instead of failing the write,
/// and image deletions are best-effort.
#[async_trait]
pub trait ProductRepository: Send + Sync {
  /// All products, newest-created first.
  async fn list(&self) -> StoreResult<Vec<Product>>;
  async fn create(&self, draft: ProductDraft, image: Option<ImageUpload>) -> StoreResult<Product>;
  async fn update(&self, id: Uuid, draft: ProductDraft, new_image: Option<ImageUpload>) -> StoreResult<Product>;
  async fn delete(&self, id: Uuid, image_url: Option<&str>) -> StoreResult<()>;
}

/// Order book CRUD.
#[async_trait]
pub trait OrderRepository: Send + Sync {
  /// All orders, newest-created first.
  async fn list(&self) -> StoreResult<Vec<Order>>;
  async fn create(&self, draft: OrderDraft) -> StoreResult<Order>;
  async fn update(&self, id: Uuid, draft: OrderDraft) -> StoreResult<Order>;
  async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

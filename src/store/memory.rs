// src/store/memory.rs

//! In-memory backends. These serve two purposes: offline mode when no
//! document store is reachable at startup, and test doubles with the same
//! contract as the Postgres implementations.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Order, OrderDraft, Product, ProductDraft};

use super::images::{delete_image_best_effort, product_image_key, replace_image, store_image_or_placeholder};
use super::{ImageStore, ImageUpload, OrderRepository, ProductRepository, StoreError, StoreResult, StoredImage};

#[derive(Default)]
pub struct MemoryImageStore {
  images: RwLock<HashMap<String, StoredImage>>,
}

impl MemoryImageStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn contains(&self, reference: &str) -> bool {
    self.images.read().await.contains_key(reference)
  }

  pub async fn len(&self) -> usize {
    self.images.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.images.read().await.is_empty()
  }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
  async fn put(&self, upload: ImageUpload) -> StoreResult<String> {
    let key = product_image_key(&upload.filename);
    let stored = StoredImage {
      filename: upload.filename,
      content_type: upload.content_type,
      bytes: upload.bytes,
    };
    self.images.write().await.insert(key.clone(), stored);
    Ok(key)
  }

  async fn get(&self, reference: &str) -> StoreResult<Option<StoredImage>> {
    Ok(self.images.read().await.get(reference).cloned())
  }

  async fn delete(&self, reference: &str) -> StoreResult<()> {
    self.images.write().await.remove(reference);
    Ok(())
  }
}

/// Product collection held in memory, newest-created first.
pub struct MemoryProductRepository {
  products: RwLock<Vec<Product>>,
  images: Arc<dyn ImageStore>,
}

impl MemoryProductRepository {
  pub fn new(images: Arc<dyn ImageStore>) -> Self {
    MemoryProductRepository {
      products: RwLock::new(Vec::new()),
      images,
    }
  }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
  async fn list(&self) -> StoreResult<Vec<Product>> {
    Ok(self.products.read().await.clone())
  }

  async fn create(&self, mut draft: ProductDraft, image: Option<ImageUpload>) -> StoreResult<Product> {
    if let Some(upload) = image {
      draft.image_url = Some(store_image_or_placeholder(self.images.as_ref(), upload).await);
    }
    let now = Utc::now();
    let product = Product::from_draft(Uuid::new_v4(), draft, now, now);
    self.products.write().await.insert(0, product.clone());
    Ok(product)
  }

  async fn update(&self, id: Uuid, mut draft: ProductDraft, new_image: Option<ImageUpload>) -> StoreResult<Product> {
    draft.image_url = replace_image(self.images.as_ref(), draft.image_url.as_deref(), new_image).await;
    let mut products = self.products.write().await;
    let slot = products
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or_else(|| StoreError::NotFound(format!("products document {}", id)))?;
    let updated = Product::from_draft(id, draft, slot.created_at, Utc::now());
    *slot = updated.clone();
    Ok(updated)
  }

  async fn delete(&self, id: Uuid, image_url: Option<&str>) -> StoreResult<()> {
    delete_image_best_effort(self.images.as_ref(), image_url).await;
    self.products.write().await.retain(|p| p.id != id);
    Ok(())
  }
}

/// Order collection held in memory, newest-created first.
#[derive(Default)]
pub struct MemoryOrderRepository {
  orders: RwLock<Vec<Order>>,
}

impl MemoryOrderRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
  async fn list(&self) -> StoreResult<Vec<Order>> {
    Ok(self.orders.read().await.clone())
  }

  async fn create(&self, draft: OrderDraft) -> StoreResult<Order> {
    let now = Utc::now();
    let order = Order::from_draft(Uuid::new_v4(), draft, now, now);
    self.orders.write().await.insert(0, order.clone());
    Ok(order)
  }

  async fn update(&self, id: Uuid, draft: OrderDraft) -> StoreResult<Order> {
    let mut orders = self.orders.write().await;
    let slot = orders
      .iter_mut()
      .find(|o| o.id == id)
      .ok_or_else(|| StoreError::NotFound(format!("orders document {}", id)))?;
    let updated = Order::from_draft(id, draft, slot.created_at, Utc::now());
    *slot = updated.clone();
    Ok(updated)
  }

  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    self.orders.write().await.retain(|o| o.id != id);
    Ok(())
  }
}

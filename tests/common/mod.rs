// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use uuid::Uuid;

use panaderia::models::{Order, OrderDraft, Product, ProductDraft, ProductType};
use panaderia::store::memory::{MemoryImageStore, MemoryOrderRepository, MemoryProductRepository};
use panaderia::store::{
  ImageStore, ImageUpload, OrderRepository, ProductRepository, StoreError, StoreResult, StoredImage,
};

static TRACING: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

// --- Instrumented store doubles ----------------------------------------

/// Image store that counts calls and can refuse uploads.
pub struct CountingImageStore {
  inner: MemoryImageStore,
  pub puts: AtomicUsize,
  pub deletes: AtomicUsize,
  pub fail_puts: AtomicBool,
}

impl CountingImageStore {
  pub fn new() -> Self {
    CountingImageStore {
      inner: MemoryImageStore::new(),
      puts: AtomicUsize::new(0),
      deletes: AtomicUsize::new(0),
      fail_puts: AtomicBool::new(false),
    }
  }

  pub fn put_count(&self) -> usize {
    self.puts.load(Ordering::SeqCst)
  }

  pub fn delete_count(&self) -> usize {
    self.deletes.load(Ordering::SeqCst)
  }

  pub async fn inner_is_empty(&self) -> bool {
    self.inner.is_empty().await
  }
}

#[async_trait]
impl ImageStore for CountingImageStore {
  async fn put(&self, upload: ImageUpload) -> StoreResult<String> {
    self.puts.fetch_add(1, Ordering::SeqCst);
    if self.fail_puts.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable("image upload rejected".to_string()));
    }
    self.inner.put(upload).await
  }

  async fn get(&self, reference: &str) -> StoreResult<Option<StoredImage>> {
    self.inner.get(reference).await
  }

  async fn delete(&self, reference: &str) -> StoreResult<()> {
    self.deletes.fetch_add(1, Ordering::SeqCst);
    self.inner.delete(reference).await
  }
}

/// Product repository that counts writes and can be told to fail.
pub struct FlakyProductRepository {
  inner: MemoryProductRepository,
  pub fail_lists: AtomicBool,
  pub fail_writes: AtomicBool,
  pub writes: AtomicUsize,
}

impl FlakyProductRepository {
  pub fn new(images: Arc<dyn ImageStore>) -> Self {
    FlakyProductRepository {
      inner: MemoryProductRepository::new(images),
      fail_lists: AtomicBool::new(false),
      fail_writes: AtomicBool::new(false),
      writes: AtomicUsize::new(0),
    }
  }

  pub fn write_count(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  fn write_attempt(&self) -> StoreResult<()> {
    self.writes.fetch_add(1, Ordering::SeqCst);
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable("write rejected".to_string()));
    }
    Ok(())
  }
}

#[async_trait]
impl ProductRepository for FlakyProductRepository {
  async fn list(&self) -> StoreResult<Vec<Product>> {
    if self.fail_lists.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable("list rejected".to_string()));
    }
    self.inner.list().await
  }

  async fn create(&self, draft: ProductDraft, image: Option<ImageUpload>) -> StoreResult<Product> {
    self.write_attempt()?;
    self.inner.create(draft, image).await
  }

  async fn update(&self, id: Uuid, draft: ProductDraft, new_image: Option<ImageUpload>) -> StoreResult<Product> {
    self.write_attempt()?;
    self.inner.update(id, draft, new_image).await
  }

  async fn delete(&self, id: Uuid, image_url: Option<&str>) -> StoreResult<()> {
    self.write_attempt()?;
    self.inner.delete(id, image_url).await
  }
}

/// Order repository with the same failure switches.
pub struct FlakyOrderRepository {
  inner: MemoryOrderRepository,
  pub fail_lists: AtomicBool,
  pub fail_writes: AtomicBool,
  pub writes: AtomicUsize,
}

impl FlakyOrderRepository {
  pub fn new() -> Self {
    FlakyOrderRepository {
      inner: MemoryOrderRepository::new(),
      fail_lists: AtomicBool::new(false),
      fail_writes: AtomicBool::new(false),
      writes: AtomicUsize::new(0),
    }
  }

  pub fn write_count(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  fn write_attempt(&self) -> StoreResult<()> {
    self.writes.fetch_add(1, Ordering::SeqCst);
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable("write rejected".to_string()));
    }
    Ok(())
  }
}

#[async_trait]
impl OrderRepository for FlakyOrderRepository {
  async fn list(&self) -> StoreResult<Vec<Order>> {
    if self.fail_lists.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable("list rejected".to_string()));
    }
    self.inner.list().await
  }

  async fn create(&self, draft: OrderDraft) -> StoreResult<Order> {
    self.write_attempt()?;
    self.inner.create(draft).await
  }

  async fn update(&self, id: Uuid, draft: OrderDraft) -> StoreResult<Order> {
    self.write_attempt()?;
    self.inner.update(id, draft).await
  }

  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    self.write_attempt()?;
    self.inner.delete(id).await
  }
}

/// Order repository whose writes wait for a permit; used to observe the
/// in-flight submission guard.
pub struct GatedOrderRepository {
  inner: MemoryOrderRepository,
  pub gate: tokio::sync::Semaphore,
}

impl GatedOrderRepository {
  pub fn new() -> Self {
    GatedOrderRepository {
      inner: MemoryOrderRepository::new(),
      gate: tokio::sync::Semaphore::new(0),
    }
  }
}

#[async_trait]
impl OrderRepository for GatedOrderRepository {
  async fn list(&self) -> StoreResult<Vec<Order>> {
    self.inner.list().await
  }

  async fn create(&self, draft: OrderDraft) -> StoreResult<Order> {
    let _permit = self
      .gate
      .acquire()
      .await
      .map_err(|_| StoreError::Unavailable("gate closed".to_string()))?;
    self.inner.create(draft).await
  }

  async fn update(&self, id: Uuid, draft: OrderDraft) -> StoreResult<Order> {
    let _permit = self
      .gate
      .acquire()
      .await
      .map_err(|_| StoreError::Unavailable("gate closed".to_string()))?;
    self.inner.update(id, draft).await
  }

  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    self.inner.delete(id).await
  }
}

// --- Fixtures -----------------------------------------------------------

pub fn product_draft(name: &str, price_cents: i64) -> ProductDraft {
  ProductDraft {
    name: name.to_string(),
    product_type: ProductType::Cookie,
    price_cents,
    description: None,
    image_url: None,
  }
}

pub fn image_upload(filename: &str) -> ImageUpload {
  ImageUpload {
    filename: filename.to_string(),
    content_type: Some("image/jpeg".to_string()),
    bytes: vec![0xff, 0xd8, 0xff, 0xe0],
  }
}

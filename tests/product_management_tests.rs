// tests/product_management_tests.rs

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::*;
use panaderia::errors::AppError;
use panaderia::models::PLACEHOLDER_IMAGE_URL;
use panaderia::pages::products::ProductFormInput;
use panaderia::pages::ProductManagement;
use panaderia::store::ProductRepository;

fn input(name: &str, product_type: &str, price: &str) -> ProductFormInput {
  ProductFormInput {
    name: name.to_string(),
    product_type: product_type.to_string(),
    price: price.to_string(),
    description: String::new(),
    image: None,
  }
}

struct Harness {
  images: Arc<CountingImageStore>,
  repo: Arc<FlakyProductRepository>,
  page: ProductManagement,
}

fn harness() -> Harness {
  setup_tracing();
  let images = Arc::new(CountingImageStore::new());
  let repo = Arc::new(FlakyProductRepository::new(images.clone()));
  let page = ProductManagement::new(repo.clone());
  Harness { images, repo, page }
}

#[tokio::test]
async fn create_prepends_the_new_product() {
  let h = harness();
  h.repo.create(product_draft("Leche Flan", 12000), None).await.expect("seed");

  h.page.open_create().await;
  let view = h.page.submit(input("Ube Pandesal", "Bread", "8.00")).await.expect("submit");

  assert_eq!(view.count, 2);
  assert_eq!(view.products[0].name, "Ube Pandesal");
  assert_eq!(view.products[0].price, "₱8.00");
  assert_eq!(view.products[1].name, "Leche Flan");
  assert!(view.form.is_none(), "form closes on success");
  assert!(view.error.is_none());
}

#[tokio::test]
async fn validation_failure_happens_before_any_store_call() {
  let h = harness();
  h.page.open_create().await;

  let view = h.page.submit(input("", "Bread", "8.00")).await.expect("handled");

  assert_eq!(h.repo.write_count(), 0, "no store call on validation failure");
  let error = view.error.expect("message");
  assert!(error.contains("name"), "got: {}", error);
  assert!(view.form.is_some(), "form stays open");
}

#[tokio::test]
async fn edit_replaces_the_matching_entity_in_place() {
  let h = harness();
  h.repo.create(product_draft("Butter Croissants", 3500), None).await.expect("seed");
  let newest = h.repo.create(product_draft("Leche Flan", 12000), None).await.expect("seed");

  h.page.open_edit(newest.id).await.expect("edit");
  let view = h
    .page
    .submit(input("Leche Flan Grande", "Dessert", "150.00"))
    .await
    .expect("submit");

  assert_eq!(view.count, 2);
  assert_eq!(view.products[0].name, "Leche Flan Grande");
  assert_eq!(view.products[0].price, "₱150.00");
  assert_eq!(view.products[1].name, "Butter Croissants");
}

#[tokio::test]
async fn store_failure_keeps_the_form_populated_for_retry() {
  let h = harness();
  h.page.open_create().await;
  h.repo.fail_writes.store(true, Ordering::SeqCst);

  let view = h.page.submit(input("Ube Pandesal", "Bread", "8.00")).await.expect("handled");
  assert_eq!(view.error.as_deref(), Some("Failed to add product"));
  let form = view.form.expect("form stays open");
  assert_eq!(form.name, "Ube Pandesal");
  assert_eq!(form.price, "8.00");

  h.repo.fail_writes.store(false, Ordering::SeqCst);
  let view = h.page.submit(input("Ube Pandesal", "Bread", "8.00")).await.expect("submit");
  assert!(view.error.is_none());
  assert_eq!(view.products[0].name, "Ube Pandesal");
}

#[tokio::test]
async fn unconfirmed_delete_is_refused_before_any_store_call() {
  let h = harness();
  let product = h.repo.create(product_draft("Leche Flan", 12000), None).await.expect("seed");
  let writes_before = h.repo.write_count();

  let result = h.page.delete(product.id, false).await;
  assert!(matches!(result, Err(AppError::Validation(_))));
  assert_eq!(h.repo.write_count(), writes_before);

  let view = h.page.view().await;
  assert_eq!(view.count, 1);
}

#[tokio::test]
async fn delete_releases_the_stored_image() {
  let h = harness();
  h.page.open_create().await;
  let mut submission = input("Red Velvet Cupcakes", "Cake", "45.00");
  submission.image = Some(image_upload("cupcakes.jpg"));
  h.page.submit(submission).await.expect("submit");
  assert_eq!(h.images.put_count(), 1);

  let view = h.page.view().await;
  let id = view.products[0].id;
  h.page.delete(id, true).await.expect("delete");

  assert_eq!(h.images.delete_count(), 1);
  assert!(h.images.inner_is_empty().await);
}

#[tokio::test]
async fn deleting_a_product_without_a_real_image_skips_the_image_store() {
  let h = harness();
  let plain = h.repo.create(product_draft("Ube Pandesal", 800), None).await.expect("seed");
  let mut placeholder_draft = product_draft("Leche Flan", 12000);
  placeholder_draft.image_url = Some(PLACEHOLDER_IMAGE_URL.to_string());
  let placeholder = h.repo.create(placeholder_draft, None).await.expect("seed");

  h.page.delete(plain.id, true).await.expect("delete");
  h.page.delete(placeholder.id, true).await.expect("delete");

  assert_eq!(h.images.delete_count(), 0, "sentinel and absent images never hit the store");
  assert_eq!(h.page.view().await.count, 0);
}

#[tokio::test]
async fn failed_image_upload_degrades_to_the_placeholder() {
  let h = harness();
  h.images.fail_puts.store(true, Ordering::SeqCst);

  h.page.open_create().await;
  let mut submission = input("Red Velvet Cupcakes", "Cake", "45.00");
  submission.image = Some(image_upload("cupcakes.jpg"));
  let view = h.page.submit(submission).await.expect("submit");

  assert!(view.error.is_none(), "the product write itself succeeds");
  assert_eq!(view.count, 1);
  assert!(view.products[0].image_url.is_none(), "placeholder is not shown as an image");

  let stored = h.repo.list().await.expect("list");
  assert_eq!(stored[0].image_url.as_deref(), Some(PLACEHOLDER_IMAGE_URL));
}

#[tokio::test]
async fn load_failure_shows_a_message_and_an_empty_list() {
  let h = harness();
  h.repo.fail_lists.store(true, Ordering::SeqCst);

  let view = h.page.view().await;
  assert_eq!(view.error.as_deref(), Some("Failed to load products"));
  assert_eq!(view.count, 0);
  assert!(view.empty_state.is_some());

  h.repo.fail_lists.store(false, Ordering::SeqCst);
  h.repo.create(product_draft("Leche Flan", 12000), None).await.expect("seed");
  let view = h.page.reload().await;
  assert!(view.error.is_none());
  assert_eq!(view.count, 1);
}

#[tokio::test]
async fn add_button_is_a_noop_while_the_form_is_open() {
  let h = harness();
  let product = h.repo.create(product_draft("Leche Flan", 12000), None).await.expect("seed");

  h.page.open_edit(product.id).await.expect("edit");
  let view = h.page.open_create().await;

  let form = view.form.expect("form still open");
  assert_eq!(form.editing, Some(product.id), "open form is not replaced");
  assert_eq!(form.name, "Leche Flan");
}

// src/pages/products.rs

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::forms::ProductForm;
use crate::models::Product;
use crate::store::{ImageUpload, ProductRepository};
use crate::views::products::{product_empty_state, ProductFormView, ProductPageView, ProductRowView};

/// Submitted form content. Field values are raw input; the open form keeps
/// them verbatim when validation or the store rejects the submission.
#[derive(Debug, Clone)]
pub struct ProductFormInput {
  pub name: String,
  pub product_type: String,
  pub price: String,
  pub description: String,
  pub image: Option<ImageUpload>,
}

struct FormSession {
  editing: Option<Uuid>,
  form: ProductForm,
}

struct PageState {
  loaded: bool,
  products: Vec<Product>,
  error: Option<String>,
  form: Option<FormSession>,
  submitting: bool,
}

impl PageState {
  fn new() -> Self {
    PageState {
      loaded: false,
      products: Vec::new(),
      error: None,
      form: None,
      submitting: false,
    }
  }

  fn view(&self) -> ProductPageView {
    ProductPageView {
      error: self.error.clone(),
      form: self
        .form
        .as_ref()
        .map(|session| ProductFormView::from_form(session.editing, &session.form)),
      submitting: self.submitting,
      products: self.products.iter().map(ProductRowView::from_product).collect(),
      count: self.products.len(),
      empty_state: product_empty_state(self.products.len()),
    }
  }
}

pub struct ProductManagement {
  repo: Arc<dyn ProductRepository>,
  state: Mutex<PageState>,
}

impl ProductManagement {
  pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
    ProductManagement {
      repo,
      state: Mutex::new(PageState::new()),
    }
  }

  /// First page access loads the collection; a failed load still leaves
  /// the loading state, with an empty list and a screen message.
  async fn ensure_loaded(&self, state: &mut PageState) {
    if state.loaded {
      return;
    }
    match self.repo.list().await {
      Ok(products) => {
        info!(count = products.len(), "Loaded product catalog");
        state.products = products;
        state.error = None;
      }
      Err(e) => {
        warn!(error = %e, "Failed to load products");
        state.products = Vec::new();
        state.error = Some("Failed to load products".to_string());
      }
    }
    state.loaded = true;
  }

  pub async fn view(&self) -> ProductPageView {
    let mut state = self.state.lock().await;
    self.ensure_loaded(&mut state).await;
    state.view()
  }

  /// Drop the cache and fetch the collection again.
  pub async fn reload(&self) -> ProductPageView {
    let mut state = self.state.lock().await;
    state.loaded = false;
    self.ensure_loaded(&mut state).await;
    state.view()
  }

  /// Open the form in create mode. A no-op while a form is already open,
  /// mirroring the disabled add control.
  pub async fn open_create(&self) -> ProductPageView {
    let mut state = self.state.lock().await;
    self.ensure_loaded(&mut state).await;
    if state.form.is_none() {
      state.form = Some(FormSession {
        editing: None,
        form: ProductForm::new(),
      });
    }
    state.view()
  }

  /// Open the form in edit mode, populated from the cached entity.
  pub async fn open_edit(&self, id: Uuid) -> Result<ProductPageView> {
    let mut state = self.state.lock().await;
    self.ensure_loaded(&mut state).await;
    let form = state
      .products
      .iter()
      .find(|p| p.id == id)
      .map(ProductForm::for_product)
      .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
    state.form = Some(FormSession {
      editing: Some(id),
      form,
    });
    Ok(state.view())
  }

  pub async fn cancel_form(&self) -> ProductPageView {
    let mut state = self.state.lock().await;
    state.form = None;
    state.view()
  }

  /// Submit the open form. Validation happens before any store call; while
  /// the store call is in flight further submissions are refused; on store
  /// failure the form stays open and populated for retry.
  pub async fn submit(&self, input: ProductFormInput) -> Result<ProductPageView> {
    let (editing, draft, image) = {
      let mut state = self.state.lock().await;
      self.ensure_loaded(&mut state).await;
      if state.submitting {
        return Err(AppError::SubmitPending);
      }
      let session = state
        .form
        .as_mut()
        .ok_or_else(|| AppError::Validation("No product form is open".to_string()))?;
      session.form.name = input.name;
      session.form.product_type = input.product_type;
      session.form.price = input.price;
      session.form.description = input.description;
      if input.image.is_some() {
        session.form.image = input.image;
      }

      match session.form.validate() {
        Ok(draft) => {
          let editing = session.editing;
          let image = session.form.image.clone();
          state.submitting = true;
          (editing, draft, image)
        }
        Err(message) => {
          state.error = Some(message);
          return Ok(state.view());
        }
      }
      // Lock dropped here; the in-flight request does not block other rows.
    };

    let result = match editing {
      None => self.repo.create(draft, image).await,
      Some(id) => self.repo.update(id, draft, image).await,
    };

    let mut state = self.state.lock().await;
    state.submitting = false;
    match result {
      Ok(product) => {
        match editing {
          None => {
            info!(id = %product.id, "Product created");
            state.products.insert(0, product);
          }
          Some(id) => {
            info!(%id, "Product updated");
            if let Some(slot) = state.products.iter_mut().find(|p| p.id == id) {
              *slot = product;
            }
          }
        }
        state.form = None;
        state.error = None;
      }
      Err(e) => {
        warn!(error = %e, "Product submission failed");
        state.error = Some(
          if editing.is_none() {
            "Failed to add product"
          } else {
            "Failed to update product"
          }
          .to_string(),
        );
      }
    }
    Ok(state.view())
  }

  /// Delete a product after interactive confirmation, releasing its stored
  /// image through the repository.
  pub async fn delete(&self, id: Uuid, confirmed: bool) -> Result<ProductPageView> {
    if !confirmed {
      return Err(AppError::Validation(
        "Deletion must be confirmed".to_string(),
      ));
    }
    let image_url = {
      let mut state = self.state.lock().await;
      self.ensure_loaded(&mut state).await;
      state
        .products
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.image_url.clone())
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?
    };

    let result = self.repo.delete(id, image_url.as_deref()).await;

    let mut state = self.state.lock().await;
    match result {
      Ok(()) => {
        info!(%id, "Product deleted");
        state.products.retain(|p| p.id != id);
        state.error = None;
      }
      Err(e) => {
        warn!(error = %e, "Failed to delete product");
        state.error = Some("Failed to delete product".to_string());
      }
    }
    Ok(state.view())
  }
}

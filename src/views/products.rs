// src/views/products.rs

use serde::Serialize;
use uuid::Uuid;

use crate::forms::ProductForm;
use crate::models::{Product, ProductType};

use super::{format_peso, format_timestamp};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRowView {
  pub id: Uuid,
  pub name: String,
  #[serde(rename = "type")]
  pub product_type: &'static str,
  pub price: String,
  pub price_cents: i64,
  pub description: Option<String>,
  /// Present only when a real stored image exists.
  pub image_url: Option<String>,
  pub created: String,
}

impl ProductRowView {
  pub fn from_product(product: &Product) -> Self {
    ProductRowView {
      id: product.id,
      name: product.name.clone(),
      product_type: product.product_type.label(),
      price: format_peso(product.price_cents),
      price_cents: product.price_cents,
      description: product.description.clone(),
      image_url: if product.has_stored_image() {
        product.image_url.clone()
      } else {
        None
      },
      created: format_timestamp(product.created_at),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormView {
  /// Id of the product being edited; absent in create mode.
  pub editing: Option<Uuid>,
  pub name: String,
  #[serde(rename = "type")]
  pub product_type: String,
  pub price: String,
  pub description: String,
  pub image_url: Option<String>,
  /// Filename of a picked-but-not-yet-uploaded image, shown as the preview.
  pub pending_image: Option<String>,
  pub type_options: Vec<&'static str>,
}

impl ProductFormView {
  pub fn from_form(editing: Option<Uuid>, form: &ProductForm) -> Self {
    ProductFormView {
      editing,
      name: form.name.clone(),
      product_type: form.product_type.clone(),
      price: form.price.clone(),
      description: form.description.clone(),
      image_url: form.image_url.clone(),
      pending_image: form.image.as_ref().map(|upload| upload.filename.clone()),
      type_options: ProductType::ALL.iter().map(|t| t.label()).collect(),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageView {
  pub error: Option<String>,
  pub form: Option<ProductFormView>,
  pub submitting: bool,
  pub products: Vec<ProductRowView>,
  pub count: usize,
  pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyState {
  pub title: String,
  pub hint: String,
}

pub fn product_empty_state(count: usize) -> Option<EmptyState> {
  if count > 0 {
    return None;
  }
  Some(EmptyState {
    title: "No products found".to_string(),
    hint: "Add your first product to get started".to_string(),
  })
}

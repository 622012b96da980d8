// src/forms/product.rs

use crate::models::{Product, ProductDraft, ProductType};
use crate::store::ImageUpload;

use super::parse_price_cents;

/// Catalog editor state. `price` and `product_type` are kept as raw input
/// until validation so a bad value never clobbers what the user typed.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
  pub name: String,
  pub product_type: String,
  pub price: String,
  pub description: String,
  /// Reference shown as the current preview; carried over on update so an
  /// edit without a new file keeps the existing photo.
  pub image_url: Option<String>,
  /// File picked for upload, if any.
  pub image: Option<ImageUpload>,
}

impl ProductForm {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn for_product(product: &Product) -> Self {
    ProductForm {
      name: product.name.clone(),
      product_type: product.product_type.label().to_string(),
      price: format!("{}.{:02}", product.price_cents / 100, product.price_cents % 100),
      description: product.description.clone().unwrap_or_default(),
      image_url: product.image_url.clone(),
      image: None,
    }
  }

  /// Check required fields and assemble the draft. Returns a message naming
  /// the missing fields, or a price complaint, without touching any store.
  pub fn validate(&self) -> Result<ProductDraft, String> {
    let mut missing = Vec::new();
    if self.name.trim().is_empty() {
      missing.push("name");
    }
    if self.product_type.trim().is_empty() {
      missing.push("type");
    }
    if self.price.trim().is_empty() {
      missing.push("price");
    }
    if !missing.is_empty() {
      return Err(format!("Please fill in all required fields: {}", missing.join(", ")));
    }

    let product_type = ProductType::from_label(self.product_type.trim())
      .ok_or_else(|| format!("Unknown product type: {}", self.product_type.trim()))?;
    let price_cents =
      parse_price_cents(&self.price).ok_or_else(|| "Price must be a non-negative amount".to_string())?;

    let description = self.description.trim();
    Ok(ProductDraft {
      name: self.name.trim().to_string(),
      product_type,
      price_cents,
      description: if description.is_empty() {
        None
      } else {
        Some(description.to_string())
      },
      image_url: self.image_url.clone(),
    })
  }
}

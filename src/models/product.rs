// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker stored in `image_url` when an upload failed and the product was
/// written without a photo. Treated the same as an absent value.
pub const PLACEHOLDER_IMAGE_URL: &str = "placeholder-image-url";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
  Cookie,
  #[serde(rename = "Baked Sushi")]
  BakedSushi,
  Cake,
  Pastry,
  Bread,
  Dessert,
  Other,
}

impl ProductType {
  pub const ALL: [ProductType; 7] = [
    ProductType::Cookie,
    ProductType::BakedSushi,
    ProductType::Cake,
    ProductType::Pastry,
    ProductType::Bread,
    ProductType::Dessert,
    ProductType::Other,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      ProductType::Cookie => "Cookie",
      ProductType::BakedSushi => "Baked Sushi",
      ProductType::Cake => "Cake",
      ProductType::Pastry => "Pastry",
      ProductType::Bread => "Bread",
      ProductType::Dessert => "Dessert",
      ProductType::Other => "Other",
    }
  }

  pub fn from_label(label: &str) -> Option<Self> {
    Self::ALL.iter().copied().find(|t| t.label() == label)
  }
}

impl std::fmt::Display for ProductType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

/// Document body for the products collection: everything except the
/// store-assigned id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
  pub name: String,
  #[serde(rename = "type")]
  pub product_type: ProductType,
  pub price_cents: i64,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  #[serde(rename = "type")]
  pub product_type: ProductType,
  pub price_cents: i64,
  pub description: Option<String>,
  pub image_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  pub fn from_draft(id: Uuid, draft: ProductDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
    Product {
      id,
      name: draft.name,
      product_type: draft.product_type,
      price_cents: draft.price_cents,
      description: draft.description,
      image_url: draft.image_url,
      created_at,
      updated_at,
    }
  }

  pub fn draft(&self) -> ProductDraft {
    ProductDraft {
      name: self.name.clone(),
      product_type: self.product_type,
      price_cents: self.price_cents,
      description: self.description.clone(),
      image_url: self.image_url.clone(),
    }
  }

  /// Whether `image_url` points at a real stored image (not absent, empty,
  /// or the placeholder marker).
  pub fn has_stored_image(&self) -> bool {
    is_stored_image(self.image_url.as_deref())
  }
}

pub fn is_stored_image(image_url: Option<&str>) -> bool {
  match image_url {
    Some(url) => !url.is_empty() && url != PLACEHOLDER_IMAGE_URL,
    None => false,
  }
}

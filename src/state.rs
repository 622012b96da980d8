// src/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::pages::{OrderManagement, ProductManagement};
use crate::store::ImageStore;

#[derive(Clone)]
pub struct AppState {
  pub products: Arc<ProductManagement>,
  pub orders: Arc<OrderManagement>,
  pub images: Arc<dyn ImageStore>,
  pub config: Arc<AppConfig>,
}

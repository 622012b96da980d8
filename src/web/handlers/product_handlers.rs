// src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use base64::Engine as _;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::pages::products::ProductFormInput;
use crate::state::AppState;
use crate::store::ImageUpload;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
  pub filename: String,
  #[serde(default)]
  pub content_type: Option<String>,
  /// Base64-encoded file content.
  pub data: String,
}

impl ImagePayload {
  pub fn decode(self) -> Result<ImageUpload, AppError> {
    let bytes = base64::engine::general_purpose::STANDARD
      .decode(self.data.as_bytes())
      .map_err(|_| AppError::Validation("Image data must be base64-encoded".to_string()))?;
    Ok(ImageUpload {
      filename: self.filename,
      content_type: self.content_type,
      bytes,
    })
  }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OpenProductFormPayload {
  /// Present to edit an existing product; absent for create mode.
  #[serde(default)]
  pub product_id: Option<Uuid>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProductPayload {
  #[serde(default)]
  pub name: String,
  #[serde(rename = "type", default)]
  pub product_type: String,
  #[serde(default)]
  pub price: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub image: Option<ImagePayload>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeletePayload {
  #[serde(default)]
  pub confirmed: bool,
}

// --- Handlers ---

#[instrument(name = "handler::product_page", skip(app_state))]
pub async fn page_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.products.view().await))
}

#[instrument(name = "handler::reload_products", skip(app_state))]
pub async fn reload_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.products.reload().await))
}

#[instrument(name = "handler::open_product_form", skip(app_state, payload))]
pub async fn open_form_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<OpenProductFormPayload>,
) -> Result<HttpResponse, AppError> {
  let view = match payload.into_inner().product_id {
    Some(id) => app_state.products.open_edit(id).await?,
    None => app_state.products.open_create().await,
  };
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::cancel_product_form", skip(app_state))]
pub async fn cancel_form_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.products.cancel_form().await))
}

#[instrument(name = "handler::submit_product_form", skip(app_state, payload))]
pub async fn submit_form_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<SubmitProductPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let image = payload.image.map(ImagePayload::decode).transpose()?;
  let input = ProductFormInput {
    name: payload.name,
    product_type: payload.product_type,
    price: payload.price,
    description: payload.description,
    image,
  };
  let view = app_state.products.submit(input).await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::delete_product", skip(app_state, path, payload), fields(product_id = %path.as_ref()))]
pub async fn delete_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<DeletePayload>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  info!("Delete requested for product {}", id);
  let view = app_state.products.delete(id, payload.confirmed).await?;
  Ok(HttpResponse::Ok().json(view))
}

/// Serve stored image bytes so the references handed out by the store are
/// retrievable.
#[instrument(name = "handler::get_image", skip(app_state, path))]
pub async fn image_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
  let key = path.into_inner();
  let stored = app_state
    .images
    .get(&key)
    .await
    .map_err(AppError::from)?
    .ok_or_else(|| AppError::NotFound(format!("Image {} not found", key)))?;
  Ok(
    HttpResponse::Ok()
      .content_type(stored.content_type.unwrap_or_else(|| "application/octet-stream".to_string()))
      .body(stored.bytes),
  )
}

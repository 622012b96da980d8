// src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::pages::orders::OrderFormInput;
use crate::state::AppState;

use super::product_handlers::DeletePayload;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FilterPayload {
  #[serde(default = "default_status_filter")]
  pub status: String,
  #[serde(default)]
  pub delivery_date: Option<String>,
}

fn default_status_filter() -> String {
  "All".to_string()
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrderFormPayload {
  /// Present to edit an existing order; absent for create mode.
  #[serde(default)]
  pub order_id: Option<Uuid>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPayload {
  #[serde(default)]
  pub product_id: Option<Uuid>,
  #[serde(default)]
  pub quantity: Option<i64>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderPayload {
  #[serde(default)]
  pub customer_name: String,
  #[serde(default)]
  pub phone_number: String,
  #[serde(default)]
  pub delivery_address: String,
  #[serde(default)]
  pub delivery_date: String,
  #[serde(default)]
  pub payment_mode: String,
  #[serde(default)]
  pub is_paid: bool,
  #[serde(default = "default_status")]
  pub status: String,
  #[serde(default)]
  pub notes: String,
}

fn default_status() -> String {
  "Pending".to_string()
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusPayload {
  pub status: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetPaidPayload {
  pub is_paid: bool,
}

// --- Handlers ---

#[instrument(name = "handler::order_page", skip(app_state))]
pub async fn page_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.orders.view().await))
}

#[instrument(name = "handler::reload_orders", skip(app_state))]
pub async fn reload_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.orders.reload().await))
}

#[instrument(name = "handler::filter_orders", skip(app_state, payload))]
pub async fn filter_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<FilterPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let view = app_state
    .orders
    .set_filter(&payload.status, payload.delivery_date.as_deref())
    .await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::toggle_upcoming", skip(app_state))]
pub async fn toggle_upcoming_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.orders.toggle_upcoming().await))
}

#[instrument(name = "handler::open_order_form", skip(app_state, payload))]
pub async fn open_form_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<OpenOrderFormPayload>,
) -> Result<HttpResponse, AppError> {
  let view = match payload.into_inner().order_id {
    Some(id) => app_state.orders.open_edit(id).await?,
    None => app_state.orders.open_create().await,
  };
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::cancel_order_form", skip(app_state))]
pub async fn cancel_form_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.orders.cancel_form().await))
}

#[instrument(name = "handler::add_order_item", skip(app_state))]
pub async fn add_item_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.orders.add_form_item().await?))
}

#[instrument(name = "handler::update_order_item", skip(app_state, path, payload), fields(index = %path.as_ref()))]
pub async fn update_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<usize>,
  payload: web::Json<UpdateItemPayload>,
) -> Result<HttpResponse, AppError> {
  let index = path.into_inner();
  let payload = payload.into_inner();
  let view = app_state
    .orders
    .update_form_item(index, payload.product_id, payload.quantity)
    .await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::remove_order_item", skip(app_state, path), fields(index = %path.as_ref()))]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<usize>,
) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.orders.remove_form_item(path.into_inner()).await?))
}

#[instrument(name = "handler::submit_order_form", skip(app_state, payload))]
pub async fn submit_form_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<SubmitOrderPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = payload.into_inner();
  let input = OrderFormInput {
    customer_name: payload.customer_name,
    phone_number: payload.phone_number,
    delivery_address: payload.delivery_address,
    delivery_date: payload.delivery_date,
    payment_mode: payload.payment_mode,
    is_paid: payload.is_paid,
    status: payload.status,
    notes: payload.notes,
  };
  let view = app_state.orders.submit(input).await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::delete_order", skip(app_state, path, payload), fields(order_id = %path.as_ref()))]
pub async fn delete_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<DeletePayload>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  info!("Delete requested for order {}", id);
  let view = app_state.orders.delete(id, payload.confirmed).await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::order_details", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn details_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  Ok(HttpResponse::Ok().json(app_state.orders.details(path.into_inner()).await?))
}

#[instrument(name = "handler::copy_contact", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn copy_contact_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let text = app_state.orders.copy_contact(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "copied": true, "text": text })))
}

#[instrument(name = "handler::set_order_status", skip(app_state, path, payload), fields(order_id = %path.as_ref()))]
pub async fn set_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<SetStatusPayload>,
) -> Result<HttpResponse, AppError> {
  let view = app_state.orders.set_status(path.into_inner(), &payload.status).await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::set_order_paid", skip(app_state, path, payload), fields(order_id = %path.as_ref()))]
pub async fn set_paid_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<SetPaidPayload>,
) -> Result<HttpResponse, AppError> {
  let view = app_state.orders.set_paid(path.into_inner(), payload.is_paid).await?;
  Ok(HttpResponse::Ok().json(view))
}

// src/views/orders.rs

use serde::Serialize;
use uuid::Uuid;

use crate::forms::OrderForm;
use crate::models::{Order, OrderStatus};
use crate::pages::orders::StatusSummary;

use super::products::EmptyState;
use super::{format_delivery_date, format_delivery_date_long, format_peso, format_timestamp};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
  pub product_name: String,
  pub quantity: i64,
  pub price: String,
  pub subtotal: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRowView {
  pub id: Uuid,
  pub customer_name: String,
  pub phone_number: String,
  pub delivery_address: String,
  pub delivery_date: String,
  pub payment_mode: String,
  pub is_paid: bool,
  pub status: &'static str,
  pub status_options: Vec<&'static str>,
  pub items: Vec<OrderItemView>,
  pub total: String,
  pub created: String,
}

impl OrderRowView {
  pub fn from_order(order: &Order) -> Self {
    OrderRowView {
      id: order.id,
      customer_name: order.customer_name.clone(),
      phone_number: order.phone_number.clone(),
      delivery_address: order.delivery_address.clone(),
      delivery_date: format_delivery_date(order.delivery_date),
      payment_mode: order.payment_mode.clone().unwrap_or_else(|| "COD".to_string()),
      is_paid: order.is_paid,
      status: order.status.label(),
      status_options: OrderStatus::ALL.iter().map(|s| s.label()).collect(),
      items: order
        .ordered_items
        .iter()
        .map(|item| OrderItemView {
          product_name: item.product_name.clone(),
          quantity: item.quantity,
          price: format_peso(item.price_cents),
          subtotal: format_peso(item.subtotal_cents()),
        })
        .collect(),
      total: format_peso(order.total_amount_cents),
      created: format_timestamp(order.created_at),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRowView {
  pub product_id: Option<Uuid>,
  pub product_name: String,
  pub price: String,
  pub quantity: i64,
  pub subtotal: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFormView {
  /// Id of the order being edited; absent in create mode.
  pub editing: Option<Uuid>,
  pub customer_name: String,
  pub phone_number: String,
  pub delivery_address: String,
  pub delivery_date: String,
  pub payment_mode: String,
  pub is_paid: bool,
  pub status: &'static str,
  pub status_options: Vec<&'static str>,
  pub notes: String,
  pub items: Vec<LineItemRowView>,
  /// Live total over the current rows.
  pub total: String,
}

impl OrderFormView {
  pub fn from_form(editing: Option<Uuid>, form: &OrderForm) -> Self {
    OrderFormView {
      editing,
      customer_name: form.customer_name.clone(),
      phone_number: form.phone_number.clone(),
      delivery_address: form.delivery_address.clone(),
      delivery_date: form.delivery_date.clone(),
      payment_mode: form.payment_mode.clone(),
      is_paid: form.is_paid,
      status: form.status.label(),
      status_options: OrderStatus::ALL.iter().map(|s| s.label()).collect(),
      notes: form.notes.clone(),
      items: form
        .items
        .iter()
        .map(|row| LineItemRowView {
          product_id: row.product_id,
          product_name: row.product_name.clone(),
          price: format_peso(row.price_cents),
          quantity: row.quantity,
          subtotal: format_peso(row.subtotal_cents()),
        })
        .collect(),
      total: format_peso(form.total_cents()),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRowView {
  pub label: String,
  pub count: usize,
  pub total: String,
}

impl SummaryRowView {
  pub fn from_summary(summary: &StatusSummary) -> Self {
    SummaryRowView {
      label: summary.label.to_string(),
      count: summary.count,
      total: format_peso(summary.total_cents),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRowView {
  pub id: Uuid,
  pub customer_name: String,
  pub delivery_date: String,
  pub status: &'static str,
  pub total: String,
}

impl UpcomingRowView {
  pub fn from_order(order: &Order) -> Self {
    UpcomingRowView {
      id: order.id,
      customer_name: order.customer_name.clone(),
      delivery_date: format_delivery_date(order.delivery_date),
      status: order.status.label(),
      total: format_peso(order.total_amount_cents),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPageView {
  pub error: Option<String>,
  pub form: Option<OrderFormView>,
  pub submitting: bool,
  pub status_filter: String,
  pub delivery_date_filter: Option<String>,
  pub summary: Vec<SummaryRowView>,
  /// Total over the currently filtered set.
  pub grand_total: String,
  /// Present only while the upcoming panel is toggled visible.
  pub upcoming: Option<Vec<UpcomingRowView>>,
  pub orders: Vec<OrderRowView>,
  pub count: usize,
  pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailsView {
  pub id: Uuid,
  pub customer_name: String,
  pub phone_number: String,
  pub delivery_address: String,
  pub delivery_date: String,
  pub payment_mode: String,
  pub is_paid: bool,
  pub status: &'static str,
  pub notes: Option<String>,
  pub items: Vec<OrderItemView>,
  pub total: String,
  pub created: String,
  /// True for two seconds after a copy-contact action.
  pub copy_confirmed: bool,
}

impl OrderDetailsView {
  pub fn from_order(order: &Order, copy_confirmed: bool) -> Self {
    let row = OrderRowView::from_order(order);
    OrderDetailsView {
      id: order.id,
      customer_name: row.customer_name,
      phone_number: row.phone_number,
      delivery_address: row.delivery_address,
      delivery_date: format_delivery_date_long(order.delivery_date),
      payment_mode: row.payment_mode,
      is_paid: order.is_paid,
      status: order.status.label(),
      notes: order.notes.clone(),
      items: row.items,
      total: row.total,
      created: row.created,
      copy_confirmed,
    }
  }
}

/// Text block placed on the clipboard by the copy-contact action. The
/// address line is only present when there is an address to copy.
pub fn contact_info_block(order: &Order) -> String {
  let mut text = format!("Name: {}\nContact: {}", order.customer_name, order.phone_number);
  if !order.delivery_address.is_empty() {
    text.push_str(&format!("\nAddress: {}", order.delivery_address));
  }
  text
}

pub fn order_empty_state(order_count: usize, product_count: usize) -> Option<EmptyState> {
  if order_count > 0 {
    return None;
  }
  let hint = if product_count == 0 {
    "Add some products first, then create your first order"
  } else {
    "Add your first order to get started"
  };
  Some(EmptyState {
    title: "No orders found".to_string(),
    hint: hint.to_string(),
  })
}

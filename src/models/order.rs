// src/models/order.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order_item::OrderItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
  Pending,
  #[serde(rename = "In Progress")]
  InProgress,
  Completed,
  Cancelled,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::InProgress,
    OrderStatus::Completed,
    OrderStatus::Cancelled,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "Pending",
      OrderStatus::InProgress => "In Progress",
      OrderStatus::Completed => "Completed",
      OrderStatus::Cancelled => "Cancelled",
    }
  }

  pub fn from_label(label: &str) -> Option<Self> {
    Self::ALL.iter().copied().find(|s| s.label() == label)
  }
}

impl Default for OrderStatus {
  fn default() -> Self {
    OrderStatus::Pending
  }
}

impl std::fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

/// Document body for the orders collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
  pub customer_name: String,
  pub phone_number: String,
  pub delivery_address: String,
  #[serde(default)]
  pub delivery_date: Option<NaiveDate>,
  #[serde(default)]
  pub payment_mode: Option<String>,
  #[serde(default)]
  pub is_paid: bool,
  #[serde(default)]
  pub status: OrderStatus,
  pub ordered_items: Vec<OrderItem>,
  pub total_amount_cents: i64,
  #[serde(default)]
  pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: Uuid,
  pub customer_name: String,
  pub phone_number: String,
  pub delivery_address: String,
  pub delivery_date: Option<NaiveDate>,
  pub payment_mode: Option<String>,
  pub is_paid: bool,
  pub status: OrderStatus,
  pub ordered_items: Vec<OrderItem>,
  pub total_amount_cents: i64,
  pub notes: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Order {
  pub fn from_draft(id: Uuid, draft: OrderDraft, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
    Order {
      id,
      customer_name: draft.customer_name,
      phone_number: draft.phone_number,
      delivery_address: draft.delivery_address,
      delivery_date: draft.delivery_date,
      payment_mode: draft.payment_mode,
      is_paid: draft.is_paid,
      status: draft.status,
      ordered_items: draft.ordered_items,
      total_amount_cents: draft.total_amount_cents,
      notes: draft.notes,
      created_at,
      updated_at,
    }
  }

  pub fn draft(&self) -> OrderDraft {
    OrderDraft {
      customer_name: self.customer_name.clone(),
      phone_number: self.phone_number.clone(),
      delivery_address: self.delivery_address.clone(),
      delivery_date: self.delivery_date,
      payment_mode: self.payment_mode.clone(),
      is_paid: self.is_paid,
      status: self.status,
      ordered_items: self.ordered_items.clone(),
      total_amount_cents: self.total_amount_cents,
      notes: self.notes.clone(),
    }
  }
}

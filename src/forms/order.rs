// src/forms/order.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::order_item::total_cents;
use crate::models::{Order, OrderDraft, OrderItem, OrderStatus, Product};

/// One editable line of the order form. Until a product is picked the row
/// has no snapshot; picking one copies the catalog name/price exactly once.
#[derive(Debug, Clone)]
pub struct LineItemRow {
  pub product_id: Option<Uuid>,
  pub product_name: String,
  pub price_cents: i64,
  pub quantity: i64,
}

impl LineItemRow {
  fn empty() -> Self {
    LineItemRow {
      product_id: None,
      product_name: String::new(),
      price_cents: 0,
      quantity: 1,
    }
  }

  pub fn subtotal_cents(&self) -> i64 {
    self.price_cents * self.quantity
  }
}

#[derive(Debug, Clone)]
pub struct OrderForm {
  pub customer_name: String,
  pub phone_number: String,
  pub delivery_address: String,
  /// Raw `YYYY-MM-DD` input; empty means no delivery date.
  pub delivery_date: String,
  pub payment_mode: String,
  pub is_paid: bool,
  pub status: OrderStatus,
  pub notes: String,
  pub items: Vec<LineItemRow>,
}

impl Default for OrderForm {
  fn default() -> Self {
    OrderForm {
      customer_name: String::new(),
      phone_number: String::new(),
      delivery_address: String::new(),
      delivery_date: String::new(),
      payment_mode: String::new(),
      is_paid: false,
      status: OrderStatus::Pending,
      notes: String::new(),
      items: Vec::new(),
    }
  }
}

impl OrderForm {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn for_order(order: &Order) -> Self {
    OrderForm {
      customer_name: order.customer_name.clone(),
      phone_number: order.phone_number.clone(),
      delivery_address: order.delivery_address.clone(),
      delivery_date: order
        .delivery_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default(),
      payment_mode: order.payment_mode.clone().unwrap_or_default(),
      is_paid: order.is_paid,
      status: order.status,
      notes: order.notes.clone().unwrap_or_default(),
      items: order
        .ordered_items
        .iter()
        .map(|item| LineItemRow {
          product_id: Some(item.product_id),
          product_name: item.product_name.clone(),
          price_cents: item.price_cents,
          quantity: item.quantity,
        })
        .collect(),
    }
  }

  /// Append an empty row.
  pub fn add_item(&mut self) {
    self.items.push(LineItemRow::empty());
  }

  /// Remove a row by position. Returns false when the index is out of range.
  pub fn remove_item(&mut self, index: usize) -> bool {
    if index >= self.items.len() {
      return false;
    }
    self.items.remove(index);
    true
  }

  /// Pick a product for a row, copying its name and price from the current
  /// catalog. This is a one-time copy: later catalog changes leave the row
  /// untouched. Returns false when the index or product is unknown.
  pub fn set_item_product(&mut self, index: usize, product_id: Uuid, catalog: &[Product]) -> bool {
    let Some(row) = self.items.get_mut(index) else {
      return false;
    };
    let Some(product) = catalog.iter().find(|p| p.id == product_id) else {
      return false;
    };
    row.product_id = Some(product.id);
    row.product_name = product.name.clone();
    row.price_cents = product.price_cents;
    true
  }

  /// Set a row's quantity. Returns false when the index is out of range.
  pub fn set_item_quantity(&mut self, index: usize, quantity: i64) -> bool {
    let Some(row) = self.items.get_mut(index) else {
      return false;
    };
    row.quantity = quantity;
    true
  }

  /// Live total shown while editing; also what gets persisted on submit.
  pub fn total_cents(&self) -> i64 {
    self.items.iter().map(LineItemRow::subtotal_cents).sum()
  }

  /// Check the form and assemble a draft with the recomputed total.
  pub fn validate(&self) -> Result<OrderDraft, String> {
    if self.customer_name.trim().is_empty()
      || self.phone_number.trim().is_empty()
      || self.delivery_address.trim().is_empty()
    {
      return Err("Please fill in all required customer information".to_string());
    }
    if self.items.is_empty() {
      return Err("Please add at least one item to the order".to_string());
    }
    if self
      .items
      .iter()
      .any(|row| row.product_id.is_none() || row.quantity <= 0)
    {
      return Err("Please ensure all items have a product selected and quantity greater than 0".to_string());
    }

    let delivery_date = match self.delivery_date.trim() {
      "" => None,
      raw => Some(
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
          .map_err(|_| "Delivery date must use the YYYY-MM-DD format".to_string())?,
      ),
    };

    let ordered_items: Vec<OrderItem> = self
      .items
      .iter()
      .map(|row| OrderItem {
        product_id: row.product_id.expect("validated above"),
        product_name: row.product_name.clone(),
        price_cents: row.price_cents,
        quantity: row.quantity,
      })
      .collect();
    let total_amount_cents = total_cents(&ordered_items);

    let payment_mode = self.payment_mode.trim();
    let notes = self.notes.trim();
    Ok(OrderDraft {
      customer_name: self.customer_name.trim().to_string(),
      phone_number: self.phone_number.trim().to_string(),
      delivery_address: self.delivery_address.trim().to_string(),
      delivery_date,
      payment_mode: if payment_mode.is_empty() {
        None
      } else {
        Some(payment_mode.to_string())
      },
      is_paid: self.is_paid,
      status: self.status,
      ordered_items,
      total_amount_cents,
      notes: if notes.is_empty() { None } else { Some(notes.to_string()) },
    })
  }
}

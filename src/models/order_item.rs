// src/models/order_item.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of an order. `product_name` and `price_cents` are a snapshot
/// captured when the product was picked, so historical orders keep their
/// amounts when the catalog changes or a product is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub product_id: Uuid,
  pub product_name: String,
  pub price_cents: i64,
  pub quantity: i64,
}

impl OrderItem {
  pub fn subtotal_cents(&self) -> i64 {
    self.price_cents * self.quantity
  }
}

/// Sum of line subtotals. This is the only way `total_amount_cents` may be
/// produced.
pub fn total_cents(items: &[OrderItem]) -> i64 {
  items.iter().map(OrderItem::subtotal_cents).sum()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn item(price_cents: i64, quantity: i64) -> OrderItem {
    OrderItem {
      product_id: Uuid::new_v4(),
      product_name: "Test".to_string(),
      price_cents,
      quantity,
    }
  }

  #[test]
  fn total_is_sum_of_subtotals() {
    // 25.00 x 2 + 45.00 x 4 = 230.00
    let items = vec![item(2500, 2), item(4500, 4)];
    assert_eq!(total_cents(&items), 23000);
  }

  #[test]
  fn empty_order_totals_zero() {
    assert_eq!(total_cents(&[]), 0);
  }
}

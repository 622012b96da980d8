// src/seed.rs

//! First-run sample data: a small catalog plus two orders against it.
//! Used when `SEED_DB` is set and whenever the service runs offline.

use chrono::{Days, Utc};
use tracing::info;

use crate::models::order_item::total_cents;
use crate::models::{OrderDraft, OrderItem, OrderStatus, Product, ProductDraft, ProductType};
use crate::store::{OrderRepository, ProductRepository, StoreResult};

fn sample_products() -> Vec<ProductDraft> {
  let product = |name: &str, product_type, price_cents, description: &str| ProductDraft {
    name: name.to_string(),
    product_type,
    price_cents,
    description: Some(description.to_string()),
    image_url: None,
  };
  vec![
    product(
      "Chocolate Chip Cookies",
      ProductType::Cookie,
      2500,
      "Classic homemade chocolate chip cookies with premium chocolate chips. Perfect for any occasion.",
    ),
    product(
      "California Maki Baked Sushi",
      ProductType::BakedSushi,
      18000,
      "Delicious baked sushi with crabstick, cucumber, and avocado topped with mayo and cheese.",
    ),
    product(
      "Red Velvet Cupcakes",
      ProductType::Cake,
      4500,
      "Moist red velvet cupcakes with cream cheese frosting. Sold individually.",
    ),
    product(
      "Butter Croissants",
      ProductType::Pastry,
      3500,
      "Flaky, buttery croissants baked fresh daily. Perfect for breakfast or snacks.",
    ),
    product(
      "Ube Pandesal",
      ProductType::Bread,
      800,
      "Traditional Filipino bread roll with a modern ube twist. Soft and slightly sweet.",
    ),
    product(
      "Leche Flan",
      ProductType::Dessert,
      12000,
      "Silky smooth traditional Filipino leche flan with rich caramel sauce.",
    ),
  ]
}

fn snapshot(catalog: &[Product], name: &str, quantity: i64) -> Option<OrderItem> {
  catalog.iter().find(|p| p.name == name).map(|p| OrderItem {
    product_id: p.id,
    product_name: p.name.clone(),
    price_cents: p.price_cents,
    quantity,
  })
}

fn sample_orders(catalog: &[Product]) -> Vec<OrderDraft> {
  let today = Utc::now().date_naive();
  let mut orders = Vec::new();

  let items: Vec<OrderItem> = [
    snapshot(catalog, "Chocolate Chip Cookies", 2),
    snapshot(catalog, "Red Velvet Cupcakes", 4),
  ]
  .into_iter()
  .flatten()
  .collect();
  if !items.is_empty() {
    orders.push(OrderDraft {
      customer_name: "Maria Santos".to_string(),
      phone_number: "09123456789".to_string(),
      delivery_address: "123 Main Street, Quezon City".to_string(),
      delivery_date: Some(today + Days::new(2)),
      payment_mode: Some("COD".to_string()),
      is_paid: false,
      status: OrderStatus::InProgress,
      total_amount_cents: total_cents(&items),
      ordered_items: items,
      notes: Some("Please deliver before 3 PM. Customer will pay cash on delivery.".to_string()),
    });
  }

  let items: Vec<OrderItem> = snapshot(catalog, "California Maki Baked Sushi", 3)
    .into_iter()
    .collect();
  if !items.is_empty() {
    orders.push(OrderDraft {
      customer_name: "Juan Dela Cruz".to_string(),
      phone_number: "09987654321".to_string(),
      delivery_address: "456 Oak Avenue, Makati City".to_string(),
      delivery_date: Some(today + Days::new(4)),
      payment_mode: Some("GCash".to_string()),
      is_paid: true,
      status: OrderStatus::Pending,
      total_amount_cents: total_cents(&items),
      ordered_items: items,
      notes: Some("Birthday party order. Customer prefers afternoon delivery.".to_string()),
    });
  }

  orders
}

/// Insert the sample data into empty collections. Collections that already
/// hold documents are left alone.
pub async fn seed_if_empty(products: &dyn ProductRepository, orders: &dyn OrderRepository) -> StoreResult<()> {
  if products.list().await?.is_empty() {
    for draft in sample_products() {
      products.create(draft, None).await?;
    }
    info!("Seeded sample products");
  }

  if orders.list().await?.is_empty() {
    let catalog = products.list().await?;
    for draft in sample_orders(&catalog) {
      orders.create(draft).await?;
    }
    info!("Seeded sample orders");
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::memory::{MemoryImageStore, MemoryOrderRepository, MemoryProductRepository};
  use std::sync::Arc;

  #[tokio::test]
  async fn seeding_is_idempotent_for_nonempty_collections() {
    let images = Arc::new(MemoryImageStore::new());
    let products = MemoryProductRepository::new(images);
    let orders = MemoryOrderRepository::new();

    seed_if_empty(&products, &orders).await.expect("seed");
    let first_count = products.list().await.expect("list").len();
    assert_eq!(first_count, 6);
    assert_eq!(orders.list().await.expect("list").len(), 2);

    seed_if_empty(&products, &orders).await.expect("seed again");
    assert_eq!(products.list().await.expect("list").len(), first_count);
  }

  #[tokio::test]
  async fn seeded_order_totals_match_their_items() {
    let images = Arc::new(MemoryImageStore::new());
    let products = MemoryProductRepository::new(images);
    let orders = MemoryOrderRepository::new();
    seed_if_empty(&products, &orders).await.expect("seed");

    for order in orders.list().await.expect("list") {
      assert_eq!(order.total_amount_cents, total_cents(&order.ordered_items));
    }
  }
}

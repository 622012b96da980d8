// src/models/mod.rs

//! Data structures for the two document collections.

pub mod order;
pub mod order_item;
pub mod product;

pub use order::{Order, OrderDraft, OrderStatus};
pub use order_item::OrderItem;
pub use product::{Product, ProductDraft, ProductType, PLACEHOLDER_IMAGE_URL};

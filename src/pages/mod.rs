// src/pages/mod.rs

//! Page controllers. Each controller owns the authoritative in-memory copy
//! of its collections (an explicit client-side cache of the remote store),
//! orchestrates CRUD against the repositories, and patches the cache
//! optimistically instead of re-fetching after every write.

pub mod orders;
pub mod products;

pub use orders::OrderManagement;
pub use products::ProductManagement;

// src/main.rs

use std::sync::Arc;

use actix_web::{web as actix_data, App, HttpServer};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use panaderia::config::AppConfig;
use panaderia::pages::{OrderManagement, ProductManagement};
use panaderia::seed;
use panaderia::state::AppState;
use panaderia::store::memory::{MemoryImageStore, MemoryOrderRepository, MemoryProductRepository};
use panaderia::store::postgres::{self, PgImageStore, PgOrderRepository, PgProductRepository};
use panaderia::store::{ImageStore, OrderRepository, ProductRepository};
use panaderia::web::configure_app_routes;

struct Backends {
  products: Arc<dyn ProductRepository>,
  orders: Arc<dyn OrderRepository>,
  images: Arc<dyn ImageStore>,
  offline: bool,
}

/// Connect to the document store, or fall back to seeded in-memory stores
/// when it is unreachable.
async fn build_backends(config: &AppConfig) -> Backends {
  if let Some(database_url) = config.database_url.as_deref() {
    match postgres::connect(database_url).await {
      Ok(pool) => {
        let images: Arc<dyn ImageStore> = Arc::new(PgImageStore::new(pool.clone()));
        return Backends {
          products: Arc::new(PgProductRepository::new(pool.clone(), images.clone())),
          orders: Arc::new(PgOrderRepository::new(pool)),
          images,
          offline: false,
        };
      }
      Err(e) => {
        tracing::error!(error = %e, "Failed to connect to the document store.");
        tracing::warn!("Continuing in offline mode with in-memory stores.");
      }
    }
  } else {
    tracing::warn!("DATABASE_URL is not set; running in offline mode with in-memory stores.");
  }

  let images: Arc<dyn ImageStore> = Arc::new(MemoryImageStore::new());
  Backends {
    products: Arc::new(MemoryProductRepository::new(images.clone())),
    orders: Arc::new(MemoryOrderRepository::new()),
    images,
    offline: true,
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting bakery administration server...");

  let config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      std::process::exit(1);
    }
  };

  let backends = build_backends(&config).await;

  // Offline mode always gets the sample data; a real store is only seeded
  // when asked for.
  if config.seed_db || backends.offline {
    if let Err(e) = seed::seed_if_empty(backends.products.as_ref(), backends.orders.as_ref()).await {
      tracing::error!(error = %e, "Failed to seed sample data.");
    }
  }

  let app_state = AppState {
    products: Arc::new(ProductManagement::new(backends.products.clone())),
    orders: Arc::new(OrderManagement::new(backends.orders, backends.products)),
    images: backends.images,
    config: config.clone(),
  };

  let bind_addr = format!("{}:{}", config.server_host, config.server_port);
  tracing::info!("Listening on http://{}", bind_addr);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&bind_addr)?
  .run()
  .await
}

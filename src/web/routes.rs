// src/web/routes.rs

use actix_web::web;

use super::handlers::{order_handlers, product_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      // Product Management
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::page_handler))
          .route("/reload", web::post().to(product_handlers::reload_handler))
          .route("/form/open", web::post().to(product_handlers::open_form_handler))
          .route("/form/cancel", web::post().to(product_handlers::cancel_form_handler))
          .route("/form/submit", web::post().to(product_handlers::submit_form_handler))
          .route("/{product_id}", web::delete().to(product_handlers::delete_handler)),
      )
      // Stored images, addressed by the references the store hands out
      .service(web::scope("/files").route("/{key:.*}", web::get().to(product_handlers::image_handler)))
      // Order Management
      .service(
        web::scope("/orders")
          .route("", web::get().to(order_handlers::page_handler))
          .route("/reload", web::post().to(order_handlers::reload_handler))
          .route("/filter", web::post().to(order_handlers::filter_handler))
          .route("/upcoming/toggle", web::post().to(order_handlers::toggle_upcoming_handler))
          .route("/form/open", web::post().to(order_handlers::open_form_handler))
          .route("/form/cancel", web::post().to(order_handlers::cancel_form_handler))
          .route("/form/items/add", web::post().to(order_handlers::add_item_handler))
          .route("/form/items/{index}", web::post().to(order_handlers::update_item_handler))
          .route(
            "/form/items/{index}/remove",
            web::post().to(order_handlers::remove_item_handler),
          )
          .route("/form/submit", web::post().to(order_handlers::submit_form_handler))
          .service(
            web::resource("/{order_id}")
              .route(web::get().to(order_handlers::details_handler))
              .route(web::delete().to(order_handlers::delete_handler)),
          )
          .route("/{order_id}/copy-contact", web::post().to(order_handlers::copy_contact_handler))
          .route("/{order_id}/status", web::post().to(order_handlers::set_status_handler))
          .route("/{order_id}/paid", web::post().to(order_handlers::set_paid_handler)),
      ),
  );
}

// apps/product_ingest/src/web/routes.rs

use actix_web::{web, HttpResponse};

use crate::web::handlers::{health_handlers, product_handlers};

async fn method_not_allowed() -> HttpResponse {
  HttpResponse::MethodNotAllowed().finish()
}

// This function will be called in `main.rs` (and by the service tests) to configure the App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api") // Base path, as published by the functions host
      // Health Check Route
      .route("/health", web::get().to(health_handlers::health_check_handler))
      // Product ingest: POST only
      .service(
        web::resource("/products")
          .route(web::post().to(product_handlers::create_product_handler))
          .default_service(web::to(method_not_allowed)),
      ),
  );
}

/// Payload ceiling for raw body extraction. Applied at app level so the handler
/// itself never imposes a tighter limit.
pub fn payload_config(max_payload_bytes: usize) -> web::PayloadConfig {
  web::PayloadConfig::new(max_payload_bytes)
}

// apps/product_ingest/src/web/handlers/health_handlers.rs

use actix_web::HttpResponse;

// Liveness only; the table store is checked once at startup.
pub async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

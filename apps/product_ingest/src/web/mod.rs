// apps/product_ingest/src/web/mod.rs

// Declare child modules
pub mod auth;
pub mod handlers;
pub mod routes;

// Re-export the routing configuration for main.rs and the service tests.
pub use routes::{configure_app_routes, payload_config};

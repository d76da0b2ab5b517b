// apps/product_ingest/src/web/handlers/mod.rs

// Declare handler modules
pub mod health_handlers;
pub mod product_handlers;

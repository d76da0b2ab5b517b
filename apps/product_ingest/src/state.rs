// apps/product_ingest/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use tablestore::TableClient;

/// Process-wide dependencies, built once in `main` and cloned into every worker.
#[derive(Clone, Debug)]
pub struct AppState {
  pub products: TableClient,  // Shared handle to the products table
  pub config: Arc<AppConfig>, // Share loaded config
}

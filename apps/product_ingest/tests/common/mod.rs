// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};
use tablestore::{MemoryBackend, StoreError, StoreResult, StoredEntity, TableBackend, TableServiceClient};
use tracing::Level;

use product_ingest::config::{AppConfig, DEFAULT_MAX_PAYLOAD_BYTES, DEFAULT_TABLE_NAME};
use product_ingest::AppState;

/// Builds an initialized actix test service around the given `AppState`.
macro_rules! test_app {
  ($state:expr) => {
    test_app!($state, product_ingest::config::DEFAULT_MAX_PAYLOAD_BYTES)
  };
  ($state:expr, $max_payload:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state))
        .app_data(product_ingest::web::payload_config($max_payload))
        .configure(product_ingest::web::configure_app_routes),
    )
    .await
  };
}

/// Memory backend that remembers every entity handed to `insert_entity`, accepted or not.
#[derive(Default)]
pub struct RecordingBackend {
  pub inner: MemoryBackend,
  pub inserted: Mutex<Vec<StoredEntity>>,
}

impl RecordingBackend {
  pub fn insert_calls(&self) -> usize {
    self.inserted.lock().unwrap().len()
  }

  pub fn last_insert(&self) -> Option<StoredEntity> {
    self.inserted.lock().unwrap().last().cloned()
  }
}

#[async_trait]
impl TableBackend for RecordingBackend {
  async fn create_table_if_not_exists(&self, table_name: &str) -> StoreResult<bool> {
    self.inner.create_table_if_not_exists(table_name).await
  }

  async fn insert_entity(&self, table_name: &str, entity: StoredEntity) -> StoreResult<()> {
    self.inserted.lock().unwrap().push(entity.clone());
    self.inner.insert_entity(table_name, entity).await
  }

  async fn get_entity(&self, table_name: &str, partition_key: &str, row_key: &str) -> StoreResult<Option<StoredEntity>> {
    self.inner.get_entity(table_name, partition_key, row_key).await
  }

  fn kind(&self) -> &'static str {
    "recording"
  }
}

/// Simulates an unreachable store: table creation works, every write fails.
#[derive(Default)]
pub struct UnavailableBackend;

#[async_trait]
impl TableBackend for UnavailableBackend {
  async fn create_table_if_not_exists(&self, _table_name: &str) -> StoreResult<bool> {
    Ok(false)
  }

  async fn insert_entity(&self, _table_name: &str, _entity: StoredEntity) -> StoreResult<()> {
    Err(StoreError::Backend {
      source: anyhow::anyhow!("connection refused"),
    })
  }

  async fn get_entity(&self, _table_name: &str, _pk: &str, _rk: &str) -> StoreResult<Option<StoredEntity>> {
    Err(StoreError::Backend {
      source: anyhow::anyhow!("connection refused"),
    })
  }

  fn kind(&self) -> &'static str {
    "unavailable"
  }
}

pub fn test_config(function_key: Option<&str>) -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    storage_connection_string: "UseDevelopmentStorage=true".to_string(),
    products_table_name: DEFAULT_TABLE_NAME.to_string(),
    function_key: function_key.map(str::to_string),
    max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
  }
}

pub async fn state_with_backend(backend: Arc<dyn TableBackend>, function_key: Option<&str>) -> AppState {
  let service = TableServiceClient::with_backend(backend);
  let products = product_ingest::startup::prepare_products_table(&service, DEFAULT_TABLE_NAME)
    .await
    .unwrap();
  AppState {
    products,
    config: Arc::new(test_config(function_key)),
  }
}

pub async fn recording_state() -> (Arc<RecordingBackend>, AppState) {
  let backend = Arc::new(RecordingBackend::default());
  let state = state_with_backend(backend.clone(), None).await;
  (backend, state)
}

pub fn widget_json() -> serde_json::Value {
  serde_json::json!({
    "PartitionKey": "Toys",
    "RowKey": "1",
    "Name": "Widget",
    "ProductDescription": "A small widget",
    "Price": 12.5,
    "Category": "Toys",
    "ImageUrlPath": "https://images.example.com/widget.png"
  })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tablestore::{MemoryBackend, StoreResult, StoredEntity, TableBackend, TableEntity, TableServiceClient};
use tracing::Level;

// --- Common Entity ---
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestItem {
  pub partition_key: String,
  pub row_key: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<DateTime<Utc>>,
  #[serde(rename = "ETag", default, skip_serializing_if = "Option::is_none")]
  pub etag: Option<String>,
  pub label: String,
  pub quantity: i64,
}

impl TableEntity for TestItem {
  fn partition_key(&self) -> &str {
    &self.partition_key
  }
  fn row_key(&self) -> &str {
    &self.row_key
  }
}

pub fn item(partition_key: &str, row_key: &str, label: &str) -> TestItem {
  TestItem {
    partition_key: partition_key.to_string(),
    row_key: row_key.to_string(),
    label: label.to_string(),
    quantity: 1,
    ..Default::default()
  }
}

/// Wraps a `MemoryBackend` and counts calls so tests can assert on traffic.
#[derive(Default)]
pub struct CountingBackend {
  pub inner: MemoryBackend,
  pub creates: AtomicUsize,
  pub inserts: AtomicUsize,
}

impl CountingBackend {
  pub fn inserts(&self) -> usize {
    self.inserts.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl TableBackend for CountingBackend {
  async fn create_table_if_not_exists(&self, table_name: &str) -> StoreResult<bool> {
    self.creates.fetch_add(1, Ordering::SeqCst);
    self.inner.create_table_if_not_exists(table_name).await
  }

  async fn insert_entity(&self, table_name: &str, entity: StoredEntity) -> StoreResult<()> {
    self.inserts.fetch_add(1, Ordering::SeqCst);
    self.inner.insert_entity(table_name, entity).await
  }

  async fn get_entity(&self, table_name: &str, partition_key: &str, row_key: &str) -> StoreResult<Option<StoredEntity>> {
    self.inner.get_entity(table_name, partition_key, row_key).await
  }

  fn kind(&self) -> &'static str {
    "counting"
  }
}

pub fn counting_service() -> (Arc<CountingBackend>, TableServiceClient) {
  let backend = Arc::new(CountingBackend::default());
  let service = TableServiceClient::with_backend(backend.clone());
  (backend, service)
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

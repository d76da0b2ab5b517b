// tablestore/src/backend/memory.rs
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tracing::{event, instrument, Level};

use super::TableBackend;
use crate::entity::StoredEntity;
use crate::error::{StoreError, StoreResult};

type EntityKey = (String, String);

/// Process-local table store. Used for development (`UseDevelopmentStorage=true`)
/// and in tests.
///
/// Table names compare case-insensitively, like the managed service.
/// The lock is only taken around plain map operations and never held across `.await`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
  tables: RwLock<HashMap<String, BTreeMap<EntityKey, StoredEntity>>>,
}

impl MemoryBackend {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of entities currently held in `table_name`, `None` if the table does not exist.
  pub fn entity_count(&self, table_name: &str) -> Option<usize> {
    self.tables.read().get(&table_name.to_ascii_lowercase()).map(BTreeMap::len)
  }
}

#[async_trait]
impl TableBackend for MemoryBackend {
  #[instrument(name = "MemoryBackend::create_table_if_not_exists", skip(self))]
  async fn create_table_if_not_exists(&self, table_name: &str) -> StoreResult<bool> {
    let mut tables = self.tables.write();
    let key = table_name.to_ascii_lowercase();
    if tables.contains_key(&key) {
      event!(Level::DEBUG, "Table already exists.");
      return Ok(false);
    }
    tables.insert(key, BTreeMap::new());
    event!(Level::INFO, "Table created.");
    Ok(true)
  }

  async fn insert_entity(&self, table_name: &str, entity: StoredEntity) -> StoreResult<()> {
    let mut tables = self.tables.write();
    let table = tables
      .get_mut(&table_name.to_ascii_lowercase())
      .ok_or_else(|| StoreError::TableNotFound {
        table_name: table_name.to_string(),
      })?;

    let key = (entity.partition_key.clone(), entity.row_key.clone());
    if table.contains_key(&key) {
      return Err(StoreError::EntityAlreadyExists {
        table_name: table_name.to_string(),
        partition_key: key.0,
        row_key: key.1,
      });
    }
    table.insert(key, entity);
    Ok(())
  }

  async fn get_entity(
    &self,
    table_name: &str,
    partition_key: &str,
    row_key: &str,
  ) -> StoreResult<Option<StoredEntity>> {
    let tables = self.tables.read();
    let table = tables
      .get(&table_name.to_ascii_lowercase())
      .ok_or_else(|| StoreError::TableNotFound {
        table_name: table_name.to_string(),
      })?;
    Ok(table.get(&(partition_key.to_string(), row_key.to_string())).cloned())
  }

  fn kind(&self) -> &'static str {
    "memory"
  }
}

// tablestore/src/backend/mod.rs

//! The storage seam behind `TableClient`.
//!
//! A backend owns the actual tables. It is shared by every request the
//! process serves, so implementations must be `Send + Sync` and must not
//! hold locks across `.await` points.

use async_trait::async_trait;

use crate::entity::StoredEntity;
use crate::error::StoreResult;

pub mod memory;
pub mod postgres;

pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;

#[async_trait]
pub trait TableBackend: Send + Sync {
  /// Creates the table when missing. Returns `true` if it was created by this call.
  /// Must leave an existing table and its entities untouched.
  async fn create_table_if_not_exists(&self, table_name: &str) -> StoreResult<bool>;

  /// Insert-only write. Fails with `EntityAlreadyExists` when the key pair is taken
  /// and with `TableNotFound` when the table was never created.
  async fn insert_entity(&self, table_name: &str, entity: StoredEntity) -> StoreResult<()>;

  /// Point read by key pair. `Ok(None)` when absent.
  async fn get_entity(&self, table_name: &str, partition_key: &str, row_key: &str)
    -> StoreResult<Option<StoredEntity>>;

  /// Short name used in logs.
  fn kind(&self) -> &'static str;
}

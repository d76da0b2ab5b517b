// tablestore/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Invalid connection string: {message}")]
  InvalidConnectionString { message: String },

  #[error("Invalid table name '{table_name}': {message}")]
  InvalidTableName { table_name: String, message: String },

  #[error("Invalid {key_kind} '{key}': {message}")]
  InvalidKey {
    key_kind: &'static str,
    key: String,
    message: String,
  },

  #[error("Table not found: {table_name}")]
  TableNotFound { table_name: String },

  #[error("Entity already exists in table '{table_name}' (PartitionKey='{partition_key}', RowKey='{row_key}')")]
  EntityAlreadyExists {
    table_name: String,
    partition_key: String,
    row_key: String,
  },

  #[error("Entity not found in table '{table_name}' (PartitionKey='{partition_key}', RowKey='{row_key}')")]
  EntityNotFound {
    table_name: String,
    partition_key: String,
    row_key: String,
  },

  #[error("Entity serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Backend failure. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl StoreError {
  /// True for failures caused by the key pair already being taken.
  pub fn is_conflict(&self) -> bool {
    matches!(self, StoreError::EntityAlreadyExists { .. })
  }
}

impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap an already-typed StoreError instead of nesting it as Backend(Backend(..)).
    match err.downcast::<StoreError>() {
      Ok(store_err) => store_err,
      Err(err) => StoreError::Backend { source: err },
    }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;

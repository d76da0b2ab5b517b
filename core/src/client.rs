// tablestore/src/client.rs

//! Client handles. A `TableServiceClient` is created once per process from the
//! connection string; `TableClient`s are cheap clones bound to one table.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::backend::{MemoryBackend, PostgresBackend, TableBackend};
use crate::connection::ConnectionTarget;
use crate::entity::{validate_key, validate_table_name, EntityResponse, StoredEntity, TableEntity};
use crate::error::{StoreError, StoreResult};

/// Entry point to a table store account.
#[derive(Clone)]
pub struct TableServiceClient {
  backend: Arc<dyn TableBackend>,
}

impl TableServiceClient {
  /// Parses the connection string and opens the matching backend.
  pub async fn from_connection_string(connection_string: &str) -> StoreResult<Self> {
    let backend: Arc<dyn TableBackend> = match ConnectionTarget::parse(connection_string)? {
      ConnectionTarget::Memory => Arc::new(MemoryBackend::new()),
      ConnectionTarget::Postgres { url } => Arc::new(PostgresBackend::connect(&url).await?),
    };
    event!(Level::INFO, backend = backend.kind(), "Table service client created.");
    Ok(Self { backend })
  }

  pub fn with_backend(backend: Arc<dyn TableBackend>) -> Self {
    Self { backend }
  }

  pub fn table_client(&self, table_name: &str) -> StoreResult<TableClient> {
    validate_table_name(table_name)?;
    Ok(TableClient {
      table_name: Arc::from(table_name),
      backend: Arc::clone(&self.backend),
    })
  }

  pub async fn create_table_if_not_exists(&self, table_name: &str) -> StoreResult<TableClient> {
    let client = self.table_client(table_name)?;
    client.create_if_not_exists().await?;
    Ok(client)
  }
}

impl fmt::Debug for TableServiceClient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TableServiceClient")
      .field("backend", &self.backend.kind())
      .finish()
  }
}

/// Handle to a single table. Safe to share across concurrent requests.
#[derive(Clone)]
pub struct TableClient {
  table_name: Arc<str>,
  backend: Arc<dyn TableBackend>,
}

impl TableClient {
  pub fn table_name(&self) -> &str {
    &self.table_name
  }

  /// Idempotent: existing tables and their entities are left as they are.
  #[instrument(name = "TableClient::create_if_not_exists", skip(self), fields(table = %self.table_name), err(Display))]
  pub async fn create_if_not_exists(&self) -> StoreResult<bool> {
    self.backend.create_table_if_not_exists(&self.table_name).await
  }

  /// Inserts a new entity. The store assigns `Timestamp` and `ETag`.
  /// Fails with `StoreError::EntityAlreadyExists` when the key pair is already present.
  #[instrument(
    name = "TableClient::add_entity",
    skip(self, entity),
    fields(
      table = %self.table_name,
      partition_key = %entity.partition_key(),
      row_key = %entity.row_key(),
    ),
    err(Display)
  )]
  pub async fn add_entity<E>(&self, entity: &E) -> StoreResult<EntityResponse>
  where
    E: TableEntity + Serialize + Sync,
  {
    let stored = StoredEntity::from_entity(entity, Utc::now())?;
    let response = EntityResponse {
      timestamp: stored.timestamp,
      etag: stored.etag.clone(),
    };
    self.backend.insert_entity(&self.table_name, stored).await?;
    event!(Level::DEBUG, etag = %response.etag, "Entity inserted.");
    Ok(response)
  }

  /// Reads one entity back, system properties included.
  pub async fn get_entity<E>(&self, partition_key: &str, row_key: &str) -> StoreResult<E>
  where
    E: DeserializeOwned,
  {
    validate_key("PartitionKey", partition_key)?;
    validate_key("RowKey", row_key)?;
    let stored = self
      .backend
      .get_entity(&self.table_name, partition_key, row_key)
      .await?
      .ok_or_else(|| StoreError::EntityNotFound {
        table_name: self.table_name.to_string(),
        partition_key: partition_key.to_string(),
        row_key: row_key.to_string(),
      })?;
    Ok(serde_json::from_value(stored.to_json())?)
  }
}

impl fmt::Debug for TableClient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TableClient")
      .field("table_name", &self.table_name)
      .field("backend", &self.backend.kind())
      .finish()
  }
}

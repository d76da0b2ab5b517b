// tablestore/src/backend/postgres.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{error, event, info, instrument, Level};

use super::TableBackend;
use crate::entity::{ETag, StoredEntity};
use crate::error::{StoreError, StoreResult};

// Every logical table shares one entity relation, keyed by (table_name, partition_key, row_key).
const SCHEMA: &[&str] = &[
  "CREATE TABLE IF NOT EXISTS tablestore_tables (
     table_name TEXT PRIMARY KEY,
     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
   )",
  "CREATE TABLE IF NOT EXISTS tablestore_entities (
     table_name    TEXT NOT NULL REFERENCES tablestore_tables (table_name),
     partition_key TEXT NOT NULL,
     row_key       TEXT NOT NULL,
     timestamp     TIMESTAMPTZ NOT NULL,
     etag          TEXT NOT NULL,
     properties    JSONB NOT NULL,
     PRIMARY KEY (table_name, partition_key, row_key)
   )",
];

#[derive(Debug, FromRow)]
struct EntityRow {
  partition_key: String,
  row_key: String,
  timestamp: DateTime<Utc>,
  etag: String,
  properties: Json<Map<String, Value>>,
}

impl From<EntityRow> for StoredEntity {
  fn from(row: EntityRow) -> Self {
    StoredEntity {
      partition_key: row.partition_key,
      row_key: row.row_key,
      timestamp: row.timestamp,
      etag: ETag::new(row.etag),
      properties: row.properties.0,
    }
  }
}

/// Table store persisted in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PostgresBackend {
  pool: PgPool,
}

impl PostgresBackend {
  /// Connects and makes sure the backing relations exist.
  pub async fn connect(database_url: &str) -> StoreResult<Self> {
    let pool = PgPool::connect(database_url).await.map_err(|e| {
      error!("Failed to connect to the table store database: {}", e);
      StoreError::Database(e)
    })?;
    Self::from_pool(pool).await
  }

  pub async fn from_pool(pool: PgPool) -> StoreResult<Self> {
    for statement in SCHEMA {
      sqlx::query(statement).execute(&pool).await?;
    }
    info!("Table store schema is ready.");
    Ok(Self { pool })
  }
}

#[async_trait]
impl TableBackend for PostgresBackend {
  #[instrument(name = "PostgresBackend::create_table_if_not_exists", skip(self))]
  async fn create_table_if_not_exists(&self, table_name: &str) -> StoreResult<bool> {
    let result = sqlx::query("INSERT INTO tablestore_tables (table_name) VALUES ($1) ON CONFLICT DO NOTHING")
      .bind(table_name.to_ascii_lowercase())
      .execute(&self.pool)
      .await?;
    let created = result.rows_affected() == 1;
    event!(Level::DEBUG, created, "Ensured table exists.");
    Ok(created)
  }

  async fn insert_entity(&self, table_name: &str, entity: StoredEntity) -> StoreResult<()> {
    let outcome = sqlx::query(
      "INSERT INTO tablestore_entities (table_name, partition_key, row_key, timestamp, etag, properties)
       VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(table_name.to_ascii_lowercase())
    .bind(&entity.partition_key)
    .bind(&entity.row_key)
    .bind(entity.timestamp)
    .bind(entity.etag.as_str())
    .bind(Json(&entity.properties))
    .execute(&self.pool)
    .await;

    match outcome {
      Ok(_) => Ok(()),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(StoreError::EntityAlreadyExists {
        table_name: table_name.to_string(),
        partition_key: entity.partition_key,
        row_key: entity.row_key,
      }),
      Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => Err(StoreError::TableNotFound {
        table_name: table_name.to_string(),
      }),
      Err(e) => Err(StoreError::Database(e)),
    }
  }

  async fn get_entity(
    &self,
    table_name: &str,
    partition_key: &str,
    row_key: &str,
  ) -> StoreResult<Option<StoredEntity>> {
    let table_exists: bool =
      sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tablestore_tables WHERE table_name = $1)")
        .bind(table_name.to_ascii_lowercase())
        .fetch_one(&self.pool)
        .await?;
    if !table_exists {
      return Err(StoreError::TableNotFound {
        table_name: table_name.to_string(),
      });
    }

    let row: Option<EntityRow> = sqlx::query_as(
      "SELECT partition_key, row_key, timestamp, etag, properties FROM tablestore_entities
       WHERE table_name = $1 AND partition_key = $2 AND row_key = $3",
    )
    .bind(table_name.to_ascii_lowercase())
    .bind(partition_key)
    .bind(row_key)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(StoredEntity::from))
  }

  fn kind(&self) -> &'static str {
    "postgres"
  }
}

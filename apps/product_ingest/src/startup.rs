// apps/product_ingest/src/startup.rs

//! One-time process initialization of the shared table handle.

use tablestore::{TableClient, TableServiceClient};
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::errors::Result as AppResult;

/// Opens the store named by the connection string and makes sure the products table exists.
/// Any failure here is fatal for the process.
pub async fn connect_products_table(config: &AppConfig) -> AppResult<TableClient> {
  let service = TableServiceClient::from_connection_string(&config.storage_connection_string).await?;
  prepare_products_table(&service, &config.products_table_name).await
}

/// Safe to call on every start: an existing table and its rows are left alone.
#[instrument(name = "startup::prepare_products_table", skip(service))]
pub async fn prepare_products_table(service: &TableServiceClient, table_name: &str) -> AppResult<TableClient> {
  let table = service.table_client(table_name)?;
  let created = table.create_if_not_exists().await?;
  if created {
    info!("Created table '{}'.", table_name);
  } else {
    info!("Table '{}' already exists.", table_name);
  }
  Ok(table)
}

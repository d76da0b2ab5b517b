// apps/product_ingest/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;
use std::fmt;

pub const DEFAULT_TABLE_NAME: &str = "Products";
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub storage_connection_string: String,
  pub products_table_name: String,

  // When set, POST /api/products requires this key (header or `code` query).
  pub function_key: Option<String>,

  pub max_payload_bytes: usize,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "7071".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    // The functions host exposes its storage account as AzureWebJobsStorage; accept it as a fallback.
    let storage_connection_string = get_env("TABLE_STORAGE_CONNECTION_STRING")
      .or_else(|_| get_env("AzureWebJobsStorage"))
      .map_err(|_| {
        AppError::Config(
          "Missing environment variable 'TABLE_STORAGE_CONNECTION_STRING' (or 'AzureWebJobsStorage')".to_string(),
        )
      })?;
    if storage_connection_string.trim().is_empty() {
      return Err(AppError::Config("Storage connection string is empty".to_string()));
    }

    let products_table_name = get_env("PRODUCTS_TABLE_NAME").unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string());
    let function_key = get_env("FUNCTION_KEY").ok().filter(|k| !k.is_empty());
    let max_payload_bytes = get_env("MAX_PAYLOAD_BYTES")
      .unwrap_or_else(|_| DEFAULT_MAX_PAYLOAD_BYTES.to_string())
      .parse::<usize>()
      .map_err(|e| AppError::Config(format!("Invalid MAX_PAYLOAD_BYTES: {}", e)))?;

    let config = Self {
      server_host,
      server_port,
      storage_connection_string,
      products_table_name,
      function_key,
      max_payload_bytes,
    };
    tracing::info!("Application configuration loaded successfully.");
    tracing::debug!(config = ?config, "Loaded config details");
    Ok(config)
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

// Secrets stay out of Debug output.
impl fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("storage_connection_string", &"[REDACTED]")
      .field("products_table_name", &self.products_table_name)
      .field("function_key", &self.function_key.as_ref().map(|_| "[REDACTED]"))
      .field("max_payload_bytes", &self.max_payload_bytes)
      .finish()
  }
}

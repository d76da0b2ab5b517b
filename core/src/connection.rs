// tablestore/src/connection.rs

//! Parsing of the single connection string a process is configured with.

use crate::error::{StoreError, StoreResult};

/// Where a connection string points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
  /// Process-local tables (`UseDevelopmentStorage=true` or `memory:`).
  Memory,
  /// A PostgreSQL database URL.
  Postgres { url: String },
}

impl ConnectionTarget {
  pub fn parse(connection_string: &str) -> StoreResult<Self> {
    let trimmed = connection_string.trim();
    if trimmed.is_empty() {
      return Err(StoreError::InvalidConnectionString {
        message: "connection string is empty".to_string(),
      });
    }

    if trimmed.starts_with("postgres://") || trimmed.starts_with("postgresql://") {
      return Ok(ConnectionTarget::Postgres { url: trimmed.to_string() });
    }
    if trimmed.eq_ignore_ascii_case("memory:") {
      return Ok(ConnectionTarget::Memory);
    }

    // `Key=Value;Key=Value` form; only the development-storage switch is understood.
    let mut use_dev_storage = false;
    for segment in trimmed.split(';').map(str::trim).filter(|s| !s.is_empty()) {
      let (key, value) = segment.split_once('=').ok_or_else(|| StoreError::InvalidConnectionString {
        message: format!("segment '{}' is not a Key=Value pair", segment),
      })?;
      if key.trim().eq_ignore_ascii_case("UseDevelopmentStorage") {
        use_dev_storage = value.trim().eq_ignore_ascii_case("true");
      }
    }

    if use_dev_storage {
      Ok(ConnectionTarget::Memory)
    } else {
      Err(StoreError::InvalidConnectionString {
        message: "expected 'UseDevelopmentStorage=true', 'memory:' or a postgres:// URL".to_string(),
      })
    }
  }
}

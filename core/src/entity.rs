// tablestore/src/entity.rs

//! Entity model shared by the client and every backend.
//!
//! A table entity is addressed by `(PartitionKey, RowKey)` and carries a flat
//! bag of scalar properties. `Timestamp` and `ETag` are system properties: the
//! backend assigns them on every write and callers cannot set them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{StoreError, StoreResult};

pub const PARTITION_KEY: &str = "PartitionKey";
pub const ROW_KEY: &str = "RowKey";
pub const TIMESTAMP: &str = "Timestamp";
pub const ETAG: &str = "ETag";

const MAX_KEY_BYTES: usize = 1024;

/// Implemented by any record that can be written through a `TableClient`.
pub trait TableEntity {
  fn partition_key(&self) -> &str;
  fn row_key(&self) -> &str;
}

/// Opaque version token assigned by the store on each write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ETag(String);

impl ETag {
  pub fn new(value: impl Into<String>) -> Self {
    ETag(value.into())
  }

  /// Weak datetime tag in the shape managed table services hand out.
  pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
    let encoded = ts.to_rfc3339_opts(SecondsFormat::Nanos, true).replace(':', "%3A");
    ETag(format!("W/\"datetime'{}'\"", encoded))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ETag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Backend-neutral form of an entity: keys and system properties split out,
/// everything else kept as scalar JSON values.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntity {
  pub partition_key: String,
  pub row_key: String,
  pub timestamp: DateTime<Utc>,
  pub etag: ETag,
  pub properties: Map<String, Value>,
}

impl StoredEntity {
  /// Builds the property bag from a serializable entity. The store stamps
  /// `Timestamp` and `ETag`; whatever the caller put there is dropped.
  pub fn from_entity<E>(entity: &E, now: DateTime<Utc>) -> StoreResult<Self>
  where
    E: TableEntity + Serialize,
  {
    let partition_key = entity.partition_key().to_string();
    let row_key = entity.row_key().to_string();
    validate_key("PartitionKey", &partition_key)?;
    validate_key("RowKey", &row_key)?;

    let mut properties = match serde_json::to_value(entity)? {
      Value::Object(map) => map,
      other => {
        return Err(anyhow::anyhow!("entity must serialize to a JSON object, got {}", json_kind(&other)).into());
      }
    };

    for system in [PARTITION_KEY, ROW_KEY, TIMESTAMP, ETAG] {
      properties.remove(system);
    }
    properties.retain(|_, v| !v.is_null());

    if let Some((name, value)) = properties.iter().find(|(_, v)| v.is_object() || v.is_array()) {
      return Err(StoreError::Serialization(serde::ser::Error::custom(format!(
        "property '{}' is {}; only scalar properties can be stored",
        name,
        json_kind(value)
      ))));
    }

    Ok(StoredEntity {
      partition_key,
      row_key,
      timestamp: now,
      etag: ETag::from_timestamp(now),
      properties,
    })
  }

  /// Flattens back into a single JSON object with the system properties included.
  pub fn to_json(&self) -> Value {
    let mut map = self.properties.clone();
    map.insert(PARTITION_KEY.to_string(), Value::String(self.partition_key.clone()));
    map.insert(ROW_KEY.to_string(), Value::String(self.row_key.clone()));
    map.insert(
      TIMESTAMP.to_string(),
      Value::String(self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)),
    );
    map.insert(ETAG.to_string(), Value::String(self.etag.as_str().to_string()));
    Value::Object(map)
  }
}

/// What a successful insert reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityResponse {
  pub timestamp: DateTime<Utc>,
  pub etag: ETag,
}

pub fn validate_key(key_kind: &'static str, key: &str) -> StoreResult<()> {
  let invalid = |message: String| StoreError::InvalidKey {
    key_kind,
    key: key.to_string(),
    message,
  };

  if key.len() > MAX_KEY_BYTES {
    return Err(invalid(format!("longer than {} bytes", MAX_KEY_BYTES)));
  }
  if let Some(c) = key.chars().find(|c| matches!(c, '/' | '\\' | '#' | '?') || c.is_control()) {
    return Err(invalid(format!("contains disallowed character {:?}", c)));
  }
  Ok(())
}

pub fn validate_table_name(table_name: &str) -> StoreResult<()> {
  let invalid = |message: &str| StoreError::InvalidTableName {
    table_name: table_name.to_string(),
    message: message.to_string(),
  };

  if !(3..=63).contains(&table_name.len()) {
    return Err(invalid("must be 3 to 63 characters long"));
  }
  if !table_name.starts_with(|c: char| c.is_ascii_alphabetic()) {
    return Err(invalid("must start with a letter"));
  }
  if !table_name.chars().all(|c| c.is_ascii_alphanumeric()) {
    return Err(invalid("may only contain ASCII letters and digits"));
  }
  Ok(())
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a bool",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

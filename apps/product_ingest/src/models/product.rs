// apps/product_ingest/src/models/product.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tablestore::TableEntity;

/// A product as posted by callers and stored in the products table.
///
/// Field names on the wire are PascalCase. `PartitionKey`, `RowKey` and `Name`
/// are required; the remaining product fields default when missing and unknown
/// fields are ignored. `Timestamp` and `ETag` accept any JSON value and are never
/// written: the store assigns its own, which show up here on read-back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
  pub partition_key: String, // Groups products, e.g. by category
  pub row_key: String,       // Unique within the partition

  #[serde(default, skip_serializing)]
  pub timestamp: Option<Value>,
  #[serde(rename = "ETag", default, skip_serializing)]
  pub etag: Option<Value>,

  pub name: String,
  #[serde(default)]
  pub product_description: String,
  #[serde(default)]
  pub price: f64,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub image_url_path: String, // Where the product image lives in blob storage
}

impl TableEntity for Product {
  fn partition_key(&self) -> &str {
    &self.partition_key
  }

  fn row_key(&self) -> &str {
    &self.row_key
  }
}

/// Decodes a request body into a `Product`.
///
/// An empty body, a literal `null`, malformed JSON and a body missing required
/// fields all come back as `None`; callers treat them the same way.
pub fn decode_product(body: &[u8]) -> Option<Product> {
  match serde_json::from_slice::<Option<Product>>(body) {
    Ok(product) => product,
    Err(e) => {
      tracing::debug!(error = %e, "Request body did not decode into a product.");
      None
    }
  }
}

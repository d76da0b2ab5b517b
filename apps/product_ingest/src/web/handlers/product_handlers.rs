// apps/product_ingest/src/web/handlers/product_handlers.rs

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use tracing::{error, info, instrument, warn};

use crate::errors::AppError;
use crate::models::product::{decode_product, Product};
use crate::state::AppState;
use crate::web::auth::FunctionKey;

pub const INVALID_PRODUCT_MESSAGE: &str = "Invalid product data.";

pub fn success_message(product: &Product) -> String {
  format!("Product {} added successfully.", product.name)
}

/// Stores one posted product.
///
/// The body is read raw so no content type is required. Anything that does not
/// decode into a product gets a 400; a store failure is passed through as an
/// opaque 500 with no retry.
#[instrument(name = "handler::create_product", skip_all, fields(body_len = body.len()))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  _key: FunctionKey,
  body: web::Bytes,
) -> Result<HttpResponse, AppError> {
  info!("Processing a request for a product.");

  let product = match decode_product(&body) {
    Some(product) => product,
    None => {
      warn!("Rejected request: body is not a valid product.");
      return Err(AppError::Validation(INVALID_PRODUCT_MESSAGE.to_string()));
    }
  };

  let response = app_state.products.add_entity(&product).await.map_err(|e| {
    error!(
      "Failed to add product (PartitionKey='{}', RowKey='{}'): {}",
      product.partition_key, product.row_key, e
    );
    AppError::Storage(e)
  })?;

  info!(
    partition_key = %product.partition_key,
    row_key = %product.row_key,
    etag = %response.etag,
    "Product stored."
  );

  Ok(
    HttpResponse::Ok()
      .content_type(ContentType::plaintext())
      .body(success_message(&product)),
  )
}

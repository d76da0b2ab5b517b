// apps/product_ingest/src/errors.rs

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tablestore::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  Validation(String),

  #[error("Unauthorized.")]
  Unauthorized,

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Table Store Error: {0}")]
  Storage(#[from] StoreError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Unauthorized => StatusCode::UNAUTHORIZED,
      AppError::Config(_) | AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    match self {
      // Client errors carry their message verbatim as plain text.
      AppError::Validation(m) => {
        tracing::warn!(application_error = %self, "Responding with validation error");
        HttpResponse::BadRequest().content_type(ContentType::plaintext()).body(m.clone())
      }
      AppError::Unauthorized => {
        tracing::warn!("Responding with unauthorized");
        HttpResponse::Unauthorized()
          .content_type(ContentType::plaintext())
          .body(self.to_string())
      }
      // Server-side failures are opaque to the caller; the detail only goes to the log.
      AppError::Storage(source) => {
        tracing::error!(application_error = %self, conflict = source.is_conflict(), "Responding with error");
        HttpResponse::InternalServerError().finish()
      }
      AppError::Config(_) | AppError::Internal(_) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().finish()
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

// apps/product_ingest/src/web/auth.rs

//! Function-level access keys.
//!
//! When `FUNCTION_KEY` is configured, callers must present it either in the
//! `x-functions-key` header or as the `code` query parameter. Without a
//! configured key every caller is let through.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::errors::AppError;
use crate::state::AppState;

pub const FUNCTION_KEY_HEADER: &str = "x-functions-key";
const FUNCTION_KEY_QUERY: &str = "code";

/// Extractor that succeeds only for callers holding the configured function key.
#[derive(Debug, Clone, Copy)]
pub struct FunctionKey;

fn presented_key(req: &HttpRequest) -> Option<String> {
  if let Some(value) = req.headers().get(FUNCTION_KEY_HEADER).and_then(|v| v.to_str().ok()) {
    return Some(value.to_string());
  }
  web::Query::<Vec<(String, String)>>::from_query(req.query_string())
    .ok()
    .and_then(|q| q.into_inner().into_iter().find(|(k, _)| k == FUNCTION_KEY_QUERY))
    .map(|(_, v)| v)
}

// Runtime depends only on the lengths, never on where the first mismatch sits.
fn keys_match(presented: &str, expected: &str) -> bool {
  let (presented, expected) = (presented.as_bytes(), expected.as_bytes());
  let diff = presented
    .iter()
    .zip(expected)
    .fold(presented.len() ^ expected.len(), |acc, (a, b)| acc | usize::from(a ^ b));
  diff == 0
}

fn authorize(req: &HttpRequest) -> Result<FunctionKey, AppError> {
  let expected = match req.app_data::<web::Data<AppState>>() {
    Some(state) => state.config.function_key.clone(),
    None => return Err(AppError::Internal("AppState is not registered".to_string())),
  };

  match (expected, presented_key(req)) {
    (None, _) => Ok(FunctionKey),
    (Some(expected), Some(presented)) if keys_match(&presented, &expected) => Ok(FunctionKey),
    (Some(_), presented) => {
      tracing::warn!(key_present = presented.is_some(), "Rejected request without a valid function key.");
      Err(AppError::Unauthorized)
    }
  }
}

impl FromRequest for FunctionKey {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(authorize(req))
  }
}

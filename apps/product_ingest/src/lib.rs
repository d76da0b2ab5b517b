// apps/product_ingest/src/lib.rs

//! HTTP ingest of product records into a table store.
//!
//! `POST /api/products` takes a JSON product, inserts it into the products
//! table and answers in plain text. The binary in `main.rs` wires these
//! modules into an actix-web server.

pub mod config;
pub mod errors;
pub mod models;
pub mod startup;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;

// apps/product_ingest/src/models/mod.rs

//! Records exchanged over HTTP and persisted in the table store.

pub mod product;

pub use product::{decode_product, Product};

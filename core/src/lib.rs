// src/lib.rs

//! tablestore: a small async client for table-style key-value storage.
//!
//! Entities live in named tables and are addressed by a two-part key
//! (`PartitionKey`, `RowKey`). The client offers:
//!  - `TableServiceClient`, created once per process from a connection string.
//!  - `TableClient`, a cheap, shareable handle bound to one table.
//!  - Idempotent table creation and insert-only entity writes with the usual
//!    table-store conflict semantics.
//!  - Pluggable backends behind the `TableBackend` trait (in-memory, PostgreSQL).

pub mod backend;
pub mod client;
pub mod connection;
pub mod entity;
pub mod error;

// --- Re-exports for the Public API ---

pub use crate::backend::{MemoryBackend, PostgresBackend, TableBackend};
pub use crate::client::{TableClient, TableServiceClient};
pub use crate::connection::ConnectionTarget;
pub use crate::entity::{EntityResponse, ETag, StoredEntity, TableEntity};
pub use crate::error::{StoreError, StoreResult};

/*
    Typical use:
    1. `TableServiceClient::from_connection_string(&conn).await?` at startup.
    2. `service.create_table_if_not_exists("Products").await?` to get a `TableClient`.
    3. Share the `TableClient` (it is `Clone`) with every request handler.
    4. `table.add_entity(&record).await?` per request; a taken key pair fails with
       `StoreError::EntityAlreadyExists`.
*/

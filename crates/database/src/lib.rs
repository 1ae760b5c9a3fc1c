//! Shelfsync persisted library store
//!
//! SQLite via sqlx. The store is the long-lived side of reconciliation: it is
//! read as a snapshot before inactive detection and written only after
//! operator approval. Batch removal is atomic per batch.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::{connect, connect_in_memory, DatabaseConfig, DbPool};
pub use migrations::{current_version, run_migrations};

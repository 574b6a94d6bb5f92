//! Storage layer for visioncare.
//!
//! This module provides persistence for the session snapshot:
//! - `SQLite` key/value store (one row per logical field)
//! - In-memory store for tests and degraded operation

mod database;
mod migrations;
mod store;

pub use database::Database;
pub use store::{MemoryStore, PersistenceStore, SqliteStore};

#[cfg(test)]
pub use store::MockPersistenceStore;

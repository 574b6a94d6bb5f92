//! Key/value persistence for the session snapshot.
//!
//! The session manager only needs "load a field at startup, write fields
//! after each mutation". Each snapshot field is stored under its own key
//! as a JSON string.

use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::VisionError;

/// A key/value store holding serialized snapshot fields.
#[cfg_attr(test, mockall::automock)]
pub trait PersistenceStore {
    /// Load the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, VisionError>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), VisionError>;

    /// Store several entries at once.
    ///
    /// The default implementation saves entries one at a time.
    fn save_all(&mut self, entries: &[(&'static str, String)]) -> Result<(), VisionError> {
        for (key, value) in entries {
            self.save(key, value)?;
        }
        Ok(())
    }
}

/// Store backed by the `kv_store` table.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open the store at a database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(path: &std::path::Path) -> Result<Self, VisionError> {
        Ok(Self {
            db: Database::open_at(path)?,
        })
    }

    /// Create a store with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }
}

impl PersistenceStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<String>, VisionError> {
        self.db
            .connection()
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| VisionError::Database(format!("Failed to load {key}: {e}")))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), VisionError> {
        self.db
            .connection()
            .execute(
                r"INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| VisionError::Database(format!("Failed to save {key}: {e}")))?;

        Ok(())
    }

    fn save_all(&mut self, entries: &[(&'static str, String)]) -> Result<(), VisionError> {
        let now = Utc::now().to_rfc3339();
        let tx = self
            .db
            .connection_mut()
            .transaction()
            .map_err(|e| VisionError::Database(format!("Failed to begin transaction: {e}")))?;

        for (key, value) in entries {
            tx.execute(
                r"INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .map_err(|e| VisionError::Database(format!("Failed to save {key}: {e}")))?;
        }

        tx.commit()
            .map_err(|e| VisionError::Database(format!("Failed to commit snapshot: {e}")))
    }
}

/// Store that keeps everything in a map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, VisionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), VisionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteStore {
        SqliteStore::with_database(Database::open_in_memory().unwrap())
    }

    fn row_count(store: &SqliteStore) -> i64 {
        store
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_sqlite_save_and_load() {
        let mut store = create_test_store();

        assert!(store.load("screen_time").unwrap().is_none());

        store.save("screen_time", r#"{"daily_minutes":3.0}"#).unwrap();
        assert_eq!(
            store.load("screen_time").unwrap().as_deref(),
            Some(r#"{"daily_minutes":3.0}"#)
        );

        // Overwrite keeps a single row
        store.save("screen_time", "{}").unwrap();
        assert_eq!(store.load("screen_time").unwrap().as_deref(), Some("{}"));
        assert_eq!(row_count(&store), 1);
    }

    #[test]
    fn test_sqlite_save_all() {
        let mut store = create_test_store();

        store
            .save_all(&[
                ("is_tracking", "true".to_string()),
                ("is_on_break", "false".to_string()),
            ])
            .unwrap();

        assert_eq!(store.load("is_tracking").unwrap().as_deref(), Some("true"));
        assert_eq!(store.load("is_on_break").unwrap().as_deref(), Some("false"));
        assert_eq!(row_count(&store), 2);
    }

    #[test]
    fn test_sqlite_persists_across_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("store.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.save("next_checkup_date", "\"2026-11-02\"").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.load("next_checkup_date").unwrap().as_deref(),
            Some("\"2026-11-02\"")
        );
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load("a").unwrap().is_none());

        store.save("a", "1").unwrap();
        store.save_all(&[("b", "2".to_string())]).unwrap();

        assert_eq!(store.load("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.load("b").unwrap().as_deref(), Some("2"));
        assert!(store.load("missing").unwrap().is_none());
    }
}

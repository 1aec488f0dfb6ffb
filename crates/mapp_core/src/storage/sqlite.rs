//! SQLite-backed `StateStorage`.
//!
//! # Invariants
//! - Wraps a connection migrated to the latest container schema.
//! - One row per storage key in `kv_store`.

use super::{StateStorage, StorageError, StorageResult};
use crate::db::migrations::latest_version;
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value storage over one owned SQLite connection.
pub struct SqliteStateStorage {
    conn: Connection,
}

impl SqliteStateStorage {
    /// Opens (or creates) the database file and migrates it.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a migrated in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Wraps an already migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl StateStorage for SqliteStateStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value
                 FROM kv_store
                 WHERE storage_key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (storage_key, value)
             VALUES (?1, ?2)
             ON CONFLICT(storage_key) DO UPDATE
             SET value = excluded.value,
                 updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE storage_key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteStateStorage;
    use crate::storage::{StateStorage, StorageError};
    use rusqlite::Connection;

    #[test]
    fn set_get_remove_cycle() {
        let storage = SqliteStateStorage::open_in_memory().unwrap();
        assert_eq!(storage.get_item("blob").unwrap(), None);

        storage.set_item("blob", "{\"a\":1}").unwrap();
        storage.set_item("blob", "{\"a\":2}").unwrap();
        assert_eq!(
            storage.get_item("blob").unwrap().as_deref(),
            Some("{\"a\":2}")
        );

        let rows: i64 = storage
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);

        storage.remove_item("blob").unwrap();
        assert_eq!(storage.get_item("blob").unwrap(), None);
    }

    #[test]
    fn rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteStateStorage::try_new(conn).err().unwrap();
        assert!(matches!(
            err,
            StorageError::UninitializedConnection {
                actual_version: 0,
                ..
            }
        ));
    }
}

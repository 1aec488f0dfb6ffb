//! Local key-value storage for the persisted state blob.
//!
//! # Responsibility
//! - Define a browser-local-storage shaped contract (`get/set/remove`).
//! - Keep SQLite details behind the `StateStorage` boundary.
//!
//! # Invariants
//! - Values are opaque UTF-8 strings; the store owns their encoding.
//! - `set_item` replaces any previous value under the same key.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStateStorage;
pub use sqlite::SqliteStateStorage;

/// Result type used by storage backends.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from storage backends and blob encoding.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Stored blob cannot be decoded into application state.
    MalformedState(serde_json::Error),
    /// Application state cannot be encoded.
    Encode(serde_json::Error),
    /// In-memory backend lock was poisoned by a panicking writer.
    Poisoned,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "state storage requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MalformedState(err) => write!(f, "malformed persisted state: {err}"),
            Self::Encode(err) => write!(f, "failed to encode state: {err}"),
            Self::Poisoned => write!(f, "state storage lock poisoned"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MalformedState(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::Poisoned => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value storage for serialized state.
pub trait StateStorage {
    /// Loads the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

//! Hierarchical note store.
//!
//! # Responsibility
//! - Own the theme/category/note collections and selection pointers.
//! - Enforce referential integrity: validated foreign keys on write,
//!   cascading deletes, selection clearing.
//! - Write the full state through to `StateStorage` after every change.
//!
//! # Invariants
//! - Every category references an existing theme.
//! - Every note references an existing category or `inbox`.
//! - Selection pointers never reference deleted entities.
//! - Operations on unknown ids change nothing and report `Outcome::NotFound`.

use crate::model::{CategoryId, ThemeId};
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod clock;
mod note_store;
pub mod ordering;
pub mod state;

pub use clock::{Clock, SystemClock};
pub use note_store::{NoteStore, SubscriptionId};
pub use state::AppState;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "mapp-mental-storage";

/// Result type used by store operations that can reject input.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result of a mutation addressed at one entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The entity existed and the change was applied.
    Applied,
    /// No entity with that id; state is unchanged.
    NotFound,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Rejections raised by store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Referenced theme does not exist.
    ThemeNotFound(ThemeId),
    /// Referenced category does not exist.
    CategoryNotFound(CategoryId),
    /// Reorder index is outside the theme list.
    IndexOutOfRange { index: usize, len: usize },
    /// Reorder input is not a permutation of the current theme ids.
    NotAPermutation,
    /// Storage backend or blob decoding failure.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ThemeNotFound(id) => write!(f, "theme not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "theme index {index} out of range for {len} theme(s)")
            }
            Self::NotAPermutation => {
                write!(f, "theme order must list every current theme exactly once")
            }
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Store construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key of the persisted blob in `StateStorage`.
    pub storage_key: String,
}

impl StoreConfig {
    pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::with_storage_key(DEFAULT_STORAGE_KEY)
    }
}

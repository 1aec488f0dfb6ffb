//! Process-local storage backend.
//!
//! Clones share one map, so a test can hand one clone to a store and inspect
//! or reopen through another.

use super::{StateStorage, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory `StateStorage` with shared, cloneable handles.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStorage {
    items: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStateStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.items.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl StateStorage for MemoryStateStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

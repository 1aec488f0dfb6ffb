//! Note record.
//!
//! # Invariants
//! - `created_at` is set once at creation.
//! - `updated_at >= created_at`, refreshed on title/content/category changes.

use crate::model::category::CategoryRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one note.
pub type NoteId = Uuid;

/// Leaf record edited in the rich-text editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Rich-text markup produced by the editor.
    pub content: String,
    pub category_id: CategoryRef,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Note {
    /// Creates an empty note with `created_at == updated_at == now_ms`.
    pub fn new(category_id: CategoryRef, title: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: String::new(),
            category_id,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Bumps `updated_at`, keeping it strictly increasing for this note.
    pub(crate) fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms.max(self.updated_at + 1);
    }
}

//! Application state snapshot and its persisted shape.

use crate::model::{Category, CategoryId, CategoryRef, Note, NoteId, Theme, ThemeId};
use serde::{Deserialize, Serialize};

/// Full store content: three collections plus selection pointers.
///
/// This is also the persisted blob layout (camelCase JSON, no version field).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Themes in sidebar sequence.
    #[serde(default)]
    pub themes: Vec<Theme>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub selected_note_id: Option<NoteId>,
    #[serde(default)]
    pub selected_theme_id: Option<ThemeId>,
    #[serde(default)]
    pub selected_category_id: Option<CategoryId>,
}

impl AppState {
    pub(crate) fn theme(&self, id: ThemeId) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.id == id)
    }

    pub(crate) fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub(crate) fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Whether a note may point at `target`.
    pub(crate) fn accepts_note_parent(&self, target: CategoryRef) -> bool {
        match target {
            CategoryRef::Inbox => true,
            CategoryRef::Category(id) => self.category(id).is_some(),
        }
    }
}

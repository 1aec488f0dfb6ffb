//! Sidebar tree, breadcrumb and active-note lookups.

use crate::model::{Category, CategoryRef, Note, NoteId, Theme, ThemeId};
use crate::store::AppState;

/// Themes in sidebar order with their nested categories and notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarTree<'a> {
    pub themes: Vec<ThemeNode<'a>>,
    /// Loose notes held by the inbox sentinel.
    pub inbox: Vec<&'a Note>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeNode<'a> {
    pub theme: &'a Theme,
    pub categories: Vec<CategoryNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode<'a> {
    pub category: &'a Category,
    pub notes: Vec<&'a Note>,
}

/// Location of a note for the editor header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb<'a> {
    pub theme: Option<&'a Theme>,
    pub category: Option<&'a Category>,
    pub note: &'a Note,
}

/// Builds the sidebar tree. Themes follow `order`, ties keep stored sequence.
pub fn sidebar_tree(state: &AppState) -> SidebarTree<'_> {
    SidebarTree {
        themes: themes_in_order(state)
            .into_iter()
            .map(|theme| ThemeNode {
                theme,
                categories: categories_of(state, theme.id)
                    .into_iter()
                    .map(|category| CategoryNode {
                        category,
                        notes: notes_in(state, CategoryRef::Category(category.id)),
                    })
                    .collect(),
            })
            .collect(),
        inbox: state
            .notes
            .iter()
            .filter(|note| note.category_id.is_inbox())
            .collect(),
    }
}

/// Themes sorted by `order`; ties keep stored sequence.
pub fn themes_in_order(state: &AppState) -> Vec<&Theme> {
    let mut themes: Vec<&Theme> = state.themes.iter().collect();
    themes.sort_by_key(|theme| theme.order);
    themes
}

/// Categories owned by `theme_id`, in insertion order.
pub fn categories_of(state: &AppState, theme_id: ThemeId) -> Vec<&Category> {
    state
        .categories
        .iter()
        .filter(|category| category.theme_id == theme_id)
        .collect()
}

/// Notes held by `parent`, in insertion order.
pub fn notes_in(state: &AppState, parent: CategoryRef) -> Vec<&Note> {
    state
        .notes
        .iter()
        .filter(|note| note.category_id == parent)
        .collect()
}

/// Resolves a note together with its category and theme.
pub fn breadcrumb(state: &AppState, note_id: NoteId) -> Option<Breadcrumb<'_>> {
    let note = state.note(note_id)?;
    let category = note
        .category_id
        .category_id()
        .and_then(|category_id| state.category(category_id));
    let theme = category.and_then(|category| state.theme(category.theme_id));
    Some(Breadcrumb {
        theme,
        category,
        note,
    })
}

/// Returns the note currently open in the editor.
pub fn selected_note(state: &AppState) -> Option<&Note> {
    state.selected_note_id.and_then(|id| state.note(id))
}

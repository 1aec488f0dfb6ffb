//! Dashboard projections: counters, recent notes and theme distribution.

use crate::model::{Note, Theme};
use crate::store::AppState;
use crate::view::preview::derive_content_preview;
use crate::view::sidebar::themes_in_order;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Default size of the recent-notes panel.
pub const RECENT_NOTES_LIMIT: usize = 5;
/// Label shown for notes without a category.
pub const LOOSE_NOTES_LABEL: &str = "Sueltas";
/// Label shown for notes with a blank title.
pub const UNTITLED_NOTE_LABEL: &str = "Sin título";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub themes: usize,
    pub categories: usize,
    pub notes: usize,
    pub favorites: usize,
}

/// One row of the recent-notes panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentNote<'a> {
    pub note: &'a Note,
    pub display_title: &'a str,
    pub category_label: &'a str,
    pub preview: Option<String>,
}

/// Share of all notes that live under one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeShare<'a> {
    pub theme: &'a Theme,
    pub note_count: usize,
    /// 0..=100; 0 when there are no notes at all.
    pub percentage: f64,
}

pub fn dashboard_stats(state: &AppState) -> DashboardStats {
    DashboardStats {
        themes: state.themes.len(),
        categories: state.categories.len(),
        notes: state.notes.len(),
        favorites: state.themes.iter().filter(|theme| theme.is_favorite).count(),
    }
}

/// Most recently updated notes first; ties by id for a stable order.
pub fn recent_notes(state: &AppState, limit: usize) -> Vec<RecentNote<'_>> {
    let mut notes: Vec<&Note> = state.notes.iter().collect();
    notes.sort_by_key(|note| (Reverse(note.updated_at), note.id));
    notes
        .into_iter()
        .take(limit)
        .map(|note| RecentNote {
            note,
            display_title: if note.title.trim().is_empty() {
                UNTITLED_NOTE_LABEL
            } else {
                note.title.as_str()
            },
            category_label: category_label(state, note),
            preview: derive_content_preview(&note.content),
        })
        .collect()
}

/// Note count and percentage per theme, in sidebar order.
pub fn theme_distribution(state: &AppState) -> Vec<ThemeShare<'_>> {
    let total = state.notes.len();
    themes_in_order(state)
        .into_iter()
        .map(|theme| {
            let owned: HashSet<_> = state
                .categories
                .iter()
                .filter(|category| category.theme_id == theme.id)
                .map(|category| category.id)
                .collect();
            let note_count = state
                .notes
                .iter()
                .filter(|note| {
                    note.category_id
                        .category_id()
                        .is_some_and(|category_id| owned.contains(&category_id))
                })
                .count();
            let percentage = if total == 0 {
                0.0
            } else {
                note_count as f64 * 100.0 / total as f64
            };
            ThemeShare {
                theme,
                note_count,
                percentage,
            }
        })
        .collect()
}

/// Category name of `note`, or the loose-notes label.
pub fn category_label<'a>(state: &'a AppState, note: &Note) -> &'a str {
    note.category_id
        .category_id()
        .and_then(|category_id| state.category(category_id))
        .map_or(LOOSE_NOTES_LABEL, |category| category.name.as_str())
}

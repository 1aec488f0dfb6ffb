//! Read-only projections for the presentation layer.
//!
//! # Responsibility
//! - Join the raw store collections into sidebar, editor and dashboard shapes.
//! - Never mutate state; every function borrows an `AppState` snapshot.

pub mod dashboard;
pub mod preview;
pub mod sidebar;

pub use dashboard::{
    category_label, dashboard_stats, recent_notes, theme_distribution, DashboardStats,
    RecentNote, ThemeShare, LOOSE_NOTES_LABEL, RECENT_NOTES_LIMIT, UNTITLED_NOTE_LABEL,
};
pub use preview::derive_content_preview;
pub use sidebar::{
    breadcrumb, categories_of, notes_in, selected_note, sidebar_tree, themes_in_order, Breadcrumb,
    CategoryNode, SidebarTree, ThemeNode,
};

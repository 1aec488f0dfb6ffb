//! Domain model for the theme → category → note hierarchy.
//!
//! # Responsibility
//! - Define the three record types persisted in the state blob.
//! - Define the `inbox` sentinel that loose notes point at.
//!
//! # Invariants
//! - Every record is identified by a stable UUID generated at creation.
//! - `inbox` is never a row in the category collection.

pub mod category;
pub mod note;
pub mod theme;

pub use category::{Category, CategoryId, CategoryRef, CategoryRefParseError, INBOX_ID};
pub use note::{Note, NoteId};
pub use theme::{Theme, ThemeId, DEFAULT_THEME_ICON};

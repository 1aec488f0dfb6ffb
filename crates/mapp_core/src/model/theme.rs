//! Theme record: the top-level grouping in the sidebar.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one theme.
pub type ThemeId = Uuid;

/// Icon assigned to themes created from the sidebar.
pub const DEFAULT_THEME_ICON: &str = "Brain";

/// Top-level grouping of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: ThemeId,
    pub name: String,
    /// Icon identifier resolved by the presentation layer.
    pub icon: String,
    /// Sidebar position key. Older blobs may omit it.
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Theme {
    /// Creates a non-favorite theme with a fresh id at the given position.
    pub fn new(name: impl Into<String>, icon: impl Into<String>, order: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            order,
            is_favorite: false,
        }
    }
}

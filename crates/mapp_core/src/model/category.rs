//! Category record and the `inbox` sentinel reference.
//!
//! # Invariants
//! - A category belongs to exactly one theme through `theme_id`.
//! - `CategoryRef` serializes as the category UUID string, or `"inbox"`.

use crate::model::theme::ThemeId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of one category.
pub type CategoryId = Uuid;

/// Reserved category id for loose notes.
pub const INBOX_ID: &str = "inbox";

/// Second-level grouping owned by one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub theme_id: ThemeId,
}

impl Category {
    /// Creates a category with a fresh id under `theme_id`.
    pub fn new(theme_id: ThemeId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            theme_id,
        }
    }
}

/// Where a note lives: a real category or the inbox sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryRef {
    /// Loose note with no category.
    Inbox,
    /// Note owned by the given category.
    Category(CategoryId),
}

impl CategoryRef {
    /// Returns the category id, or `None` for inbox.
    pub fn category_id(self) -> Option<CategoryId> {
        match self {
            Self::Inbox => None,
            Self::Category(id) => Some(id),
        }
    }

    pub fn is_inbox(self) -> bool {
        matches!(self, Self::Inbox)
    }
}

impl From<CategoryId> for CategoryRef {
    fn from(value: CategoryId) -> Self {
        Self::Category(value)
    }
}

impl Display for CategoryRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inbox => f.write_str(INBOX_ID),
            Self::Category(id) => write!(f, "{id}"),
        }
    }
}

/// Raised when a string is neither `inbox` nor a UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRefParseError(pub String);

impl Display for CategoryRefParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid category reference `{}`", self.0)
    }
}

impl Error for CategoryRefParseError {}

impl FromStr for CategoryRef {
    type Err = CategoryRefParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed == INBOX_ID {
            return Ok(Self::Inbox);
        }
        Uuid::parse_str(trimmed)
            .map(Self::Category)
            .map_err(|_| CategoryRefParseError(value.to_string()))
    }
}

impl TryFrom<String> for CategoryRef {
    type Error = CategoryRefParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryRef> for String {
    fn from(value: CategoryRef) -> Self {
        value.to_string()
    }
}

//! Core domain logic for mApp Mental.
//! This crate is the single source of truth for the theme → category → note
//! hierarchy and its integrity rules.

pub mod db;
pub mod logging;
pub mod modal;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use modal::{ModalContent, ModalKind, ModalOptions, ModalService};
pub use model::{
    Category, CategoryId, CategoryRef, Note, NoteId, Theme, ThemeId, DEFAULT_THEME_ICON, INBOX_ID,
};
pub use service::sidebar_service::{DeleteResult, SidebarService};
pub use storage::{
    MemoryStateStorage, SqliteStateStorage, StateStorage, StorageError, StorageResult,
};
pub use store::{
    AppState, Clock, NoteStore, Outcome, StoreConfig, StoreError, StoreResult, SubscriptionId,
    SystemClock, DEFAULT_STORAGE_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

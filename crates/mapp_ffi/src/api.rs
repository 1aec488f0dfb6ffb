//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the note store to Dart via FRB as sync, string-typed calls.
//! - Own the process-wide store instance backed by a SQLite file.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Ids cross the boundary as UUID strings; `"inbox"` names the loose-notes
//!   parent.
//! - The database path is fixed by the first call that needs it.

use log::{info, warn};
use mapp_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CategoryRef, NoteStore, Outcome, SqliteStateStorage, StoreConfig,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use uuid::Uuid;

const DB_FILE_NAME: &str = "mapp_mental.sqlite3";
const DB_PATH_ENV: &str = "MAPP_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE: OnceLock<Mutex<Option<NoteStore>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the SQLite file used by the store.
///
/// # FFI contract
/// - Must run before the first store call to take effect.
/// - Repeating the active path is a no-op; any other path is rejected once
///   the path is fixed.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "database already bound to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Generic action response envelope for store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Id of the created or addressed entity, when there is one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }

    fn from_outcome(action: &str, id: Uuid, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Applied => Self::success(format!("{action} applied."), Some(id.to_string())),
            Outcome::NotFound => Self::failure(format!("{action} failed: {id} not found")),
        }
    }
}

/// Full state snapshot in the persisted camelCase JSON layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshotResponse {
    pub ok: bool,
    /// Serialized state; empty on failure.
    pub json: String,
    pub message: String,
}

/// Returns the current store state as JSON.
///
/// # FFI contract
/// - Sync call, DB-backed on first use.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn state_snapshot_json() -> StateSnapshotResponse {
    let snapshot = with_store(|store| {
        serde_json::to_string(store.state()).map_err(|err| format!("encode failed: {err}"))
    });
    match snapshot {
        Ok(json) => StateSnapshotResponse {
            ok: true,
            json,
            message: "Snapshot ready.".to_string(),
        },
        Err(err) => StateSnapshotResponse {
            ok: false,
            json: String::new(),
            message: format!("state_snapshot_json failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn theme_add(name: String, icon: String) -> ActionResponse {
    match with_store(|store| Ok(store.add_theme(name, icon))) {
        Ok(id) => ActionResponse::success("Theme created.", Some(id.to_string())),
        Err(err) => ActionResponse::failure(format!("theme_add failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn theme_update(theme_id: String, name: String, icon: String) -> ActionResponse {
    addressed("theme_update", &theme_id, |store, id| {
        Ok(store.update_theme(id, name, icon))
    })
}

/// Deletes a theme together with its categories and their notes.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_delete(theme_id: String) -> ActionResponse {
    addressed("theme_delete", &theme_id, |store, id| Ok(store.delete_theme(id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn theme_toggle_favorite(theme_id: String) -> ActionResponse {
    addressed("theme_toggle_favorite", &theme_id, |store, id| {
        Ok(store.toggle_theme_favorite(id))
    })
}

/// Moves the theme at index `from` to index `to`.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_move(from: u32, to: u32) -> ActionResponse {
    match with_store(|store| {
        store
            .move_theme(from as usize, to as usize)
            .map_err(|err| err.to_string())
    }) {
        Ok(()) => ActionResponse::success("Themes reordered.", None),
        Err(err) => ActionResponse::failure(format!("theme_move failed: {err}")),
    }
}

/// Replaces the theme sequence; `theme_ids` must list every theme once.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_reorder(theme_ids: Vec<String>) -> ActionResponse {
    let ids = match theme_ids
        .iter()
        .map(|raw| parse_id(raw))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(ids) => ids,
        Err(err) => return ActionResponse::failure(format!("theme_reorder failed: {err}")),
    };
    match with_store(|store| store.reorder_themes(&ids).map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Themes reordered.", None),
        Err(err) => ActionResponse::failure(format!("theme_reorder failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn category_add(theme_id: String, name: String) -> ActionResponse {
    let created = parse_id(&theme_id).and_then(|theme_id| {
        with_store(|store| {
            store
                .add_category(theme_id, name)
                .map_err(|err| err.to_string())
        })
    });
    match created {
        Ok(id) => ActionResponse::success("Category created.", Some(id.to_string())),
        Err(err) => ActionResponse::failure(format!("category_add failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn category_update(category_id: String, name: String) -> ActionResponse {
    addressed("category_update", &category_id, |store, id| {
        Ok(store.update_category(id, name))
    })
}

/// Deletes a category and its notes; inbox notes are untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn category_delete(category_id: String) -> ActionResponse {
    addressed("category_delete", &category_id, |store, id| {
        Ok(store.delete_category(id))
    })
}

/// Creates a note under a category id or `"inbox"`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_add(category_id: String, title: String) -> ActionResponse {
    let created = parse_category_ref(&category_id).and_then(|parent| {
        with_store(|store| store.add_note(parent, title).map_err(|err| err.to_string()))
    });
    match created {
        Ok(id) => ActionResponse::success("Note created.", Some(id.to_string())),
        Err(err) => ActionResponse::failure(format!("note_add failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_update(note_id: String, title: String, content: String) -> ActionResponse {
    addressed("note_update", &note_id, |store, id| {
        Ok(store.update_note(id, title, content))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> ActionResponse {
    addressed("note_delete", &note_id, |store, id| Ok(store.delete_note(id)))
}

/// Re-parents a note under a category id or `"inbox"`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_move(note_id: String, category_id: String) -> ActionResponse {
    let target = match parse_category_ref(&category_id) {
        Ok(target) => target,
        Err(err) => return ActionResponse::failure(format!("note_move failed: {err}")),
    };
    addressed("note_move", &note_id, |store, id| {
        store.move_note(id, target).map_err(|err| err.to_string())
    })
}

/// Sets or clears (`None`) the note open in the editor.
#[flutter_rust_bridge::frb(sync)]
pub fn select_note(note_id: Option<String>) -> ActionResponse {
    select("select_note", note_id, |store, id| store.set_selected_note(id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn select_theme(theme_id: Option<String>) -> ActionResponse {
    select("select_theme", theme_id, |store, id| store.set_selected_theme(id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn select_category(category_id: Option<String>) -> ActionResponse {
    select("select_category", category_id, |store, id| {
        store.set_selected_category(id)
    })
}

/// Empties the store and removes its persisted blob.
#[flutter_rust_bridge::frb(sync)]
pub fn store_clear() -> ActionResponse {
    match with_store(|store| store.clear().map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Store cleared.", None),
        Err(err) => ActionResponse::failure(format!("store_clear failed: {err}")),
    }
}

fn addressed(
    action: &str,
    raw_id: &str,
    f: impl FnOnce(&mut NoteStore, Uuid) -> Result<Outcome, String>,
) -> ActionResponse {
    let result = parse_id(raw_id).and_then(|id| with_store(|store| f(store, id).map(|o| (id, o))));
    match result {
        Ok((id, outcome)) => ActionResponse::from_outcome(action, id, outcome),
        Err(err) => ActionResponse::failure(format!("{action} failed: {err}")),
    }
}

fn select(
    action: &str,
    raw_id: Option<String>,
    f: impl FnOnce(&mut NoteStore, Option<Uuid>) -> Outcome,
) -> ActionResponse {
    let id = match raw_id.as_deref().map(parse_id).transpose() {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(format!("{action} failed: {err}")),
    };
    match with_store(|store| Ok(f(store, id))) {
        Ok(outcome) if outcome.is_applied() => ActionResponse::success(
            format!("{action} applied."),
            id.map(|id| id.to_string()),
        ),
        Ok(_) => ActionResponse::failure(format!("{action} failed: target not found")),
        Err(err) => ActionResponse::failure(format!("{action} failed: {err}")),
    }
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid id `{raw}`: {err}"))
}

fn parse_category_ref(raw: &str) -> Result<CategoryRef, String> {
    raw.trim()
        .parse::<CategoryRef>()
        .map_err(|err| err.to_string())
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(f: impl FnOnce(&mut NoteStore) -> Result<T, String>) -> Result<T, String> {
    let mut slot = STORE
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if slot.is_none() {
        *slot = Some(open_store()?);
    }
    match slot.as_mut() {
        Some(store) => f(store),
        None => Err("store unavailable".to_string()),
    }
}

fn open_store() -> Result<NoteStore, String> {
    let db_path = resolve_db_path();
    let storage = SqliteStateStorage::open(&db_path).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={}", err);
        format!("store DB open failed: {err}")
    })?;
    let store = NoteStore::open(storage, StoreConfig::default())
        .map_err(|err| format!("store init failed: {err}"))?;
    info!(
        "event=ffi_store_open module=ffi status=ok themes={} notes={}",
        store.state().themes.len(),
        store.state().notes.len()
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::{
        category_add, category_delete, configure_db_path, core_version, init_logging, note_add,
        note_delete, note_move, note_update, ping, select_category, select_note, select_theme,
        state_snapshot_json, theme_add, theme_delete, theme_move, theme_reorder,
        theme_toggle_favorite, theme_update,
    };
    use serde_json::Value;
    use std::path::{Path, PathBuf};

    // SQLite opens `:memory:` without touching the filesystem.
    const TEST_DB_PATH: &str = ":memory:";

    fn bind_test_db() {
        let error = configure_db_path(TEST_DB_PATH.to_string());
        assert!(error.is_empty(), "{error}");
    }

    fn snapshot() -> Value {
        let response = state_snapshot_json();
        assert!(response.ok, "{}", response.message);
        serde_json::from_str(&response.json).unwrap()
    }

    fn contains_id(snapshot: &Value, collection: &str, id: &str) -> bool {
        snapshot[collection]
            .as_array()
            .unwrap()
            .iter()
            .any(|item| item["id"] == Value::String(id.to_string()))
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn configure_db_path_rejects_switch() {
        bind_test_db();
        assert!(!configure_db_path(String::new()).is_empty());
        assert!(configure_db_path("/elsewhere/mapp.sqlite3".to_string()).contains("refusing"));
    }

    #[test]
    fn theme_delete_cascades_through_ffi() {
        bind_test_db();
        let theme = theme_add("Work".to_string(), "Brain".to_string());
        assert!(theme.ok, "{}", theme.message);
        let theme_id = theme.id.unwrap();

        let category = category_add(theme_id.clone(), "Projects".to_string());
        let category_id = category.id.unwrap();
        let note = note_add(category_id.clone(), "Plan".to_string());
        let note_id = note.id.unwrap();
        let loose = note_add("inbox".to_string(), "Loose".to_string());
        let loose_id = loose.id.unwrap();

        assert!(theme_delete(theme_id.clone()).ok);

        let state = snapshot();
        assert!(!contains_id(&state, "themes", &theme_id));
        assert!(!contains_id(&state, "categories", &category_id));
        assert!(!contains_id(&state, "notes", &note_id));
        assert!(contains_id(&state, "notes", &loose_id));

        let again = theme_delete(theme_id);
        assert!(!again.ok);
        assert!(again.message.contains("not found"));
        assert!(note_delete(loose_id).ok);
    }

    #[test]
    fn note_mutations_report_validation_errors() {
        bind_test_db();
        let missing = uuid::Uuid::new_v4().to_string();

        let orphan = note_add(missing.clone(), "Orphan".to_string());
        assert!(!orphan.ok);
        assert!(orphan.message.contains("category not found"));

        let bad_id = note_update("not-a-uuid".to_string(), String::new(), String::new());
        assert!(!bad_id.ok);
        assert!(bad_id.message.contains("invalid id"));

        let note = note_add("inbox".to_string(), "Draft".to_string());
        let note_id = note.id.unwrap();
        assert!(note_update(note_id.clone(), "Draft".to_string(), "<p>x</p>".to_string()).ok);
        assert!(!note_move(note_id.clone(), missing).ok);
        assert!(select_note(Some(note_id.clone())).ok);
        assert!(note_delete(note_id.clone()).ok);

        let state = snapshot();
        assert!(!contains_id(&state, "notes", &note_id));
        assert_ne!(state["selectedNoteId"], Value::String(note_id));
    }

    #[test]
    fn theme_reorder_rejects_partial_lists() {
        bind_test_db();
        let theme = theme_add("Solo".to_string(), "Brain".to_string());
        let theme_id = theme.id.unwrap();

        assert!(!theme_reorder(vec!["bogus".to_string()]).ok);
        assert!(!theme_move(u32::MAX, 0).ok);
        assert!(theme_toggle_favorite(theme_id.clone()).ok);
        assert!(theme_update(theme_id.clone(), "Renamed".to_string(), "Star".to_string()).ok);
        assert!(theme_delete(theme_id).ok);
    }

    #[test]
    fn test_store_leaves_no_database_file() {
        bind_test_db();
        assert!(theme_add("Scratch".to_string(), "Brain".to_string()).ok);
        assert_eq!(super::resolve_db_path(), PathBuf::from(TEST_DB_PATH));
        assert!(!Path::new(TEST_DB_PATH).exists());
    }

    #[test]
    fn select_rejects_unknown_ids_and_accepts_clear() {
        bind_test_db();
        let missing = uuid::Uuid::new_v4().to_string();

        let response = select_theme(Some(missing.clone()));
        assert!(!response.ok);
        assert!(response.message.contains("not found"));
        assert!(!select_category(Some(missing)).ok);

        let cleared = select_category(None);
        assert!(cleared.ok, "{}", cleared.message);
        assert_eq!(cleared.id, None);
    }

    #[test]
    fn category_delete_unknown_id_is_not_found() {
        bind_test_db();
        let response = category_delete(uuid::Uuid::new_v4().to_string());
        assert!(!response.ok);
        assert!(response.message.contains("not found"));
    }
}

//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mapp_core` linkage.
//! - Given a database path, print dashboard counts of the persisted store.
//! - Keep output deterministic for quick local sanity checks.

use mapp_core::view::{dashboard_stats, recent_notes, RECENT_NOTES_LIMIT};
use mapp_core::{NoteStore, SqliteStateStorage, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("mapp_core ping={}", mapp_core::ping());
    println!("mapp_core version={}", mapp_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match print_dashboard(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mapp_core error={err}");
            ExitCode::FAILURE
        }
    }
}

fn print_dashboard(db_path: &str) -> Result<(), String> {
    let storage = SqliteStateStorage::open(db_path).map_err(|err| err.to_string())?;
    let store = NoteStore::open(storage, StoreConfig::default()).map_err(|err| err.to_string())?;
    let stats = dashboard_stats(store.state());
    println!(
        "mapp_core themes={} categories={} notes={} favorites={}",
        stats.themes, stats.categories, stats.notes, stats.favorites
    );
    // Ids only; titles stay out of the probe output.
    for recent in recent_notes(store.state(), RECENT_NOTES_LIMIT) {
        println!(
            "mapp_core recent_note id={} updated_at={}",
            recent.note.id, recent.note.updated_at
        );
    }
    Ok(())
}

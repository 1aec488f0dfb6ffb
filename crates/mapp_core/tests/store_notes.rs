use mapp_core::{
    CategoryRef, Clock, MemoryStateStorage, NoteStore, Outcome, StoreConfig,
};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Clock frozen at a caller-controlled instant.
#[derive(Clone, Default)]
struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    fn at(now_ms: i64) -> Self {
        Self(Arc::new(AtomicI64::new(now_ms)))
    }

    fn set(&self, now_ms: i64) {
        self.0.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

fn setup(clock: ManualClock) -> NoteStore {
    NoteStore::open_with_clock(MemoryStateStorage::new(), StoreConfig::default(), clock).unwrap()
}

#[test]
fn add_note_starts_empty_with_equal_timestamps() {
    let mut store = setup(ManualClock::at(1_700_000_000_000));
    let id = store.add_note(CategoryRef::Inbox, "Plan").unwrap();

    let note = &store.state().notes[0];
    assert_eq!(note.id, id);
    assert_eq!(note.title, "Plan");
    assert!(note.content.is_empty());
    assert_eq!(note.created_at, 1_700_000_000_000);
    assert_eq!(note.updated_at, note.created_at);
}

#[test]
fn update_note_strictly_advances_updated_at_even_within_one_millisecond() {
    let clock = ManualClock::at(5_000);
    let mut store = setup(clock.clone());
    let id = store.add_note(CategoryRef::Inbox, "Plan").unwrap();

    assert_eq!(store.update_note(id, "Plan v2", "<p>body</p>"), Outcome::Applied);
    let note = &store.state().notes[0];
    assert_eq!(note.title, "Plan v2");
    assert_eq!(note.content, "<p>body</p>");
    assert_eq!(note.created_at, 5_000);
    assert!(note.updated_at > note.created_at);

    clock.set(9_000);
    store.update_note(id, "Plan v3", "<p>more</p>");
    let note = &store.state().notes[0];
    assert_eq!(note.updated_at, 9_000);
    assert_eq!(note.created_at, 5_000);
}

#[test]
fn update_note_never_goes_backwards_when_clock_does() {
    let clock = ManualClock::at(10_000);
    let mut store = setup(clock.clone());
    let id = store.add_note(CategoryRef::Inbox, "Plan").unwrap();

    clock.set(1_000);
    store.update_note(id, "t", "c");
    assert_eq!(store.state().notes[0].updated_at, 10_001);
}

#[test]
fn move_note_round_trips_through_inbox() {
    let clock = ManualClock::at(1_000);
    let mut store = setup(clock.clone());
    let theme = store.add_theme("Work", "Brain");
    let category = store.add_category(theme, "Projects").unwrap();
    let id = store.add_note(category.into(), "Plan").unwrap();
    store.update_note(id, "Plan", "<p>keep me</p>");
    let updated_before_move = store.state().notes[0].updated_at;

    assert_eq!(
        store.move_note(id, CategoryRef::Inbox).unwrap(),
        Outcome::Applied
    );
    assert_eq!(store.state().notes[0].category_id, CategoryRef::Inbox);
    assert!(store.state().notes[0].updated_at > updated_before_move);

    store.move_note(id, category.into()).unwrap();
    let note = &store.state().notes[0];
    assert_eq!(note.category_id, CategoryRef::Category(category));
    assert_eq!(note.content, "<p>keep me</p>");
    assert_eq!(note.title, "Plan");
}

#[test]
fn move_note_between_categories_of_different_themes() {
    let mut store = setup(ManualClock::at(1));
    let work = store.add_theme("Work", "Brain");
    let home = store.add_theme("Home", "Brain");
    let from = store.add_category(work, "From").unwrap();
    let to = store.add_category(home, "To").unwrap();
    let id = store.add_note(from.into(), "Plan").unwrap();

    store.move_note(id, to.into()).unwrap();
    store.delete_theme(work);

    assert_eq!(store.state().notes.len(), 1);
    assert_eq!(store.state().notes[0].category_id, CategoryRef::Category(to));
}

#[test]
fn delete_note_removes_only_that_note() {
    let mut store = setup(ManualClock::at(1));
    let first = store.add_note(CategoryRef::Inbox, "first").unwrap();
    let second = store.add_note(CategoryRef::Inbox, "second").unwrap();

    assert_eq!(store.delete_note(first), Outcome::Applied);
    assert_eq!(store.delete_note(first), Outcome::NotFound);
    assert_eq!(store.state().notes.len(), 1);
    assert_eq!(store.state().notes[0].id, second);
}

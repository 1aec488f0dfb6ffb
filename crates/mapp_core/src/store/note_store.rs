//! `NoteStore`: the state container and its mutators.

use super::clock::{Clock, SystemClock};
use super::ordering::{is_permutation, move_to_index};
use super::state::AppState;
use super::{Outcome, StoreConfig, StoreError, StoreResult};
use crate::model::{Category, CategoryId, CategoryRef, Note, NoteId, Theme, ThemeId};
use crate::storage::{StateStorage, StorageError};
use log::{debug, error, info, warn};
use std::collections::{BTreeMap, HashSet};

type Listener = Box<dyn Fn(&AppState) + Send>;

/// Handle returned by [`NoteStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// In-memory hierarchical store with write-through persistence.
///
/// Constructed once and passed by reference to its consumers. All mutators
/// apply synchronously; after an applied change the full state is saved and
/// listeners are notified, in that order.
pub struct NoteStore {
    state: AppState,
    config: StoreConfig,
    storage: Box<dyn StateStorage + Send>,
    clock: Box<dyn Clock + Send>,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: u64,
}

impl NoteStore {
    /// Opens a store and rehydrates it from `storage`.
    ///
    /// # Errors
    /// - `StoreError::Storage` when the backend fails or the blob is malformed.
    pub fn open<S>(storage: S, config: StoreConfig) -> StoreResult<Self>
    where
        S: StateStorage + Send + 'static,
    {
        Self::open_with_clock(storage, config, SystemClock)
    }

    /// Same as [`NoteStore::open`] with a caller-provided time source.
    pub fn open_with_clock<S, C>(storage: S, config: StoreConfig, clock: C) -> StoreResult<Self>
    where
        S: StateStorage + Send + 'static,
        C: Clock + Send + 'static,
    {
        let mut state = match storage.get_item(&config.storage_key)? {
            None => {
                info!("event=state_rehydrate module=store status=empty");
                AppState::default()
            }
            Some(blob) => match serde_json::from_str::<AppState>(&blob) {
                Ok(state) => {
                    info!(
                        "event=state_rehydrate module=store status=ok themes={} categories={} notes={}",
                        state.themes.len(),
                        state.categories.len(),
                        state.notes.len()
                    );
                    state
                }
                Err(err) => {
                    error!(
                        "event=state_rehydrate module=store status=error error_code=malformed_state error={}",
                        err
                    );
                    return Err(StorageError::MalformedState(err).into());
                }
            },
        };
        // Blobs may list themes out of `order`; the Vec sequence must match it.
        state.themes.sort_by_key(|theme| theme.order);

        Ok(Self {
            state,
            config,
            storage: Box::new(storage),
            clock: Box::new(clock),
            listeners: BTreeMap::new(),
            next_subscription: 0,
        })
    }

    /// Returns the current state snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Registers a listener called with the new state after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&AppState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener. Returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Saves the current state, surfacing backend errors.
    pub fn flush(&self) -> StoreResult<()> {
        self.save().map_err(Into::into)
    }

    /// Empties every collection and selection and removes the persisted blob.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.storage.remove_item(&self.config.storage_key)?;
        self.state = AppState::default();
        info!("event=state_clear module=store status=ok");
        self.notify();
        Ok(())
    }

    // Themes

    /// Appends a theme after the current last position.
    pub fn add_theme(&mut self, name: impl Into<String>, icon: impl Into<String>) -> ThemeId {
        let order = self
            .state
            .themes
            .iter()
            .map(|theme| theme.order)
            .max()
            .map_or(0, |max| max + 1);
        let theme = Theme::new(name, icon, order);
        let id = theme.id;
        self.state.themes.push(theme);
        self.commit("theme_add");
        id
    }

    pub fn update_theme(
        &mut self,
        id: ThemeId,
        name: impl Into<String>,
        icon: impl Into<String>,
    ) -> Outcome {
        let Some(theme) = self.state.themes.iter_mut().find(|theme| theme.id == id) else {
            return Outcome::NotFound;
        };
        theme.name = name.into();
        theme.icon = icon.into();
        self.commit("theme_update");
        Outcome::Applied
    }

    /// Deletes a theme with its categories and their notes.
    pub fn delete_theme(&mut self, id: ThemeId) -> Outcome {
        if self.state.theme(id).is_none() {
            return Outcome::NotFound;
        }

        let doomed_categories: HashSet<CategoryId> = self
            .state
            .categories
            .iter()
            .filter(|category| category.theme_id == id)
            .map(|category| category.id)
            .collect();

        self.state.themes.retain(|theme| theme.id != id);
        self.state
            .categories
            .retain(|category| category.theme_id != id);
        let notes_removed = self.remove_notes_where(|note| {
            note.category_id
                .category_id()
                .is_some_and(|category_id| doomed_categories.contains(&category_id))
        });

        if self.state.selected_theme_id == Some(id) {
            self.state.selected_theme_id = None;
        }
        if self
            .state
            .selected_category_id
            .is_some_and(|selected| doomed_categories.contains(&selected))
        {
            self.state.selected_category_id = None;
        }

        debug!(
            "event=theme_delete module=store status=ok categories_removed={} notes_removed={}",
            doomed_categories.len(),
            notes_removed
        );
        self.commit("theme_delete");
        Outcome::Applied
    }

    pub fn toggle_theme_favorite(&mut self, id: ThemeId) -> Outcome {
        let Some(theme) = self.state.themes.iter_mut().find(|theme| theme.id == id) else {
            return Outcome::NotFound;
        };
        theme.is_favorite = !theme.is_favorite;
        self.commit("theme_toggle_favorite");
        Outcome::Applied
    }

    /// Moves the theme at `from` to index `to` (drag-and-drop drop).
    ///
    /// # Errors
    /// - `IndexOutOfRange` when either index is outside the theme list.
    pub fn move_theme(&mut self, from: usize, to: usize) -> StoreResult<()> {
        let len = self.state.themes.len();
        let mut ids = self.theme_ids();
        move_to_index(&mut ids, from, to)
            .map_err(|index| StoreError::IndexOutOfRange { index, len })?;
        self.apply_theme_order(&ids);
        Ok(())
    }

    /// Replaces the theme sequence with `ordered_ids`.
    ///
    /// Stored theme fields are kept; the existing `order` values are handed
    /// out again along the new sequence, so the identity order is a no-op.
    ///
    /// # Errors
    /// - `NotAPermutation` unless every current theme id appears exactly once.
    pub fn reorder_themes(&mut self, ordered_ids: &[ThemeId]) -> StoreResult<()> {
        if !is_permutation(&self.theme_ids(), ordered_ids) {
            return Err(StoreError::NotAPermutation);
        }
        self.apply_theme_order(ordered_ids);
        Ok(())
    }

    // Categories

    /// Creates a category under an existing theme.
    ///
    /// # Errors
    /// - `ThemeNotFound` when `theme_id` is unknown.
    pub fn add_category(
        &mut self,
        theme_id: ThemeId,
        name: impl Into<String>,
    ) -> StoreResult<CategoryId> {
        if self.state.theme(theme_id).is_none() {
            return Err(StoreError::ThemeNotFound(theme_id));
        }
        let category = Category::new(theme_id, name);
        let id = category.id;
        self.state.categories.push(category);
        self.commit("category_add");
        Ok(id)
    }

    pub fn update_category(&mut self, id: CategoryId, name: impl Into<String>) -> Outcome {
        let Some(category) = self
            .state
            .categories
            .iter_mut()
            .find(|category| category.id == id)
        else {
            return Outcome::NotFound;
        };
        category.name = name.into();
        self.commit("category_update");
        Outcome::Applied
    }

    /// Deletes a category and its notes. Inbox notes are never touched.
    pub fn delete_category(&mut self, id: CategoryId) -> Outcome {
        if self.state.category(id).is_none() {
            return Outcome::NotFound;
        }

        self.state.categories.retain(|category| category.id != id);
        let notes_removed =
            self.remove_notes_where(|note| note.category_id == CategoryRef::Category(id));
        if self.state.selected_category_id == Some(id) {
            self.state.selected_category_id = None;
        }

        debug!(
            "event=category_delete module=store status=ok notes_removed={}",
            notes_removed
        );
        self.commit("category_delete");
        Outcome::Applied
    }

    // Notes

    /// Creates an empty note under `category` (a category or inbox).
    ///
    /// # Errors
    /// - `CategoryNotFound` when `category` names an unknown category.
    pub fn add_note(
        &mut self,
        category: CategoryRef,
        title: impl Into<String>,
    ) -> StoreResult<NoteId> {
        self.ensure_note_parent(category)?;
        let note = Note::new(category, title, self.clock.now_ms());
        let id = note.id;
        self.state.notes.push(note);
        self.commit("note_add");
        Ok(id)
    }

    /// Replaces title and content together and refreshes `updated_at`.
    pub fn update_note(
        &mut self,
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Outcome {
        let now = self.clock.now_ms();
        let Some(note) = self.state.notes.iter_mut().find(|note| note.id == id) else {
            return Outcome::NotFound;
        };
        note.title = title.into();
        note.content = content.into();
        note.touch(now);
        self.commit("note_update");
        Outcome::Applied
    }

    pub fn delete_note(&mut self, id: NoteId) -> Outcome {
        if self.remove_notes_where(|note| note.id == id) == 0 {
            return Outcome::NotFound;
        }
        self.commit("note_delete");
        Outcome::Applied
    }

    /// Re-parents a note and refreshes `updated_at`.
    ///
    /// The target is validated before the note is looked up.
    ///
    /// # Errors
    /// - `CategoryNotFound` when `target` names an unknown category.
    pub fn move_note(&mut self, note_id: NoteId, target: CategoryRef) -> StoreResult<Outcome> {
        self.ensure_note_parent(target)?;
        let now = self.clock.now_ms();
        let Some(note) = self.state.notes.iter_mut().find(|note| note.id == note_id) else {
            return Ok(Outcome::NotFound);
        };
        note.category_id = target;
        note.touch(now);
        self.commit("note_move");
        Ok(Outcome::Applied)
    }

    // Selection

    /// Sets or clears the note open in the editor.
    ///
    /// An unknown id changes nothing and reports `Outcome::NotFound`.
    pub fn set_selected_note(&mut self, id: Option<NoteId>) -> Outcome {
        if id.is_some_and(|id| self.state.note(id).is_none()) {
            return Outcome::NotFound;
        }
        self.state.selected_note_id = id;
        self.commit("select_note");
        Outcome::Applied
    }

    pub fn set_selected_theme(&mut self, id: Option<ThemeId>) -> Outcome {
        if id.is_some_and(|id| self.state.theme(id).is_none()) {
            return Outcome::NotFound;
        }
        self.state.selected_theme_id = id;
        self.commit("select_theme");
        Outcome::Applied
    }

    pub fn set_selected_category(&mut self, id: Option<CategoryId>) -> Outcome {
        if id.is_some_and(|id| self.state.category(id).is_none()) {
            return Outcome::NotFound;
        }
        self.state.selected_category_id = id;
        self.commit("select_category");
        Outcome::Applied
    }

    fn theme_ids(&self) -> Vec<ThemeId> {
        self.state.themes.iter().map(|theme| theme.id).collect()
    }

    fn apply_theme_order(&mut self, ordered_ids: &[ThemeId]) {
        let mut slots: Vec<i64> = self.state.themes.iter().map(|theme| theme.order).collect();
        slots.sort_unstable();

        let reordered: Vec<Theme> = ordered_ids
            .iter()
            .zip(slots)
            .filter_map(|(id, order)| {
                self.state.theme(*id).cloned().map(|mut theme| {
                    theme.order = order;
                    theme
                })
            })
            .collect();

        if reordered == self.state.themes {
            return;
        }
        self.state.themes = reordered;
        self.commit("theme_reorder");
    }

    fn ensure_note_parent(&self, target: CategoryRef) -> StoreResult<()> {
        match target {
            CategoryRef::Category(id) if !self.state.accepts_note_parent(target) => {
                Err(StoreError::CategoryNotFound(id))
            }
            _ => Ok(()),
        }
    }

    /// Removes matching notes, clearing the note selection if it was hit.
    fn remove_notes_where(&mut self, doomed: impl Fn(&Note) -> bool) -> usize {
        let before = self.state.notes.len();
        let selected = self.state.selected_note_id;
        let mut selected_removed = false;
        self.state.notes.retain(|note| {
            let remove = doomed(note);
            if remove && selected == Some(note.id) {
                selected_removed = true;
            }
            !remove
        });
        if selected_removed {
            self.state.selected_note_id = None;
        }
        before - self.state.notes.len()
    }

    fn commit(&mut self, action: &'static str) {
        match self.save() {
            Ok(()) => debug!("event=state_save module=store status=ok action={action}"),
            Err(err) => warn!(
                "event=state_save module=store status=error action={} error={}",
                action, err
            ),
        }
        self.notify();
    }

    fn save(&self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.state).map_err(StorageError::Encode)?;
        self.storage.set_item(&self.config.storage_key, &blob)
    }

    fn notify(&self) {
        for listener in self.listeners.values() {
            listener(&self.state);
        }
    }
}

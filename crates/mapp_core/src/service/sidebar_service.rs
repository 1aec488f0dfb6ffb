//! Sidebar create/delete flows.
//!
//! # Invariants
//! - A cancelled or empty prompt leaves the store untouched.
//! - A declined confirmation leaves the store untouched.
//! - A note created from the sidebar becomes the selected note.

use crate::modal::ModalService;
use crate::model::{CategoryId, CategoryRef, NoteId, ThemeId, DEFAULT_THEME_ICON};
use crate::store::{NoteStore, Outcome, StoreResult};
use log::debug;

const NEW_THEME_TITLE: &str = "Nuevo Tema";
const NEW_THEME_MESSAGE: &str = "Ingresa el nombre del tema para organizar tus ideas:";
const NEW_CATEGORY_TITLE: &str = "Nueva Categoría";
const NEW_CATEGORY_MESSAGE: &str = "Nombra esta categoría dentro del tema:";
const NEW_NOTE_TITLE: &str = "Nueva Nota";
const NEW_NOTE_MESSAGE: &str = "Título para tu nueva nota:";
const DELETE_THEME_TITLE: &str = "¿Eliminar Tema?";
const DELETE_THEME_MESSAGE: &str =
    "Esto borrará todas las categorías y notas asociadas. Esta acción no se puede deshacer.";
const DELETE_CATEGORY_TITLE: &str = "¿Eliminar Categoría?";
const DELETE_CATEGORY_MESSAGE: &str = "Todas las notas en esta categoría serán eliminadas.";
const DELETE_NOTE_TITLE: &str = "¿Eliminar Nota?";
const DELETE_NOTE_MESSAGE: &str = "¿Estás seguro de que quieres borrar esta nota?";

/// Result of a confirm-then-delete flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteResult {
    /// Confirmed and removed.
    Deleted,
    /// The user declined; nothing changed.
    Declined,
    /// Confirmed, but the id no longer existed.
    NotFound,
}

impl DeleteResult {
    fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Applied => Self::Deleted,
            Outcome::NotFound => Self::NotFound,
        }
    }
}

/// Sidebar flows over one store and one modal slot.
pub struct SidebarService<'a> {
    store: &'a mut NoteStore,
    modal: &'a ModalService,
}

impl<'a> SidebarService<'a> {
    pub fn new(store: &'a mut NoteStore, modal: &'a ModalService) -> Self {
        Self { store, modal }
    }

    pub fn store(&self) -> &NoteStore {
        &*self.store
    }

    /// Prompts for a theme name and creates the theme.
    pub async fn add_theme(&mut self) -> Option<ThemeId> {
        let name = self.ask(NEW_THEME_TITLE, NEW_THEME_MESSAGE).await?;
        Some(self.store.add_theme(name, DEFAULT_THEME_ICON))
    }

    /// Prompts for a category name and creates it under `theme_id`.
    pub async fn add_category(&mut self, theme_id: ThemeId) -> StoreResult<Option<CategoryId>> {
        let Some(name) = self.ask(NEW_CATEGORY_TITLE, NEW_CATEGORY_MESSAGE).await else {
            return Ok(None);
        };
        self.store.add_category(theme_id, name).map(Some)
    }

    /// Prompts for a title, creates the note and selects it.
    pub async fn add_note(&mut self, category: CategoryRef) -> StoreResult<Option<NoteId>> {
        let Some(title) = self.ask(NEW_NOTE_TITLE, NEW_NOTE_MESSAGE).await else {
            return Ok(None);
        };
        let id = self.store.add_note(category, title)?;
        self.store.set_selected_note(Some(id));
        Ok(Some(id))
    }

    /// Asks for confirmation, then deletes the theme subtree.
    pub async fn delete_theme(&mut self, id: ThemeId) -> DeleteResult {
        if !self.agree(DELETE_THEME_TITLE, DELETE_THEME_MESSAGE, "theme").await {
            return DeleteResult::Declined;
        }
        DeleteResult::from_outcome(self.store.delete_theme(id))
    }

    /// Asks for confirmation, then deletes the category and its notes.
    pub async fn delete_category(&mut self, id: CategoryId) -> DeleteResult {
        if !self
            .agree(DELETE_CATEGORY_TITLE, DELETE_CATEGORY_MESSAGE, "category")
            .await
        {
            return DeleteResult::Declined;
        }
        DeleteResult::from_outcome(self.store.delete_category(id))
    }

    /// Asks for confirmation, then deletes the note.
    pub async fn delete_note(&mut self, id: NoteId) -> DeleteResult {
        if !self.agree(DELETE_NOTE_TITLE, DELETE_NOTE_MESSAGE, "note").await {
            return DeleteResult::Declined;
        }
        DeleteResult::from_outcome(self.store.delete_note(id))
    }

    /// Prompts and keeps only non-empty answers.
    async fn ask(&self, title: &str, message: &str) -> Option<String> {
        self.modal
            .prompt(title, message, "", "")
            .await
            .filter(|value| !value.is_empty())
    }

    async fn agree(&self, title: &str, message: &str, target: &'static str) -> bool {
        let confirmed = self.modal.confirm(title, message).await;
        if !confirmed {
            debug!("event=sidebar_delete module=service status=declined target={target}");
        }
        confirmed
    }
}

//! Single-slot modal prompt service.
//!
//! # Responsibility
//! - Hold at most one pending modal (prompt, confirm or alert).
//! - Turn a modal into an awaitable answer for the caller's flow.
//!
//! # Invariants
//! - Opening a modal while another is pending replaces it (last write wins).
//!   The replaced modal's future resolves as cancelled.
//! - `submit`/`cancel` close the modal before running its callback.

use log::debug;
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

type ConfirmCallback = Box<dyn FnOnce(Option<String>) + Send>;
type CancelCallback = Box<dyn FnOnce() + Send>;

/// Modal flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    /// Asks for a line of text.
    Prompt,
    /// Asks for a yes/no decision.
    Confirm,
    /// Informs; only acknowledgement is possible.
    Alert,
}

impl ModalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Confirm => "confirm",
            Self::Alert => "alert",
        }
    }
}

/// Renderable part of a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub kind: ModalKind,
    pub title: String,
    pub message: String,
    pub placeholder: Option<String>,
    pub default_value: Option<String>,
    pub confirm_label: Option<String>,
    pub cancel_label: Option<String>,
}

/// One modal request: content plus the callbacks that answer it.
pub struct ModalOptions {
    content: ModalContent,
    on_confirm: ConfirmCallback,
    on_cancel: Option<CancelCallback>,
}

impl ModalOptions {
    pub fn new<F>(
        kind: ModalKind,
        title: impl Into<String>,
        message: impl Into<String>,
        on_confirm: F,
    ) -> Self
    where
        F: FnOnce(Option<String>) + Send + 'static,
    {
        Self {
            content: ModalContent {
                kind,
                title: title.into(),
                message: message.into(),
                placeholder: None,
                default_value: None,
                confirm_label: None,
                cancel_label: None,
            },
            on_confirm: Box::new(on_confirm),
            on_cancel: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.content.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.content.default_value = Some(default_value.into());
        self
    }

    pub fn with_labels(
        mut self,
        confirm_label: impl Into<String>,
        cancel_label: impl Into<String>,
    ) -> Self {
        self.content.confirm_label = Some(confirm_label.into());
        self.content.cancel_label = Some(cancel_label.into());
        self
    }

    pub fn on_cancel<F>(mut self, on_cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_cancel = Some(Box::new(on_cancel));
        self
    }

    pub fn content(&self) -> &ModalContent {
        &self.content
    }
}

impl Debug for ModalOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalOptions")
            .field("content", &self.content)
            .field("has_on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// Holder of the single pending modal.
#[derive(Debug, Default)]
pub struct ModalService {
    current: Mutex<Option<ModalOptions>>,
}

impl ModalService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `options`, replacing any pending modal.
    pub fn open_modal(&self, options: ModalOptions) {
        let kind = options.content.kind;
        let replaced = self.slot().replace(options);
        debug!(
            "event=modal_open module=modal status=ok kind={} replaced={}",
            kind.as_str(),
            replaced.is_some()
        );
    }

    /// Hides the pending modal without answering it.
    pub fn close_modal(&self) {
        if self.slot().take().is_some() {
            debug!("event=modal_close module=modal status=ok");
        }
    }

    pub fn is_open(&self) -> bool {
        self.slot().is_some()
    }

    /// Returns what the presentation layer should render, if anything.
    pub fn content(&self) -> Option<ModalContent> {
        self.slot().as_ref().map(|options| options.content.clone())
    }

    /// Answers the pending modal with `value`. Returns `false` if none was open.
    pub fn submit(&self, value: Option<String>) -> bool {
        let Some(options) = self.slot().take() else {
            return false;
        };
        debug!(
            "event=modal_submit module=modal status=ok kind={}",
            options.content.kind.as_str()
        );
        (options.on_confirm)(value);
        true
    }

    /// Dismisses the pending modal. Returns `false` if none was open.
    pub fn cancel(&self) -> bool {
        let Some(options) = self.slot().take() else {
            return false;
        };
        debug!(
            "event=modal_cancel module=modal status=ok kind={}",
            options.content.kind.as_str()
        );
        if let Some(on_cancel) = options.on_cancel {
            on_cancel();
        }
        true
    }

    /// Opens a text prompt. Resolves to the submitted text (empty when
    /// submitted without a value) or `None` when cancelled.
    pub fn prompt(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        default_value: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> impl Future<Output = Option<String>> + Send + 'static {
        let (responder, rx) = Responder::channel();
        let cancel_responder = responder.clone();
        let options = ModalOptions::new(ModalKind::Prompt, title, message, move |value| {
            responder.send(Some(value.unwrap_or_default()));
        })
        .with_default_value(default_value)
        .with_placeholder(placeholder)
        .on_cancel(move || cancel_responder.send(None));
        self.open_modal(options);
        async move { rx.await.unwrap_or(None) }
    }

    /// Opens a yes/no confirmation.
    pub fn confirm(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> impl Future<Output = bool> + Send + 'static {
        let (responder, rx) = Responder::channel();
        let cancel_responder = responder.clone();
        let options = ModalOptions::new(ModalKind::Confirm, title, message, move |_| {
            responder.send(true);
        })
        .on_cancel(move || cancel_responder.send(false));
        self.open_modal(options);
        async move { rx.await.unwrap_or(false) }
    }

    /// Opens an acknowledgement-only alert.
    pub fn alert(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> impl Future<Output = ()> + Send + 'static {
        let (responder, rx) = Responder::channel();
        let options = ModalOptions::new(ModalKind::Alert, title, message, move |_| {
            responder.send(());
        });
        self.open_modal(options);
        async move {
            let _ = rx.await;
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<ModalOptions>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One-shot answer shared by a modal's confirm and cancel callbacks.
struct Responder<T> {
    sender: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for Responder<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> Responder<T> {
    fn channel() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        let responder = Self {
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        (responder, rx)
    }

    fn send(&self, value: T) {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(sender) = sender {
            let _ = sender.send(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ModalKind, ModalOptions, ModalService};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn prompt_resolves_with_submitted_text() {
        let modal = ModalService::new();
        let answer = modal.prompt("New theme", "Name it", "", "Ideas");

        let content = modal.content().expect("prompt should be open");
        assert_eq!(content.kind, ModalKind::Prompt);
        assert_eq!(content.title, "New theme");
        assert_eq!(content.placeholder.as_deref(), Some("Ideas"));

        assert!(modal.submit(Some("Work".to_string())));
        assert!(!modal.is_open());
        assert_eq!(answer.await.as_deref(), Some("Work"));
    }

    #[tokio::test]
    async fn prompt_submit_without_value_is_empty_string() {
        let modal = ModalService::new();
        let answer = modal.prompt("t", "m", "", "");
        modal.submit(None);
        assert_eq!(answer.await.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn prompt_cancel_resolves_none() {
        let modal = ModalService::new();
        let answer = modal.prompt("t", "m", "", "");
        assert!(modal.cancel());
        assert_eq!(answer.await, None);
    }

    #[tokio::test]
    async fn confirm_resolves_true_or_false() {
        let modal = ModalService::new();
        let yes = modal.confirm("Delete?", "Sure?");
        modal.submit(None);
        assert!(yes.await);

        let no = modal.confirm("Delete?", "Sure?");
        modal.cancel();
        assert!(!no.await);
    }

    #[tokio::test]
    async fn alert_resolves_on_acknowledge_or_dismiss() {
        let modal = ModalService::new();
        let acknowledged = modal.alert("Saved", "All good");
        modal.submit(None);
        acknowledged.await;

        let dismissed = modal.alert("Saved", "All good");
        modal.cancel();
        dismissed.await;
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn second_open_replaces_first_which_resolves_cancelled() {
        let modal = ModalService::new();
        let first = modal.confirm("first", "m");
        let second = modal.prompt("second", "m", "draft", "");

        assert_eq!(modal.content().map(|c| c.title), Some("second".to_string()));
        assert!(!first.await);

        modal.submit(Some("x".to_string()));
        assert_eq!(second.await.as_deref(), Some("x"));
    }

    #[test]
    fn raw_options_run_callbacks_once_after_close() {
        let modal = ModalService::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let confirm_seen = Arc::clone(&seen);
        let cancel_seen = Arc::clone(&seen);

        modal.open_modal(
            ModalOptions::new(ModalKind::Confirm, "t", "m", move |value| {
                confirm_seen.lock().unwrap().push(format!("confirm:{value:?}"));
            })
            .with_labels("Yes", "No")
            .on_cancel(move || cancel_seen.lock().unwrap().push("cancel".to_string())),
        );
        assert_eq!(
            modal.content().and_then(|c| c.confirm_label),
            Some("Yes".to_string())
        );

        assert!(modal.cancel());
        assert!(!modal.cancel());
        assert!(!modal.submit(None));
        assert_eq!(*seen.lock().unwrap(), vec!["cancel".to_string()]);
    }

    #[test]
    fn close_modal_drops_without_answer() {
        let modal = ModalService::new();
        modal.open_modal(ModalOptions::new(ModalKind::Alert, "t", "m", |_| {
            panic!("must not be called")
        }));
        modal.close_modal();
        assert!(!modal.is_open());
    }
}

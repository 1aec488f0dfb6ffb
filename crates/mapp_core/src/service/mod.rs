//! Use-case flows that combine modal answers with store mutations.
//!
//! # Responsibility
//! - Ask the user through `ModalService`, then apply the answer to `NoteStore`.
//! - Keep presentation callers free of prompt/confirm plumbing.

pub mod sidebar_service;

//! Flutter bridge crate for mApp Mental.
//!
//! `api` holds every Dart-visible call; bindings are generated from it.

pub mod api;

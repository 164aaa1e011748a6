//! Functional core for the fundoo notes backend.
//!
//! Pure domain types and functions, plus the traits every external
//! collaborator (store, cache, notifier, file store, password hasher)
//! implements. Nothing in this crate performs I/O.

pub mod auth;
pub mod cache;
pub mod files;
pub mod notes;
pub mod notify;
pub mod response;
pub mod storage;

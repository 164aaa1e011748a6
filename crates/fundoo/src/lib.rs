//! Fundoo notes backend.
//!
//! Storage and cache backends, the cached data-access services built on
//! them, and the response-envelope services the CLI drives.

pub mod access;
pub mod auth;
pub mod cache;
pub mod cli;
pub mod config;
pub mod files;
pub mod notify;
pub mod service;
pub mod state;
pub mod storage;

//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `fundoo_core::storage`. The in-memory repository is always
//! built so the access services can be tested without a database; which
//! backend the binary wires up is selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//! - `inmemory`: HashMap-backed storage, data is lost on exit
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p fundoo
//! ```
//!
//! Build with in-memory storage:
//! ```bash
//! cargo build -p fundoo --no-default-features --features inmemory,memory
//! ```

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'sqlite' or 'inmemory' feature. \
    Example: cargo build -p fundoo --features sqlite"
);

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub mod inmemory;

pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

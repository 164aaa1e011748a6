//! Entity data access services.
//!
//! Each service owns the caching recipe for one entity: reads go through the
//! cache and fall back to the store, mutations write the store first and
//! then apply the entity's declared invalidation set from
//! `fundoo_core::cache`.

mod cached;
mod collab;
mod error;
mod label;
mod notes;
mod sharing;
mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use collab::CollabAccess;
pub use error::{AccessError, AccessResult, Outcome};
pub use label::LabelAccess;
pub use notes::NoteAccess;
pub use user::{UserAccess, DEFAULT_RESET_PASSWORD_URL};

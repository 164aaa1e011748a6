//! Application services.
//!
//! Thin wrappers over the access services that turn every result into the
//! `{ success, message, data }` envelope. Nothing past this layer sees an
//! error value.

mod collab;
mod label;
mod notes;
mod user;

pub use collab::CollabService;
pub use label::LabelService;
pub use notes::NotesService;
pub use user::UserService;

use tracing::{debug, error};

use fundoo_core::response::Response;

use crate::access::{AccessError, AccessResult};

/// Converts an access result into the response envelope, logging failures.
pub(crate) fn respond<T>(operation: &'static str, result: AccessResult<T>) -> Response<T> {
    match result {
        Ok(outcome) => Response {
            success: true,
            message: outcome.message,
            data: outcome.data,
        },
        Err(err @ (AccessError::Repository(_) | AccessError::Unexpected(_))) => {
            error!(operation, error = %err, "Operation failed");
            Response::fail(err.to_string())
        }
        Err(err) => {
            debug!(operation, reason = %err, "Operation rejected");
            Response::fail(err.to_string())
        }
    }
}

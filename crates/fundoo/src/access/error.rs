use thiserror::Error;

use fundoo_core::auth::PasswordError;
use fundoo_core::files::{FileStoreError, ImageValidationError};
use fundoo_core::notes::ValidationError;
use fundoo_core::storage::RepositoryError;

/// Errors returned by the data access services.
///
/// Every variant except `Repository` carries the message shown to the
/// caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("{0}")]
    Unexpected(String),
}

impl AccessError {
    pub(crate) fn not_found(message: &str) -> Self {
        AccessError::NotFound(message.to_string())
    }

    pub(crate) fn already_exists(message: &str) -> Self {
        AccessError::AlreadyExists(message.to_string())
    }

    pub(crate) fn unauthorized(message: &str) -> Self {
        AccessError::Unauthorized(message.to_string())
    }
}

impl From<ValidationError> for AccessError {
    fn from(err: ValidationError) -> Self {
        AccessError::Validation(err.to_string())
    }
}

impl From<ImageValidationError> for AccessError {
    fn from(err: ImageValidationError) -> Self {
        AccessError::Validation(err.to_string())
    }
}

impl From<PasswordError> for AccessError {
    fn from(err: PasswordError) -> Self {
        AccessError::Unexpected(err.to_string())
    }
}

impl From<FileStoreError> for AccessError {
    fn from(err: FileStoreError) -> Self {
        AccessError::Unexpected(err.to_string())
    }
}

/// Maps a store-side uniqueness violation to the caller-facing message.
pub(crate) fn conflict_as(message: &'static str) -> impl Fn(RepositoryError) -> AccessError {
    move |err| match err {
        RepositoryError::AlreadyExists { .. } => AccessError::already_exists(message),
        other => AccessError::Repository(other),
    }
}

/// Maps a store-side missing row to the caller-facing message.
pub(crate) fn missing_as(message: &'static str) -> impl Fn(RepositoryError) -> AccessError {
    move |err| match err {
        RepositoryError::NotFound { .. } => AccessError::not_found(message),
        other => AccessError::Repository(other),
    }
}

/// A successful operation: the message for the caller, plus data when the
/// operation returns any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub message: String,
    pub data: Option<T>,
}

impl<T> Outcome<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn done(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// Result type for data access operations.
pub type AccessResult<T> = std::result::Result<Outcome<T>, AccessError>;

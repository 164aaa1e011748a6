use thiserror::Error;

/// Errors raised when a request fails input validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("First Name should start with a capital letter and have at least 3 characters.")]
    InvalidFirstName,
    #[error("Last Name should start with a capital letter and have at least 3 characters.")]
    InvalidLastName,
    #[error("Email must be a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least 6 characters long, contain at least one uppercase letter, one lowercase letter, and one number.")]
    WeakPassword,
    #[error("Note title cannot be empty")]
    EmptyTitle,
    #[error("Background color cannot be empty")]
    EmptyBackgroundColor,
    #[error("Label name cannot be empty")]
    EmptyLabelName,
}

//! Password hashing seam.

use thiserror::Error;

/// Errors raised while hashing or checking a password.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashFailed(String),
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// One-way password hashing.
///
/// Hashing is CPU-bound, so the trait is synchronous.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a self-describing string.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// A wrong password is `Ok(false)`; only an unreadable hash is an error.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

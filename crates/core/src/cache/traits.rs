use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Key-value cache with string values and list values.
///
/// Values are opaque bytes; see [`super::serialize`] for the JSON encoding
/// every caller uses.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a key, whether it holds a value or a list.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Appends an element to the list at `key`, creating the list if needed.
    async fn list_push(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns every element of the list at `key`, oldest first.
    ///
    /// A missing key yields an empty list.
    async fn list_range(&self, key: &str) -> Result<Vec<Vec<u8>>>;

    /// Sets the expiry of an existing key.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<()>;
}

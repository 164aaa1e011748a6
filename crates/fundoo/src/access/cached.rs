//! Cache-aside helpers shared by the access services.
//!
//! Cache failures never fail an operation: each helper logs at `warn` and
//! reports a miss. An undecodable payload is deleted so the next read
//! repopulates it from the store.

use std::time::Duration;

use futures_util::future::join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{trace, warn};

use fundoo_core::cache::{deserialize, deserialize_list, serialize, Cache};

/// Reads a JSON value. `None` on a miss, a cache error or a bad payload.
pub(crate) async fn read<T, C>(cache: &C, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    C: Cache + ?Sized,
{
    match cache.get(key).await {
        Ok(Some(bytes)) => match deserialize(&bytes) {
            Ok(value) => {
                trace!(key, "Cache hit");
                Some(value)
            }
            Err(err) => {
                warn!(key, error = %err, "Cached value unreadable, evicting");
                delete(cache, key).await;
                None
            }
        },
        Ok(None) => {
            trace!(key, "Cache miss");
            None
        }
        Err(err) => {
            warn!(key, error = %err, "Cache read failed");
            None
        }
    }
}

/// Writes a JSON value under every key with the given TTL.
pub(crate) async fn write<T, C>(cache: &C, keys: &[String], value: &T, ttl: Duration)
where
    T: Serialize + ?Sized,
    C: Cache + ?Sized,
{
    if keys.is_empty() {
        return;
    }
    let bytes = match serialize(value) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = %err, "Failed to serialize cache value");
            return;
        }
    };

    let results = join_all(
        keys.iter()
            .map(|key| cache.set(key, &bytes, Some(ttl))),
    )
    .await;
    for (key, result) in keys.iter().zip(results) {
        if let Err(err) = result {
            warn!(key = %key, error = %err, "Cache write failed");
        }
    }
}

/// Deletes one key.
pub(crate) async fn delete<C: Cache + ?Sized>(cache: &C, key: &str) {
    if let Err(err) = cache.delete(key).await {
        warn!(key, error = %err, "Cache delete failed");
    }
}

/// Deletes every key.
pub(crate) async fn evict<C: Cache + ?Sized>(cache: &C, keys: &[String]) {
    join_all(keys.iter().map(|key| delete(cache, key))).await;
}

/// Reads a cached list. An empty list counts as a miss.
pub(crate) async fn read_list<T, C>(cache: &C, key: &str) -> Option<Vec<T>>
where
    T: DeserializeOwned,
    C: Cache + ?Sized,
{
    let items = match cache.list_range(key).await {
        Ok(items) if items.is_empty() => {
            trace!(key, "Cache miss");
            return None;
        }
        Ok(items) => items,
        Err(err) => {
            warn!(key, error = %err, "Cache list read failed");
            return None;
        }
    };

    match deserialize_list(&items) {
        Ok(values) => {
            trace!(key, "Cache hit");
            Some(values)
        }
        Err(err) => {
            warn!(key, error = %err, "Cached list unreadable, evicting");
            delete(cache, key).await;
            None
        }
    }
}

/// Replaces a cached list with `values`. An empty list leaves the key absent.
pub(crate) async fn write_list<T, C>(cache: &C, key: &str, values: &[T], ttl: Duration)
where
    T: Serialize,
    C: Cache + ?Sized,
{
    delete(cache, key).await;
    if values.is_empty() {
        return;
    }
    for value in values {
        if !push(cache, key, value).await {
            delete(cache, key).await;
            return;
        }
    }
    touch(cache, key, ttl).await;
}

/// Appends to a cached list that already exists, then resets its TTL.
///
/// An absent list stays absent: a lone element would hide the rows the
/// store still holds.
pub(crate) async fn append_list<T, C>(cache: &C, key: &str, value: &T, ttl: Duration)
where
    T: Serialize,
    C: Cache + ?Sized,
{
    match cache.list_range(key).await {
        Ok(items) if items.is_empty() => return,
        Ok(_) => {}
        Err(err) => {
            warn!(key, error = %err, "Cache list read failed");
            delete(cache, key).await;
            return;
        }
    }
    if push(cache, key, value).await {
        touch(cache, key, ttl).await;
    } else {
        delete(cache, key).await;
    }
}

async fn push<T, C>(cache: &C, key: &str, value: &T) -> bool
where
    T: Serialize,
    C: Cache + ?Sized,
{
    let bytes = match serialize(value) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(key, error = %err, "Failed to serialize cache value");
            return false;
        }
    };
    match cache.list_push(key, &bytes).await {
        Ok(()) => true,
        Err(err) => {
            warn!(key, error = %err, "Cache list push failed");
            false
        }
    }
}

async fn touch<C: Cache + ?Sized>(cache: &C, key: &str, ttl: Duration) {
    if let Err(err) = cache.expire(key, ttl).await {
        warn!(key, error = %err, "Cache expire failed");
    }
}

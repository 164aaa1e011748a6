//! In-process `Cache` over an LRU map.
//!
//! Values and lists share one LRU store. Expiry is lazy: an expired entry
//! reads as missing and is dropped on the next write to its key.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use fundoo_core::cache::{Cache, CacheError, Result};

#[derive(Debug, Clone)]
enum Slot {
    Value(Vec<u8>),
    List(Vec<Vec<u8>>),
}

/// One key's slot and its optional deadline.
#[derive(Debug, Clone)]
struct CacheEntry {
    slot: Slot,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(slot: Slot, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { slot, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// Process-local cache with a bounded key count.
///
/// Clones share the same store. Once full, the least recently used key is
/// dropped to make room.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` keys.
    ///
    /// A zero capacity is raised to one.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Number of live (unexpired) keys.
    pub async fn len(&self) -> usize {
        let store = self.store.read().await;
        store.iter().filter(|(_, entry)| !entry.is_expired()).count()
    }

    /// Returns true when no live key is held.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn wrong_type(key: &str) -> CacheError {
    CacheError::OperationFailed(format!(
        "WRONGTYPE operation against key '{}' holding the wrong kind of value",
        key
    ))
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => Ok(None),
            Some(CacheEntry {
                slot: Slot::Value(value),
                ..
            }) => Ok(Some(value.clone())),
            Some(_) => Err(wrong_type(key)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(
            key.to_string(),
            CacheEntry::new(Slot::Value(value.to_vec()), ttl),
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }

    async fn list_push(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut store = self.store.write().await;

        match store.get_mut(key) {
            Some(entry) if entry.is_expired() => {
                *entry = CacheEntry::new(Slot::List(vec![value.to_vec()]), None);
            }
            Some(CacheEntry {
                slot: Slot::List(items),
                ..
            }) => items.push(value.to_vec()),
            Some(_) => return Err(wrong_type(key)),
            None => {
                store.put(
                    key.to_string(),
                    CacheEntry::new(Slot::List(vec![value.to_vec()]), None),
                );
            }
        }
        Ok(())
    }

    async fn list_range(&self, key: &str) -> Result<Vec<Vec<u8>>> {
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => Ok(Vec::new()),
            Some(CacheEntry {
                slot: Slot::List(items),
                ..
            }) => Ok(items.clone()),
            Some(_) => Err(wrong_type(key)),
            None => Ok(Vec::new()),
        }
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<()> {
        let mut store = self.store.write().await;

        if let Some(entry) = store.get_mut(key) {
            if !entry.is_expired() {
                entry.expires_at = Some(Instant::now() + ttl);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPACITY: usize = 1000;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new(CAPACITY);

        cache.set("note:1", b"groceries", None).await.unwrap();
        let result = cache.get("note:1").await.unwrap();

        assert_eq!(result, Some(b"groceries".to_vec()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = MemoryCache::new(CAPACITY);

        assert_eq!(cache.get("note:404").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::new(CAPACITY);

        cache.set("note:1", b"x", None).await.unwrap();
        cache.delete("note:1").await.unwrap();

        assert!(cache.get("note:1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let cache = MemoryCache::new(CAPACITY);

        assert!(cache.delete("note:404").await.is_ok());
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = MemoryCache::new(CAPACITY);

        cache
            .set("note:1", b"short-lived", Some(Duration::from_millis(50)))
            .await
            .unwrap();
        assert!(cache.get("note:1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get("note:1").await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_push_and_range() {
        let cache = MemoryCache::new(CAPACITY);

        cache.list_push("note:1:collaborators", b"bob").await.unwrap();
        cache.list_push("note:1:collaborators", b"carol").await.unwrap();

        let items = cache.list_range("note:1:collaborators").await.unwrap();
        assert_eq!(items, vec![b"bob".to_vec(), b"carol".to_vec()]);
    }

    #[tokio::test]
    async fn test_list_range_missing_is_empty() {
        let cache = MemoryCache::new(CAPACITY);

        assert!(cache.list_range("note:9:collaborators").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expire_applies_to_list() {
        let cache = MemoryCache::new(CAPACITY);

        cache.list_push("note:1:collaborators", b"bob").await.unwrap();
        cache
            .expire("note:1:collaborators", Duration::from_millis(50))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.list_range("note:1:collaborators").await.unwrap().is_empty());

        // Pushing onto an expired list starts a fresh one.
        cache.list_push("note:1:collaborators", b"carol").await.unwrap();
        let items = cache.list_range("note:1:collaborators").await.unwrap();
        assert_eq!(items, vec![b"carol".to_vec()]);
    }

    #[tokio::test]
    async fn test_wrong_type_is_an_error() {
        let cache = MemoryCache::new(CAPACITY);

        cache.set("note:1", b"x", None).await.unwrap();
        cache.list_push("note:2:collaborators", b"bob").await.unwrap();

        assert!(cache.list_push("note:1", b"y").await.is_err());
        assert!(cache.get("note:2:collaborators").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_removes_list() {
        let cache = MemoryCache::new(CAPACITY);

        cache.list_push("note:1:collaborators", b"bob").await.unwrap();
        cache.delete("note:1:collaborators").await.unwrap();

        assert!(cache.list_range("note:1:collaborators").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_least_recently_read_note_is_evicted_first() {
        let cache = MemoryCache::new(3);
        for id in 1..=3 {
            cache.set(&format!("note:{id}"), b"{}", None).await.unwrap();
        }
        cache.get("note:1").await.unwrap();

        cache.set("note:4", b"{}", None).await.unwrap();

        let mut held = Vec::new();
        for id in 1..=4 {
            if cache.get(&format!("note:{id}")).await.unwrap().is_some() {
                held.push(id);
            }
        }
        assert_eq!(held, vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn test_zero_max_entries_holds_one() {
        let cache = MemoryCache::new(0);

        cache.set("note:1", b"{}", None).await.unwrap();
        cache.set("note:2", b"{}", None).await.unwrap();

        assert_eq!(cache.len().await, 1);
        assert!(cache.get("note:2").await.unwrap().is_some());
    }
}

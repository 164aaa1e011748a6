//! Application state.
//!
//! Wires the concrete store and cache selected by feature flags into the
//! four services. Which backends exist is validated at compile time in
//! `storage` and `cache`.

use std::sync::Arc;

use crate::access::{CollabAccess, LabelAccess, NoteAccess, UserAccess};
use crate::config::Config;
use crate::files::LocalFileStore;
use crate::service::{CollabService, LabelService, NotesService, UserService};

#[cfg(feature = "sqlite")]
pub type Store = crate::storage::SqliteRepository;
#[cfg(not(feature = "sqlite"))]
pub type Store = crate::storage::InMemoryRepository;

#[cfg(feature = "redis")]
pub type CacheBackend = crate::cache::RedisCache;
#[cfg(not(feature = "redis"))]
pub type CacheBackend = crate::cache::MemoryCache;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService<Store, CacheBackend>>,
    pub notes: Arc<NotesService<Store, CacheBackend>>,
    pub labels: Arc<LabelService<Store, CacheBackend>>,
    pub collabs: Arc<CollabService<Store, CacheBackend>>,
}

impl AppState {
    /// Creates the services over one store and one cache.
    pub fn build(repository: Arc<Store>, cache: Arc<CacheBackend>, config: &Config) -> Self {
        let ttl = config.cache_ttl();
        let files = Arc::new(LocalFileStore::new(&config.uploads_dir));

        let users = UserAccess::new(repository.clone(), cache.clone(), ttl)
            .with_reset_url(config.reset_password_url.clone());
        let notes = NoteAccess::new(repository.clone(), cache.clone(), files, ttl);
        let labels = LabelAccess::new(repository.clone(), cache.clone(), ttl);
        let collabs = CollabAccess::new(repository, cache, ttl);

        Self {
            users: Arc::new(UserService::new(users)),
            notes: Arc::new(NotesService::new(notes)),
            labels: Arc::new(LabelService::new(labels)),
            collabs: Arc::new(CollabService::new(collabs)),
        }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            tracing::info!(path = %config.sqlite_path, "Using SQLite storage with in-memory cache");
            Ok(Self::build(sqlite_repo, memory_cache, config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            tracing::info!(path = %config.sqlite_path, "Using SQLite storage with Redis cache");
            Ok(Self::build(sqlite_repo, redis_cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(InMemoryRepository::new());
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            tracing::info!("Using in-memory storage with in-memory cache");
            Ok(Self::build(repository, memory_cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(InMemoryRepository::new());
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            tracing::info!("Using in-memory storage with Redis cache");
            Ok(Self::build(repository, redis_cache, config))
        }
    }
}

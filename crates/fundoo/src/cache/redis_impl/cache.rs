//! Redis-backed `Cache`.
//!
//! Plain values are Redis strings; lists are Redis lists (`RPUSH` /
//! `LRANGE`). TTLs are whole seconds, rounded up to at least one.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use fundoo_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Whole seconds, rounding any fraction up. Zero becomes one.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs()
        .saturating_add(u64::from(ttl.subsec_nanos() > 0))
        .max(1)
}

/// Cache backed by a Redis server.
///
/// The connection manager reconnects on its own; each call clones the handle.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Connects to the server at `url`.
    ///
    /// Fails with `CacheError::ConnectionFailed` when the server is unreachable.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(map_redis_error)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();
        let written = match ttl {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl_seconds(ttl)).await,
            None => conn.set::<_, _, ()>(key, value).await,
        };
        written.map_err(map_redis_error)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del(key).await.map_err(map_redis_error)
    }

    async fn list_push(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.rpush::<_, _, ()>(key, value)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn list_range(&self, key: &str) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.clone();
        conn.lrange(key, 0, -1).await.map_err(map_redis_error)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let seconds = i64::try_from(ttl_seconds(ttl)).unwrap_or(i64::MAX);
        conn.expire::<_, ()>(key, seconds)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}

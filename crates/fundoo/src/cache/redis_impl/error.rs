//! Maps `redis::RedisError` onto `CacheError`.

use fundoo_core::cache::CacheError;
use redis::{ErrorKind, RedisError};

pub(super) fn map_redis_error(err: RedisError) -> CacheError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        return CacheError::ConnectionFailed(err.to_string());
    }
    match err.kind() {
        // Reply could not be converted to the requested Rust type
        ErrorKind::TypeError => CacheError::Serialization(err.to_string()),
        _ => CacheError::OperationFailed(err.to_string()),
    }
}

//! Cache backend implementations.
//!
//! Concrete implementations of `fundoo_core::cache::Cache`. The in-memory
//! cache is always built (tests use it); which backend the binary wires up
//! is chosen at compile time.
//!
//! # Feature Flags
//!
//! - `memory` (default): in-process LRU cache
//! - `redis`: Redis cache using the redis crate

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one cache backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No cache backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p fundoo --no-default-features --features sqlite,redis"
);

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;

//! In-memory cache backend for single-instance deployments and tests.

mod cache;

pub use cache::MemoryCache;

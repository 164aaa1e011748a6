use std::{env, time::Duration};

use crate::access::DEFAULT_RESET_PASSWORD_URL;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds (default: 1800)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "fundoo.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Directory uploaded note images are written under (default: "Uploads")
    pub uploads_dir: String,
    /// Page linked from reset-password emails
    pub reset_password_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 1800)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "fundoo.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `UPLOADS_DIR` - Image upload directory (default: "Uploads")
    /// - `RESET_PASSWORD_URL` - Reset page URL (default: "http://localhost:5000/resetpassword")
    pub fn from_env() -> Self {
        Self {
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30 * 60),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "fundoo.db".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "Uploads".to_string()),
            reset_password_url: env::var("RESET_PASSWORD_URL")
                .unwrap_or_else(|_| DEFAULT_RESET_PASSWORD_URL.to_string()),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_ttl_conversion() {
        let config = Config {
            cache_ttl_seconds: 600,
            cache_max_entries: 10_000,
            sqlite_path: "test.db".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            uploads_dir: "Uploads".to_string(),
            reset_password_url: DEFAULT_RESET_PASSWORD_URL.to_string(),
        };

        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("CACHE_TTL_SECONDS");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("SQLITE_PATH");
        env::remove_var("REDIS_URL");
        env::remove_var("UPLOADS_DIR");
        env::remove_var("RESET_PASSWORD_URL");

        let config = Config::from_env();

        assert_eq!(config.cache_ttl(), Duration::from_secs(1800));
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.sqlite_path, "fundoo.db");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.uploads_dir, "Uploads");
        assert_eq!(
            config.reset_password_url,
            "http://localhost:5000/resetpassword"
        );
    }
}

//! Service configuration
//!
//! Loaded from `POSTCACHE_*` environment variables with defaults that
//! reproduce the reference deployment: local Redis and MongoDB, the public
//! JSONPlaceholder origin, and a 5 second cache TTL.

use std::env;
use std::time::Duration;

/// Runtime configuration for the lookup service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,

    /// Redis connection URL for the cache tier.
    pub redis_url: String,

    /// MongoDB connection URL for the store tier.
    pub mongodb_url: String,

    /// Database holding the posts collection.
    pub mongodb_database: String,

    /// Collection the posts live in.
    pub mongodb_collection: String,

    /// Base URL of the origin API.
    pub origin_url: String,

    /// TTL applied to every cache entry.
    pub cache_ttl: Duration,

    /// Bound on any single external call (cache, store, origin).
    pub tier_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3333".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            mongodb_url: "mongodb://127.0.0.1:27017".to_string(),
            mongodb_database: "local".to_string(),
            mongodb_collection: "posts".to_string(),
            origin_url: "https://jsonplaceholder.typicode.com".to_string(),
            cache_ttl: Duration::from_secs(5),
            tier_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Environment variables:
    /// - `POSTCACHE_BIND_ADDR`: HTTP listen address (default: 127.0.0.1:3333)
    /// - `POSTCACHE_REDIS_URL`: cache tier URL (default: redis://127.0.0.1:6379)
    /// - `POSTCACHE_MONGODB_URL`: store tier URL (default: mongodb://127.0.0.1:27017)
    /// - `POSTCACHE_MONGODB_DATABASE`: database name (default: local)
    /// - `POSTCACHE_MONGODB_COLLECTION`: collection name (default: posts)
    /// - `POSTCACHE_ORIGIN_URL`: origin API base URL (default: https://jsonplaceholder.typicode.com)
    /// - `POSTCACHE_CACHE_TTL_SECS`: cache entry TTL in seconds (default: 5)
    /// - `POSTCACHE_TIER_TIMEOUT_SECS`: per-call timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: env_or("POSTCACHE_BIND_ADDR", defaults.bind_addr),
            redis_url: env_or("POSTCACHE_REDIS_URL", defaults.redis_url),
            mongodb_url: env_or("POSTCACHE_MONGODB_URL", defaults.mongodb_url),
            mongodb_database: env_or("POSTCACHE_MONGODB_DATABASE", defaults.mongodb_database),
            mongodb_collection: env_or(
                "POSTCACHE_MONGODB_COLLECTION",
                defaults.mongodb_collection,
            ),
            origin_url: env_or("POSTCACHE_ORIGIN_URL", defaults.origin_url),
            cache_ttl: env_secs_or("POSTCACHE_CACHE_TTL_SECS", defaults.cache_ttl),
            tier_timeout: env_secs_or("POSTCACHE_TIER_TIMEOUT_SECS", defaults.tier_timeout),
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    env::var(name).ok().filter(|v| !v.is_empty()).unwrap_or(default)
}

fn env_secs_or(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

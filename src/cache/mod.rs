//! Cache tier
//!
//! Volatile key-value tier consulted first on every lookup. Entries are
//! derived data with a fixed TTL; the cache's own expiration is the only
//! thing that ever removes them. A miss and an unreachable cache are
//! distinct outcomes at this layer, even though the orchestrator treats
//! both as "fall through to the store".

mod redis_cache;

pub use redis_cache::RedisCache;

use async_trait::async_trait;
use std::time::Duration;

use crate::types::Document;

/// Errors from the cache tier.
///
/// "Not found" is not an error — `get` returns `Ok(None)` for a miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Connection, protocol, or timeout failure talking to the cache
    /// service. The orchestrator degrades this to a miss.
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    /// A cached value that could not be decoded back into a document.
    #[error("cache entry corrupt: {0}")]
    Corrupt(String),
}

/// Volatile document cache: get/put with a uniform TTL.
#[async_trait]
pub trait DocumentCache: Send + Sync {
    /// Fetch a cached document. `Ok(None)` is a miss.
    async fn get(&self, key: &str) -> Result<Option<Document>, CacheError>;

    /// Store a document under `key` with the given TTL.
    async fn put(&self, key: &str, doc: &Document, ttl: Duration) -> Result<(), CacheError>;
}

//! Redis-backed cache tier
//!
//! Values are the JSON-serialized document under the `"post-<id>"` key.
//! The connection manager is built once at startup and shared; it
//! multiplexes commands and reconnects on its own, so no per-call
//! connection setup happens here.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, trace};

use super::{CacheError, DocumentCache};
use crate::types::Document;

/// Cache adapter over a shared Redis connection.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    /// Upper bound on any single round trip; elapsing counts as unavailable.
    op_timeout: Duration,
}

impl RedisCache {
    /// Connect to Redis and build the shared connection manager.
    pub async fn connect(url: &str, op_timeout: Duration) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::Unavailable(format!("invalid redis url: {}", e)))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        debug!(url = url, "Connected to Redis");
        Ok(Self { conn, op_timeout })
    }

    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, redis::RedisError>>,
    ) -> Result<T, CacheError> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(res) => res.map_err(|e| CacheError::Unavailable(e.to_string())),
            Err(_) => Err(CacheError::Unavailable(format!(
                "redis call exceeded {:?}",
                self.op_timeout
            ))),
        }
    }
}

#[async_trait]
impl DocumentCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Document>, CacheError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = self.bounded(conn.get(key)).await?;

        match raw {
            Some(payload) => {
                let doc: Document = serde_json::from_str(&payload)
                    .map_err(|e| CacheError::Corrupt(format!("{}: {}", key, e)))?;
                trace!(key = key, "Redis GET hit");
                Ok(Some(doc))
            }
            None => {
                trace!(key = key, "Redis GET miss");
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &str, doc: &Document, ttl: Duration) -> Result<(), CacheError> {
        let payload = serde_json::to_string(doc)
            .map_err(|e| CacheError::Corrupt(format!("{}: {}", key, e)))?;

        let mut conn = self.conn.clone();
        // SETEX takes whole seconds; sub-second TTLs round up to 1s rather
        // than becoming "no expiry".
        let secs = ttl.as_secs().max(1);
        let _: () = self.bounded(conn.set_ex(key, payload, secs)).await?;
        trace!(key = key, ttl_secs = secs, "Redis SETEX");
        Ok(())
    }
}

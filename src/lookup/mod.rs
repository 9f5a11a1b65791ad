//! Tiered lookup orchestrator
//!
//! The core of the service: one lookup consults cache, then store, then
//! origin, in that order, each tier at most once, and writes the result
//! back into the faster tiers on the way out.
//!
//! Tier failure policy:
//! - Cache unreachable is treated as a miss on read and ignored on write;
//!   the cache is purely an optimization layer.
//! - Store unreachable on the *read* path fails the request with
//!   `BackendUnavailable` — falling through to the origin would mask a real
//!   outage behind origin traffic.
//! - Store unreachable on the *write-back* path (after the origin already
//!   produced the document) does not fail the request; the next cold lookup
//!   re-attempts the insert.
//! - A lost insert race (`AlreadyExists`) keeps the freshly fetched
//!   document without re-reading the store; both copies carry the same
//!   content, so no inconsistency results.

mod observer;

pub use observer::{LogObserver, LookupObserver, Tier};

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::cache::DocumentCache;
use crate::error::LookupError;
use crate::origin::Origin;
use crate::store::{DocumentStore, InsertOutcome};
use crate::types::{Document, PostId};

/// Orchestrates one lookup across the three tiers.
///
/// Holds one handle per tier for the process lifetime; the adapters own
/// whatever pooling their client libraries provide.
pub struct TieredLookup<C, S, O> {
    cache: C,
    store: S,
    origin: O,
    cache_ttl: Duration,
    observer: Arc<dyn LookupObserver>,
}

impl<C, S, O> TieredLookup<C, S, O>
where
    C: DocumentCache,
    S: DocumentStore,
    O: Origin,
{
    /// Build an orchestrator with the default tracing observer.
    pub fn new(cache: C, store: S, origin: O, cache_ttl: Duration) -> Self {
        Self {
            cache,
            store,
            origin,
            cache_ttl,
            observer: Arc::new(LogObserver),
        }
    }

    /// Replace the observer hook.
    pub fn with_observer(mut self, observer: Arc<dyn LookupObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Resolve `raw_id` to a document.
    ///
    /// Every tier is consulted at most once; nothing is retried. The
    /// returned document is always fully resolved, whichever tier served it.
    pub async fn lookup(&self, raw_id: &str) -> Result<Document, LookupError> {
        let id = PostId::parse(raw_id)?;
        let key = id.cache_key();

        // Tier 1: cache. Unreachable degrades to a miss.
        match self.cache.get(&key).await {
            Ok(Some(doc)) => {
                self.observer.tier_hit(Tier::Cache, id);
                return Ok(doc);
            }
            Ok(None) => self.observer.tier_miss(Tier::Cache, id),
            Err(e) => {
                warn!(id = %id, error = %e, "Cache read failed, treating as miss");
                self.observer.tier_unavailable(Tier::Cache, id);
            }
        }

        // Tier 2: store. Unreachable fails the request.
        match self.store.find_by_id(id).await {
            Ok(Some(doc)) => {
                self.observer.tier_hit(Tier::Store, id);
                self.populate_cache(id, &key, &doc).await;
                return Ok(doc);
            }
            Ok(None) => self.observer.tier_miss(Tier::Store, id),
            Err(e) => {
                self.observer.tier_unavailable(Tier::Store, id);
                return Err(LookupError::BackendUnavailable(e.to_string()));
            }
        }

        // Tier 3: origin. Failure propagates immediately; no tier is
        // populated with a document we never obtained.
        let doc = match self.origin.fetch(id).await {
            Ok(doc) => {
                self.observer.tier_hit(Tier::Origin, id);
                doc
            }
            Err(e) => {
                self.observer.tier_unavailable(Tier::Origin, id);
                return Err(LookupError::OriginUnavailable(e.to_string()));
            }
        };

        // Write-back: persist, then cache. The store's unique constraint is
        // the only duplicate guard; a lost race is not an error.
        match self.store.insert_if_absent(id, &doc).await {
            Ok(InsertOutcome::Inserted) => {}
            Ok(InsertOutcome::AlreadyExists) => {
                warn!(id = %id, "Concurrent lookup already persisted this post");
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Store write-back failed, serving origin copy");
            }
        }

        self.populate_cache(id, &key, &doc).await;
        Ok(doc)
    }

    /// Best-effort cache write-back; failure is logged, never surfaced.
    async fn populate_cache(&self, id: PostId, key: &str, doc: &Document) {
        if let Err(e) = self.cache.put(key, doc, self.cache_ttl).await {
            warn!(id = %id, error = %e, "Cache write-back failed");
            self.observer.tier_unavailable(Tier::Cache, id);
        }
    }
}

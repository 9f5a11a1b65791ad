//! In-memory tier doubles for exercising the orchestrator.
//!
//! Each double counts its calls so tests can assert exactly which tiers a
//! lookup touched. State lives behind `Arc<Mutex>` so a double can be
//! cloned into the orchestrator while the test keeps a handle for
//! inspection.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use postcache::cache::{CacheError, DocumentCache};
use postcache::lookup::{LookupObserver, Tier};
use postcache::origin::{Origin, OriginError};
use postcache::store::{DocumentStore, InsertOutcome, StoreError};
use postcache::types::{Document, PostId};

/// Build a document with the shape the origin serves.
pub fn post_doc(id: i64, title: &str) -> Document {
    let mut doc = Document::new();
    doc.insert("id".to_string(), serde_json::json!(id));
    doc.insert("title".to_string(), serde_json::json!(title));
    doc.insert("body".to_string(), serde_json::json!("lorem ipsum"));
    doc
}

// ============================================================================
// Observer double
// ============================================================================

/// One tier consultation outcome, in the order the orchestrator saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierEvent {
    Hit(Tier),
    Miss(Tier),
    Unavailable(Tier),
}

/// Observer that records every event for later assertion.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<TierEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TierEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl LookupObserver for RecordingObserver {
    fn tier_hit(&self, tier: Tier, _id: PostId) {
        self.events.lock().unwrap().push(TierEvent::Hit(tier));
    }

    fn tier_miss(&self, tier: Tier, _id: PostId) {
        self.events.lock().unwrap().push(TierEvent::Miss(tier));
    }

    fn tier_unavailable(&self, tier: Tier, _id: PostId) {
        self.events.lock().unwrap().push(TierEvent::Unavailable(tier));
    }
}

// ============================================================================
// Cache double
// ============================================================================

/// Counting in-memory cache. TTLs are recorded but never enforced; tests
/// simulate expiry explicitly via `expire_all`.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, Document>>>,
    gets: Arc<AtomicUsize>,
    puts: Arc<AtomicUsize>,
    /// When set, every call fails as unreachable.
    down: Arc<Mutex<bool>>,
    last_ttl: Arc<Mutex<Option<Duration>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn put_calls(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn last_ttl(&self) -> Option<Duration> {
        *self.last_ttl.lock().unwrap()
    }

    /// Simulate the cache service's own TTL expiry.
    pub fn expire_all(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn set_down(&self, down: bool) {
        *self.down.lock().unwrap() = down;
    }

    pub fn seed(&self, key: &str, doc: Document) {
        self.entries.lock().unwrap().insert(key.to_string(), doc);
    }
}

#[async_trait]
impl DocumentCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Document>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if *self.down.lock().unwrap() {
            return Err(CacheError::Unavailable("cache is down".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, doc: &Document, ttl: Duration) -> Result<(), CacheError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if *self.down.lock().unwrap() {
            return Err(CacheError::Unavailable("cache is down".to_string()));
        }
        *self.last_ttl.lock().unwrap() = Some(ttl);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), doc.clone());
        Ok(())
    }
}

// ============================================================================
// Store double
// ============================================================================

/// Counting in-memory store. `insert_if_absent` is atomic under the entry
/// mutex, mirroring the unique-index guarantee of the real store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<i64, Document>>>,
    finds: Arc<AtomicUsize>,
    insert_attempts: Arc<AtomicUsize>,
    inserts_won: Arc<AtomicUsize>,
    down: Arc<Mutex<bool>>,
    /// When set, inserts report `AlreadyExists` as if another request won
    /// the race between this request's find and its insert.
    insert_conflict: Arc<Mutex<bool>>,
    /// When set, only inserts fail; reads keep working.
    fail_inserts: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_calls(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    /// Number of insert attempts that actually created a record.
    pub fn inserts_won(&self) -> usize {
        self.inserts_won.load(Ordering::SeqCst)
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn set_down(&self, down: bool) {
        *self.down.lock().unwrap() = down;
    }

    pub fn set_insert_conflict(&self, conflict: bool) {
        *self.insert_conflict.lock().unwrap() = conflict;
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        *self.fail_inserts.lock().unwrap() = fail;
    }

    pub fn seed(&self, id: i64, doc: Document) {
        self.records.lock().unwrap().insert(id, doc);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Document>, StoreError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        if *self.down.lock().unwrap() {
            return Err(StoreError::Unavailable("store is down".to_string()));
        }
        Ok(self.records.lock().unwrap().get(&id.as_i64()).cloned())
    }

    async fn insert_if_absent(
        &self,
        id: PostId,
        doc: &Document,
    ) -> Result<InsertOutcome, StoreError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        if *self.down.lock().unwrap() || *self.fail_inserts.lock().unwrap() {
            return Err(StoreError::Unavailable("store is down".to_string()));
        }
        if *self.insert_conflict.lock().unwrap() {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&id.as_i64()) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        records.insert(id.as_i64(), doc.clone());
        self.inserts_won.fetch_add(1, Ordering::SeqCst);
        Ok(InsertOutcome::Inserted)
    }
}

// ============================================================================
// Origin double
// ============================================================================

/// Counting scripted origin. Serves the seeded document, or fails every
/// call when configured down.
#[derive(Clone, Default)]
pub struct ScriptedOrigin {
    posts: Arc<Mutex<HashMap<i64, Document>>>,
    fetches: Arc<AtomicUsize>,
    down: Arc<Mutex<bool>>,
    /// Artificial latency, to widen race windows in concurrency tests.
    delay: Arc<Mutex<Option<Duration>>>,
}

impl ScriptedOrigin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn set_down(&self, down: bool) {
        *self.down.lock().unwrap() = down;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn seed(&self, id: i64, doc: Document) {
        self.posts.lock().unwrap().insert(id, doc);
    }
}

#[async_trait]
impl Origin for ScriptedOrigin {
    async fn fetch(&self, id: PostId) -> Result<Document, OriginError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.down.lock().unwrap() {
            return Err(OriginError("origin is down".to_string()));
        }
        self.posts
            .lock()
            .unwrap()
            .get(&id.as_i64())
            .cloned()
            .ok_or_else(|| OriginError(format!("no scripted post {}", id)))
    }
}

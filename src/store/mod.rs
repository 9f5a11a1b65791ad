//! Document store tier
//!
//! Persistent tier consulted after a cache miss. Unlike the cache, this
//! tier is a durability layer: an unreachable store on the read path is a
//! real degradation and is surfaced to the caller, never treated as a miss.
//!
//! `insert_if_absent` is the de-duplication guard for the whole service:
//! it must be a single conditional operation at the store level, because
//! two concurrent cold lookups for the same id will both reach it.

mod mongo;

pub use mongo::MongoStore;

use async_trait::async_trait;

use crate::types::{Document, PostId};

/// Errors from the store tier.
///
/// "Not found" is not an error — `find_by_id` returns `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection or server failure. Must never be conflated with a miss.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A record that could not be converted between the store's native
    /// representation and a JSON document.
    #[error("store document conversion failed: {0}")]
    Convert(String),
}

/// Outcome of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// This call created the record.
    Inserted,
    /// A record for this id already existed — typically a concurrent
    /// request won the race. Not an error.
    AlreadyExists,
}

/// Persistent document store: lookup by id plus atomic conditional insert.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the record for `id`. `Ok(None)` means no record exists.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Document>, StoreError>;

    /// Insert `doc` under `id` unless a record for `id` already exists.
    ///
    /// Implementations must make the existence check and the insert one
    /// atomic operation (a unique constraint, not read-then-write), so that
    /// concurrent callers can never both insert.
    async fn insert_if_absent(
        &self,
        id: PostId,
        doc: &Document,
    ) -> Result<InsertOutcome, StoreError>;
}

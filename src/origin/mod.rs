//! Origin tier
//!
//! The remote source of truth, consulted only when both local tiers miss.
//! All failure modes (network, status, decode) collapse into one error kind
//! because the orchestrator never distinguishes them: there is no retry,
//! and the failure propagates straight to the caller.

mod client;

pub use client::HttpOrigin;

use async_trait::async_trait;

use crate::types::{Document, PostId};

/// The single origin failure kind. The detail string is for logs only.
#[derive(Debug, thiserror::Error)]
#[error("origin fetch failed: {0}")]
pub struct OriginError(pub String);

/// Remote origin for documents that exist in no local tier.
#[async_trait]
pub trait Origin: Send + Sync {
    /// Fetch the document for `id`. There is no not-found signal distinct
    /// from failure; an origin 404 is an `OriginError` like any other.
    async fn fetch(&self, id: PostId) -> Result<Document, OriginError>;
}

//! Identifiers and document payloads
//!
//! The lookup service moves exactly one shape of data around: a JSON object
//! keyed by an integer post id. Ids arrive as strings from the HTTP layer
//! and must convert cleanly to the store's native integer key; anything that
//! doesn't convert is a client error, never a panic.

use std::fmt;

use crate::error::LookupError;

/// Prefix for cache keys, matching the reference key format `"post-" + id`.
const CACHE_KEY_PREFIX: &str = "post-";

/// Opaque JSON object payload, passed through all tiers unchanged.
///
/// No schema is enforced anywhere in the core; the store converts this to
/// and from its native representation at its own boundary.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A validated post identifier.
///
/// Guaranteed non-empty and convertible to the store's integer key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(i64);

impl PostId {
    /// Parse a caller-supplied id string.
    ///
    /// Empty input and input that is not a valid integer are both rejected
    /// as `BadRequest` before any tier is contacted.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LookupError::BadRequest("missing post id".to_string()));
        }
        trimmed
            .parse::<i64>()
            .map(PostId)
            .map_err(|_| LookupError::BadRequest(format!("invalid post id: {:?}", raw)))
    }

    /// The store's native key value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// The cache key for this id (`"post-<id>"`).
    pub fn cache_key(&self) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Tier event observer hook
//!
//! Hit/miss instrumentation is peripheral to the lookup logic, so it hangs
//! off an observer trait instead of being printed inline. The default
//! `LogObserver` emits structured tracing events; tests plug in counting
//! observers via `TieredLookup::with_observer`.

use std::fmt;

use tracing::{debug, warn};

use crate::types::PostId;

/// One of the three lookup tiers, in consultation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Cache,
    Store,
    Origin,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Cache => write!(f, "cache"),
            Tier::Store => write!(f, "store"),
            Tier::Origin => write!(f, "origin"),
        }
    }
}

/// Observer for tier consultation outcomes. All methods default to no-ops.
pub trait LookupObserver: Send + Sync {
    /// The tier had the document.
    fn tier_hit(&self, _tier: Tier, _id: PostId) {}

    /// The tier was reachable but had no document.
    fn tier_miss(&self, _tier: Tier, _id: PostId) {}

    /// The tier could not be consulted at all.
    fn tier_unavailable(&self, _tier: Tier, _id: PostId) {}
}

/// Observer that emits tracing events for every tier outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl LookupObserver for LogObserver {
    fn tier_hit(&self, tier: Tier, id: PostId) {
        debug!(tier = %tier, id = %id, "Tier hit");
    }

    fn tier_miss(&self, tier: Tier, id: PostId) {
        debug!(tier = %tier, id = %id, "Tier miss");
    }

    fn tier_unavailable(&self, tier: Tier, id: PostId) {
        warn!(tier = %tier, id = %id, "Tier unavailable");
    }
}

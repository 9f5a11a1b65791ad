//! postcache — read-through tiered lookup service
//!
//! Resolves a post id to a JSON document by consulting a Redis cache, then
//! a MongoDB document store, then the remote origin API, populating the
//! faster tiers on the way back out. The tier order is fixed and each tier
//! is consulted at most once per request.
//!
//! The tier adapters sit behind traits ([`cache::DocumentCache`],
//! [`store::DocumentStore`], [`origin::Origin`]) so the orchestrator
//! ([`lookup::TieredLookup`]) can be exercised against in-memory doubles.

pub mod cache;
pub mod config;
pub mod error;
pub mod lookup;
pub mod origin;
pub mod server;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::LookupError;
pub use lookup::TieredLookup;
pub use types::{Document, PostId};

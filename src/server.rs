//! HTTP surface
//!
//! One lookup endpoint plus a liveness probe. The handler is a thin shim:
//! it hands the raw path segment to the orchestrator and serializes
//! whatever comes back; all policy lives in `lookup`.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::cache::RedisCache;
use crate::error::LookupError;
use crate::lookup::TieredLookup;
use crate::origin::HttpOrigin;
use crate::store::MongoStore;

/// The production orchestrator wiring.
pub type ProdLookup = TieredLookup<RedisCache, MongoStore, HttpOrigin>;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<ProdLookup>,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/posts/:id", get(get_post))
        .route("/health", get(health))
        .with_state(state)
}

/// `GET /posts/:id` — resolve a post through the tiers and return its raw
/// JSON body.
async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, LookupError> {
    let doc = state.lookup.lookup(&id).await?;
    Ok(Json(Value::Object(doc)))
}

/// `GET /health` — liveness only; tier reachability is not probed here.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

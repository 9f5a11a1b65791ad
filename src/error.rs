//! Request-level error taxonomy
//!
//! Only three conditions ever reach the caller as an error: a malformed id,
//! an unreachable origin, and an unreachable document store. Cache misses,
//! store misses, and lost insert races are control flow, not errors, and are
//! handled inside the orchestrator.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Wire shape of an error response body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors surfaced to the caller of `lookup`.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Missing or malformed identifier. No tier was contacted.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The origin API failed: network error, non-success status, or a body
    /// that did not decode as a JSON object. Not retried.
    #[error("origin unavailable: {0}")]
    OriginUnavailable(String),

    /// The document store was unreachable on the read path. Unlike the
    /// cache, the store's outage is a genuine degradation and is surfaced
    /// rather than masked by falling through to the origin.
    #[error("document store unavailable: {0}")]
    BackendUnavailable(String),
}

impl LookupError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::BadRequest(_) => StatusCode::BAD_REQUEST,
            LookupError::OriginUnavailable(_) => StatusCode::BAD_GATEWAY,
            LookupError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

//! HTTP origin client
//!
//! Fetches post documents from the upstream JSON API with a single GET per
//! lookup. The `reqwest` client is built once with a request timeout and
//! shared across requests.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::{Origin, OriginError};
use crate::types::{Document, PostId};

/// Origin adapter over a shared HTTP client.
#[derive(Clone)]
pub struct HttpOrigin {
    http_client: Client,
    base_url: String,
}

impl HttpOrigin {
    /// Build the origin client.
    ///
    /// `base_url` is the API root (e.g. `https://jsonplaceholder.typicode.com`);
    /// posts are fetched from `<base_url>/posts/<id>`.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, OriginError> {
        let http_client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| OriginError(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn post_url(&self, id: PostId) -> String {
        format!("{}/posts/{}", self.base_url, id)
    }
}

#[async_trait]
impl Origin for HttpOrigin {
    async fn fetch(&self, id: PostId) -> Result<Document, OriginError> {
        let url = self.post_url(id);
        debug!(id = %id, url = %url, "Fetching post from origin");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| OriginError(format!("GET {}: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(OriginError(format!("GET {}: HTTP {}", url, status)));
        }

        let doc: Document = response
            .json()
            .await
            .map_err(|e| OriginError(format!("GET {}: undecodable body: {}", url, e)))?;

        debug!(id = %id, fields = doc.len(), "Fetched post from origin");
        Ok(doc)
    }
}

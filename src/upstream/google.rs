//! Google Books volumes client with timeout and error handling.
//!
//! # Responsibilities
//! - Issue GET requests against the configured volumes endpoint
//! - Enforce the per-call deadline
//! - Classify failures into `UpstreamError`

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::timeout;

use crate::catalog::raw::{json_kind, RawPage};
use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::{UpstreamError, UpstreamResult, VolumeQuery, VolumeSource};

/// reqwest-backed [`VolumeSource`] for the Google Books API.
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl GoogleBooksClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_body(&self, query: &VolumeQuery) -> UpstreamResult<Value> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&query.params())
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::MalformedBody(e.to_string()))
    }
}

#[async_trait]
impl VolumeSource for GoogleBooksClient {
    async fn fetch(&self, query: &VolumeQuery) -> UpstreamResult<RawPage> {
        let start = Instant::now();
        let deadline = Duration::from_secs(self.timeout_secs);

        let result = match timeout(deadline, self.fetch_body(query)).await {
            Ok(Ok(body)) if body.is_object() => Ok(RawPage::from_body(body)),
            Ok(Ok(body)) => Err(UpstreamError::MalformedBody(format!(
                "expected an object, got {}",
                json_kind(&body)
            ))),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(UpstreamError::Timeout(self.timeout_secs)),
        };

        match &result {
            Ok(page) => {
                tracing::debug!(
                    q = %query.q,
                    total_items = page.total_items,
                    items = page.items.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream call succeeded"
                );
                metrics::record_upstream_call("ok", start);
            }
            Err(e) => {
                tracing::warn!(
                    q = %query.q,
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream call failed"
                );
                metrics::record_upstream_call(e.kind(), start);
            }
        }

        result
    }
}

//! Outbound access to the book catalog.
//!
//! # Data Flow
//! ```text
//! Catalog (aggregator)
//!     → VolumeSource::fetch(VolumeQuery)
//!     → google.rs (reqwest GET with deadline)
//!     → RawPage or UpstreamError
//! ```
//!
//! # Design Decisions
//! - The catalog depends on the `VolumeSource` capability, not on reqwest
//! - Every call has a deadline; expiry is its own error variant
//! - No retries: a failed call is reported once and the caller degrades

pub mod google;

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::raw::RawPage;

pub use google::GoogleBooksClient;

/// Query parameters for one upstream volumes request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeQuery {
    pub q: String,
    /// Omitted from the request when `None`.
    pub start_index: Option<u64>,
    pub max_results: u32,
}

impl VolumeQuery {
    /// Query string pairs in upstream parameter naming.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.q.clone())];
        if let Some(start) = self.start_index {
            params.push(("startIndex", start.to_string()));
        }
        params.push(("maxResults", self.max_results.to_string()));
        params
    }
}

/// Failure of a single upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, DNS or protocol failure.
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    /// No complete response within the deadline.
    #[error("upstream request timed out after {0} seconds")]
    Timeout(u64),

    /// Body was not a JSON object.
    #[error("malformed upstream body: {0}")]
    MalformedBody(String),
}

impl UpstreamError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status(_) => "status",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::MalformedBody(_) => "malformed",
        }
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Capability to fetch one page of volumes from the catalog.
#[async_trait]
pub trait VolumeSource: Send + Sync {
    async fn fetch(&self, query: &VolumeQuery) -> UpstreamResult<RawPage>;
}

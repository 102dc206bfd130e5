//! Request and response types for catalog operations.

use serde::{Deserialize, Serialize};

use crate::catalog::book::NormalizedBook;
use crate::catalog::error::{CatalogError, CatalogResult};

/// Default page size for searches.
pub const DEFAULT_MAX_RESULTS: u32 = 20;
/// Largest page the upstream accepts.
pub const MAX_RESULTS_LIMIT: u32 = 40;

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    start_index: u64,
    max_results: u32,
}

impl SearchRequest {
    /// Check bounds: `start_index >= 0`, `1 <= max_results <= 40`.
    /// The query is forwarded as given, even when empty.
    pub fn new(query: impl Into<String>, start_index: i64, max_results: i64) -> CatalogResult<Self> {
        let query = query.into();

        let start_index = u64::try_from(start_index).map_err(|_| {
            CatalogError::InvalidInput(format!(
                "startIndex must be greater than or equal to 0, got {}",
                start_index
            ))
        })?;

        let max_results = u32::try_from(max_results)
            .ok()
            .filter(|n| (1..=MAX_RESULTS_LIMIT).contains(n))
            .ok_or_else(|| {
                CatalogError::InvalidInput(format!(
                    "maxResults must be between 1 and {}, got {}",
                    MAX_RESULTS_LIMIT, max_results
                ))
            })?;

        Ok(Self {
            query,
            start_index,
            max_results,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn start_index(&self) -> u64 {
        self.start_index
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }
}

/// Response of a search. `error` is only serialized for degraded results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total: u64,
    pub items: Vec<NormalizedBook>,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResult {
    /// Empty result describing why the upstream call failed.
    pub fn degraded(query: impl Into<String>, error: impl ToString) -> Self {
        Self {
            total: 0,
            items: Vec::new(),
            query: query.into(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// One curated topic on the recommendations page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSection {
    pub title: String,
    pub q: String,
    pub items: Vec<NormalizedBook>,
}

/// Response of the recommendations operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub sections: Vec<RecommendationSection>,
}

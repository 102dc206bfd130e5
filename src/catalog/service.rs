//! Query aggregation over the upstream catalog.
//!
//! Both operations always produce a well-formed response: upstream
//! failures degrade into empty results instead of propagating.

use std::sync::Arc;

use futures_util::future::join_all;
use serde_json::Value;

use crate::catalog::book::{normalize, NormalizedBook};
use crate::catalog::curated::{CuratedTopic, CURATED_TOPICS, SECTION_SIZE};
use crate::catalog::raw::RawPage;
use crate::catalog::types::{RecommendationSection, Recommendations, SearchRequest, SearchResult};
use crate::upstream::{UpstreamResult, VolumeQuery, VolumeSource};

/// Search and recommendation operations over a [`VolumeSource`].
#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn VolumeSource>,
}

impl Catalog {
    pub fn new(source: Arc<dyn VolumeSource>) -> Self {
        Self { source }
    }

    /// Run one upstream search. Never fails; upstream errors are reported
    /// in [`SearchResult::error`].
    pub async fn search(&self, request: &SearchRequest) -> SearchResult {
        let query = VolumeQuery {
            q: request.query().to_string(),
            start_index: Some(request.start_index()),
            max_results: request.max_results(),
        };

        match self.source.fetch(&query).await {
            Ok(page) => SearchResult {
                total: page.total_items,
                items: normalize_items(&page.items),
                query: query.q,
                error: None,
            },
            Err(e) => {
                tracing::warn!(q = %query.q, error = %e, "Search degraded to empty result");
                SearchResult::degraded(query.q, e)
            }
        }
    }

    /// Fetch every curated topic concurrently. Returns one section per
    /// topic in curated order; failed topics have no items.
    pub async fn recommendations(&self) -> Recommendations {
        let fetches = CURATED_TOPICS.iter().map(|topic| self.fetch_topic(topic));
        let pages = join_all(fetches).await;

        let sections = CURATED_TOPICS
            .iter()
            .zip(pages)
            .map(|(topic, page)| RecommendationSection {
                title: topic.title.to_string(),
                q: topic.q.to_string(),
                items: match page {
                    Ok(page) => normalize_items(&page.items),
                    Err(e) => {
                        tracing::warn!(topic = topic.title, error = %e, "Recommendation section left empty");
                        Vec::new()
                    }
                },
            })
            .collect();

        Recommendations { sections }
    }

    async fn fetch_topic(&self, topic: &CuratedTopic) -> UpstreamResult<RawPage> {
        let query = VolumeQuery {
            q: topic.q.to_string(),
            start_index: None,
            max_results: SECTION_SIZE,
        };
        self.source.fetch(&query).await
    }
}

/// Normalize page items, skipping entries that are not records.
fn normalize_items(items: &[Value]) -> Vec<NormalizedBook> {
    items
        .iter()
        .filter_map(|item| match normalize(item) {
            Ok(book) => Some(book),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping upstream item");
                None
            }
        })
        .collect()
}

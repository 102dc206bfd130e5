//! Route handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog::{
    CatalogError, CatalogResult, Recommendations, SearchRequest, SearchResult, DEFAULT_MAX_RESULTS,
};
use crate::http::request::RequestIdExt;
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Raw `/api/search` query string. Bounds are checked by [`SearchRequest`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub start_index: Option<i64>,
    pub max_results: Option<i64>,
}

impl SearchParams {
    pub fn into_request(self) -> CatalogResult<SearchRequest> {
        let q = self
            .q
            .ok_or_else(|| CatalogError::InvalidInput("q is required".into()))?;
        SearchRequest::new(
            q,
            self.start_index.unwrap_or(0),
            self.max_results.unwrap_or(i64::from(DEFAULT_MAX_RESULTS)),
        )
    }
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Book Search Backend is running" }))
}

pub async fn health() -> Json<SystemStatus> {
    Json(SystemStatus {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

/// `GET /api/search`
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let request_id = headers.request_id();
    let Query(params) = params.inspect_err(|e| {
        tracing::info!(request_id = %request_id, error = %e, "Rejected search query string");
    })?;
    let request = params.into_request().inspect_err(|e| {
        tracing::info!(request_id = %request_id, error = %e, "Rejected search parameters");
    })?;

    tracing::debug!(
        request_id = %request_id,
        q = %request.query(),
        start_index = request.start_index(),
        max_results = request.max_results(),
        "Searching catalog"
    );

    let result = state.catalog.search(&request).await;
    if result.is_degraded() {
        tracing::warn!(request_id = %request_id, q = %request.query(), "Serving degraded search result");
    }
    Ok(Json(result))
}

/// `GET /api/recommendations`
pub async fn recommendations(State(state): State<AppState>, headers: HeaderMap) -> Json<Recommendations> {
    let recommendations = state.catalog.recommendations().await;
    let empty = recommendations
        .sections
        .iter()
        .filter(|s| s.items.is_empty())
        .count();

    tracing::debug!(
        request_id = %headers.request_id(),
        sections = recommendations.sections.len(),
        empty_sections = empty,
        "Assembled recommendations"
    );
    Json(recommendations)
}

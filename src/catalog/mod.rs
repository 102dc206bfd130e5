//! Book catalog subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → types.rs (SearchRequest bounds check)
//!     → service.rs (Catalog: one search, or six curated topics)
//!     → upstream::VolumeSource (outbound GET)
//!     → raw.rs (lenient field access over upstream JSON)
//!     → book.rs (normalize into NormalizedBook)
//!     → SearchResult / Recommendations
//! ```
//!
//! # Design Decisions
//! - Normalization is pure and never fails on missing fields
//! - Upstream failures degrade into empty results, never errors
//! - Only caller input can be rejected (`CatalogError::InvalidInput`)

pub mod book;
pub mod curated;
pub mod error;
pub mod raw;
pub mod service;
pub mod types;

pub use book::{normalize, NormalizedBook};
pub use curated::{CuratedTopic, CURATED_TOPICS};
pub use error::{CatalogError, CatalogResult};
pub use service::Catalog;
pub use types::{
    RecommendationSection, Recommendations, SearchRequest, SearchResult, DEFAULT_MAX_RESULTS,
    MAX_RESULTS_LIMIT,
};

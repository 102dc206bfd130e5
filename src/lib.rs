//! Book search proxy library.
//!
//! Forwards searches to the Google Books volumes API, normalizes each
//! volume into a stable record and serves curated recommendation bundles.

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use catalog::{Catalog, NormalizedBook};
pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

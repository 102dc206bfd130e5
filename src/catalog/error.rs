//! Catalog error types.

use thiserror::Error;

/// Errors raised by the catalog before any upstream call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Caller-supplied data is missing or out of bounds.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

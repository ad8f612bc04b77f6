//! Failure taxonomy for catalog retrieval and search.
//!
//! None of these are retried anywhere: each is the final outcome for the
//! request that produced it.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed or missing caller input.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The upstream answered 404 for the requested resource.
    #[error("not found upstream: {path}")]
    NotFound { path: String },
    /// The upstream was reachable but answered with a failure status.
    #[error("catalog service responded {status} for {path}")]
    Upstream { status: u16, path: String },
    /// DNS, connect, timeout or reset before a status line was read.
    #[error("catalog service unreachable for {path}: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// A success response whose body is not the expected shape.
    #[error("unexpected catalog payload for {path}: {reason}")]
    InvalidPayload { path: String, reason: String },
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CatalogError::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    /// HTTP status the failure is surfaced as. Every upstream-side failure is
    /// a bad gateway to our caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Upstream { .. }
            | CatalogError::Network { .. }
            | CatalogError::InvalidPayload { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Upstream path the failure relates to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            CatalogError::Validation(_) => None,
            CatalogError::NotFound { path }
            | CatalogError::Upstream { path, .. }
            | CatalogError::Network { path, .. }
            | CatalogError::InvalidPayload { path, .. } => Some(path),
        }
    }
}

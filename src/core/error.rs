//! Error types.
//!
//! Only failures of the catalog query layer surface as errors. Every
//! "no sensible neighbor" condition is a successful [`NavOutcome`] carrying
//! absent values, so callers can omit a control without reporting a failure.
//!
//! [`NavOutcome`]: crate::nav::resolver::NavOutcome

use thiserror::Error;

/// Navigation error conditions.
#[derive(Debug, Error)]
pub enum NavError {
    /// The catalog source could not be queried.
    ///
    /// Never retried internally and never written to the cache.
    #[error("catalog unavailable: {message}")]
    CatalogUnavailable { message: String },

    /// A cache was configured with a zero time-to-live.
    #[error("cache ttl must be > 0")]
    InvalidTtl,
}

impl NavError {
    /// Create a CatalogUnavailable error.
    pub fn catalog_unavailable(message: impl Into<String>) -> Self {
        Self::CatalogUnavailable {
            message: message.into(),
        }
    }

    /// Check if this error came from the catalog query layer.
    pub fn is_catalog_failure(&self) -> bool {
        matches!(self, Self::CatalogUnavailable { .. })
    }
}

/// Result type using NavError.
pub type NavResult<T> = Result<T, NavError>;

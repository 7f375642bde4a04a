//! Error types for Vantage operations.
//!
//! The taxonomy distinguishes caller mistakes from infrastructure failures:
//!
//! - `InvalidFilter` is a client-class error: the request carried a filter
//!   value that can never match (e.g., an unknown severity). Filters are
//!   validated up front and rejected instead of silently returning an
//!   empty-looking graph. `Snapshot` is likewise client-class: an ingested
//!   snapshot that does not parse.
//! - `Database` / `Io` are infrastructure failures. Any store query failing
//!   aborts the whole graph build; there is no partial graph and no retry
//!   inside this crate (the store-access layer owns retry policy).
//! - `Internal` covers invariant breaches such as a poisoned connection lock
//!   or rows that fail to parse back into domain types.

use thiserror::Error;

/// Result type for Vantage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for Vantage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A filter value was rejected during normalization.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// A topology snapshot failed to deserialize.
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Invariant breach inside Vantage itself.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns `true` if the error is the caller's to fix (a client-class
    /// error, analogous to HTTP 4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidFilter(_) | Self::Snapshot(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_client_error() {
        assert!(Error::InvalidFilter("bad severity".into()).is_client_error());
        assert!(!Error::Internal("oops".into()).is_client_error());
    }

    #[test]
    fn display_includes_category_prefix() {
        let err = Error::InvalidFilter("unknown severity 'urgent'".into());
        assert!(err.to_string().contains("invalid filter"));
        assert!(err.to_string().contains("urgent"));
    }
}

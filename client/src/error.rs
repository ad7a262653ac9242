//! Error types for the native client.
//!
//! Core errors convert automatically via `From`, so `?` works across the
//! workflow boundary.

use pastperfect::{BackendError, CollectError, HandoffError};
use thiserror::Error;

/// Errors raised by the native client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid or unparsable configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Local file access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File collection refused the input.
    #[error("{0}")]
    Collect(#[from] CollectError),

    /// Handoff missing.
    #[error("Handoff error: {0}")]
    Handoff(#[from] HandoffError),

    /// Restoration backend error (outside of a batch run).
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Fetching or writing a restored image failed.
    #[error("Download failed: {0}")]
    Download(String),

    /// Clipboard unavailable.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Report serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client construction.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pastperfect::RejectReason;

    #[test]
    fn test_error_conversion_chain() {
        let collect = CollectError::Rejected {
            name: "notes.txt".into(),
            reason: RejectReason::Empty,
        };
        let err: ClientError = collect.into();
        assert!(err.to_string().contains("notes.txt"));

        let backend = BackendError::MissingRestored;
        let err: ClientError = backend.into();
        assert!(err.to_string().starts_with("Backend error"));
    }
}

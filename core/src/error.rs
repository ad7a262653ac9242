//! Error types for the restoration workflow.
//!
//! - [`RejectReason`] - Why the collector refused a file
//! - [`CollectError`] - Collector operation errors
//! - [`HandoffError`] - Missing or already-consumed handoff
//! - [`BackendError`] - Remote restoration call errors
//!
//! Per-item backend errors never abort a batch: the orchestrator turns them
//! into [`crate::FailedItem`] records.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

// =============================================================================
// Collector Errors
// =============================================================================

/// Reason a dropped or picked file was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// MIME type and extension are both outside the accept policy.
    UnsupportedType {
        mime_type: String,
    },
    /// File is larger than the per-file limit.
    TooLarge {
        size_bytes: u64,
        max_bytes: u64,
    },
    /// The collection already holds the maximum number of files.
    LimitReached {
        max_files: usize,
    },
    /// Zero-byte file.
    Empty,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnsupportedType { mime_type } if mime_type.is_empty() => {
                write!(f, "Unsupported file type")
            }
            RejectReason::UnsupportedType { mime_type } => {
                write!(f, "Unsupported file type: {}", mime_type)
            }
            RejectReason::TooLarge { size_bytes, max_bytes } => write!(
                f,
                "File is too large ({} > {})",
                crate::presenter::format_file_size(*size_bytes),
                crate::presenter::format_file_size(*max_bytes)
            ),
            RejectReason::LimitReached { max_files } => {
                write!(f, "Maximum of {} files reached", max_files)
            }
            RejectReason::Empty => write!(f, "File is empty"),
        }
    }
}

/// Errors from collector operations.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Candidate refused by the accept policy.
    #[error("File '{name}' rejected: {reason}")]
    Rejected { name: String, reason: RejectReason },

    /// Submission attempted with nothing collected.
    #[error("No files to restore")]
    NothingToSubmit,

    /// Not enough restoration credits for the collected files.
    #[error("Not enough credits: {needed} needed, {remaining} remaining")]
    InsufficientCredits { needed: usize, remaining: u32 },
}

// =============================================================================
// Handoff Errors
// =============================================================================

/// Errors when reading a handoff.
#[derive(Debug, Error)]
pub enum HandoffError {
    /// No handoff stored under this run id (never written, or already taken).
    #[error("No pending run {0}")]
    Missing(String),
}

// =============================================================================
// Backend Errors
// =============================================================================

/// Errors from a single remote restoration call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    /// Non-2xx HTTP status.
    #[error("API error ({status}): {body}")]
    Http { status: u16, body: String },

    /// Backend answered with `success: false`.
    #[error("Restoration failed: {0}")]
    Rejected(String),

    /// Backend reported success without a restored reference.
    #[error("Response has no restored image")]
    MissingRestored,

    /// Network / connection failure.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Response body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// No answer within the configured request timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl BackendError {
    /// Whether retrying the same request could succeed.
    ///
    /// Client errors (4xx) and explicit rejections are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Http { status, .. } => *status >= 500 || *status == 429,
            BackendError::Transport(_) | BackendError::Timeout(_) => true,
            BackendError::Rejected(_) | BackendError::MissingRestored | BackendError::Decode(_) => {
                false
            }
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for collector operations.
pub type CollectResult<T> = Result<T, CollectError>;

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

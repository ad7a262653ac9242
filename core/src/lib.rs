//! # PastPerfect - photo restoration workflow
//!
//! Platform-independent core of the restoration client. The native CLI and
//! the Leptos web frontend both drive this crate; neither the restoration
//! backend nor any I/O lives here.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  Collector  │────▶│   Handoff   │────▶│ Orchestrator │────▶│  Presenter  │
//! │ (drop/pick) │     │  (one-shot) │     │ POST /restore│     │ (dl/share)  │
//! └─────────────┘     └─────────────┘     └──────────────┘     └─────────────┘
//!                                                │
//!                                          RestoreBackend
//!                                     (reqwest / gloo-net impl)
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`types`] - Identifiers, pending items, results, batch report
//! - [`settings`] - Enhancement toggles and improvement labels
//! - [`collector`] - File acceptance, previews, credits
//! - [`handoff`] - Typed one-shot handoff between views
//! - [`progress`] - Progress events and sinks
//! - [`orchestrator`] - Remote processing loop
//! - [`presenter`] - Downloads, sharing, comparison slider, formatting

// Core modules
pub mod error;
pub mod types;
pub mod settings;

// Workflow stages
pub mod collector;
pub mod handoff;
pub mod progress;
pub mod orchestrator;
pub mod presenter;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    BackendError, BackendResult, CollectError, CollectResult, HandoffError, RejectReason,
};

pub use types::{
    BatchReport, FailedItem, FileCandidate, ItemId, PendingItem, ProcessedResult, RunId,
};

pub use settings::{Enhancement, EnhancementSettings};

pub use collector::{
    AcceptPolicy, Credits, DropOutcome, PreviewAllocator, Rejection, UploadCollector,
    ESTIMATED_SECONDS_PER_ITEM,
};

pub use handoff::{resolve_entry, Entry, Handoff, HandoffManifest, HandoffStore, ManifestEntry};

pub use progress::{NoProgress, Progress, ProgressEvent, ProgressSink};

pub use orchestrator::{
    Orchestrator, ProcessingOptions, RestoreBackend, RestoreRequest, RestoreResponse,
    RetryPolicy, FILE_FIELD, RESTORE_PATH, SETTINGS_FIELD,
};

pub use presenter::{
    batch_caption, download_file_name, download_plan, format_file_size, share_action,
    share_text, summary_line, Comparison, CopyAcknowledgement, ScheduledDownload, ShareAction,
    SharePlatform, COPY_ACK_TIMEOUT, DOWNLOAD_STAGGER, PRODUCT_NAME,
};

//! Processing orchestrator: sends each handed-off file to the restoration
//! backend and accumulates results.
//!
//! # Workflow
//!
//! ```text
//! Handoff ──▶ [item 0] ──▶ POST /restore ──▶ ProcessedResult | FailedItem
//!         ──▶ [item 1] ──▶ POST /restore ──▶ ...
//!                                              │
//!                         ProgressSink ◀───────┘  (after every item)
//! ```
//!
//! At most `concurrency` requests are in flight (1 by default, strictly
//! sequential). Results are published in submission order whatever the
//! concurrency. A failed item never aborts the run.

use std::pin::pin;
use std::time::Duration;

use chrono::Utc;
use futures::future::{self, Either};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::error::{BackendError, BackendResult};
use crate::handoff::Handoff;
use crate::progress::{Progress, ProgressEvent, ProgressSink};
use crate::settings::EnhancementSettings;
use crate::types::{BatchReport, FailedItem, PendingItem, ProcessedResult};

/// Multipart field carrying the file content.
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the settings JSON, when enabled.
pub const SETTINGS_FIELD: &str = "settings";

/// Path of the restoration endpoint, relative to the API base URL.
pub const RESTORE_PATH: &str = "/restore";

// =============================================================================
// Backend Contract
// =============================================================================

/// One restoration call.
#[derive(Debug)]
pub struct RestoreRequest<'a, P> {
    pub item: &'a PendingItem<P>,
    pub settings: &'a EnhancementSettings,
    /// 1-based attempt number.
    pub attempt: u32,
}

/// JSON answer of `POST /restore`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RestoreResponse {
    #[serde(default)]
    pub success: bool,
    /// Restored image (URL or `data:` URL).
    #[serde(default, alias = "final_enhanced", skip_serializing_if = "Option::is_none")]
    pub restored: Option<String>,
    /// Echo of the uploaded original, if the backend hosts it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RestoreResponse {
    pub fn restored(restored: impl Into<String>) -> Self {
        Self {
            success: true,
            restored: Some(restored.into()),
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// `(restored, original)` of a successful answer.
    pub fn into_references(self) -> BackendResult<(String, Option<String>)> {
        if !self.success {
            let message = self
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "backend reported failure".to_string());
            return Err(BackendError::Rejected(message));
        }
        match self.restored.filter(|r| !r.is_empty()) {
            Some(restored) => Ok((restored, self.original.filter(|o| !o.is_empty()))),
            None => Err(BackendError::MissingRestored),
        }
    }
}

/// The external restoration service, plus the platform timer.
///
/// Futures are not required to be `Send`: the browser implementation runs on
/// the single-threaded event loop.
#[allow(async_fn_in_trait)]
pub trait RestoreBackend<P> {
    /// Upload one file and wait for the answer.
    async fn restore(&self, request: RestoreRequest<'_, P>) -> BackendResult<RestoreResponse>;

    /// Suspend for `duration` (retry backoff, request timeout).
    async fn pause(&self, duration: Duration);
}

// =============================================================================
// Options
// =============================================================================

/// Retry policy for failed calls. Only retryable errors are retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    /// Total attempts per item, including the first (1 = no retry).
    pub max_attempts: u32,
    /// Delay between attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::from_millis(1000),
        }
    }

    pub fn attempts(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// How a run is processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingOptions {
    /// Maximum requests in flight (at least 1).
    pub concurrency: usize,
    pub retry: RetryPolicy,
    /// Per-attempt timeout; `None` waits forever.
    pub request_timeout: Option<Duration>,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            retry: RetryPolicy::none(),
            request_timeout: None,
        }
    }
}

impl ProcessingOptions {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

enum ItemOutcome {
    Restored(ProcessedResult),
    Failed(FailedItem),
}

/// Runs handed-off items against a [`RestoreBackend`].
#[derive(Clone, Debug)]
pub struct Orchestrator<B> {
    backend: B,
    options: ProcessingOptions,
}

impl<B> Orchestrator<B> {
    pub fn new(backend: B, options: ProcessingOptions) -> Self {
        Self { backend, options }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Process every item of the handoff and return the report.
    ///
    /// Emits `Started`, then per item `ItemStarted` and `ItemCompleted` or
    /// `ItemFailed` (in submission order), then `Finished`.
    pub async fn run<P, S>(&self, handoff: &Handoff<P>, sink: &S) -> BatchReport
    where
        B: RestoreBackend<P>,
        S: ProgressSink + ?Sized,
    {
        let total = handoff.items.len();
        let improvements = handoff.settings.applied_improvements();
        let concurrency = self.options.concurrency.max(1);

        log::info!(
            "Run {}: {} item(s), concurrency {}, {} attempt(s) per item",
            handoff.run_id,
            total,
            concurrency,
            self.options.retry.max_attempts.max(1)
        );
        sink.on_event(ProgressEvent::Started {
            run_id: handoff.run_id.clone(),
            total,
        });

        let mut report = BatchReport {
            run_id: Some(handoff.run_id.clone()),
            total,
            ..Default::default()
        };

        let settings = &handoff.settings;
        let improvements = improvements.as_slice();
        let mut outcomes = stream::iter(handoff.items.iter().enumerate())
            .map(|(index, item)| self.process_item(index, item, settings, improvements, sink))
            .buffered(concurrency);

        while let Some((index, outcome)) = outcomes.next().await {
            let progress = Progress::new(report.processed() + 1, total);
            match outcome {
                ItemOutcome::Restored(result) => {
                    sink.on_event(ProgressEvent::ItemCompleted {
                        index,
                        result: result.clone(),
                        progress,
                    });
                    report.results.push(result);
                }
                ItemOutcome::Failed(failure) => {
                    sink.on_event(ProgressEvent::ItemFailed {
                        index,
                        failure: failure.clone(),
                        progress,
                    });
                    report.failures.push(failure);
                }
            }
        }

        log::info!(
            "Run {} finished: {} restored, {} failed",
            handoff.run_id,
            report.results.len(),
            report.failures.len()
        );
        sink.on_event(ProgressEvent::Finished {
            completed: report.results.len(),
            failed: report.failures.len(),
            total,
        });

        report
    }

    async fn process_item<P, S>(
        &self,
        index: usize,
        item: &PendingItem<P>,
        settings: &EnhancementSettings,
        improvements: &[String],
        sink: &S,
    ) -> (usize, ItemOutcome)
    where
        B: RestoreBackend<P>,
        S: ProgressSink + ?Sized,
    {
        sink.on_event(ProgressEvent::ItemStarted {
            index,
            id: item.id.clone(),
            name: item.original_name.clone(),
        });
        log::info!("Processing '{}' ({} bytes)", item.original_name, item.size_bytes);

        let started = Utc::now();
        let max_attempts = self.options.retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let request = RestoreRequest { item, settings, attempt };
            let answer = self
                .call_backend(request)
                .await
                .and_then(RestoreResponse::into_references);

            match answer {
                Ok((restored, original)) => {
                    let elapsed_ms = (Utc::now() - started).num_milliseconds().max(0);
                    log::info!("Restored '{}' in {} ms", item.original_name, elapsed_ms);
                    let result = ProcessedResult {
                        id: item.id.clone(),
                        original_reference: original.unwrap_or_else(|| item.preview_url.clone()),
                        restored_reference: restored,
                        original_name: item.original_name.clone(),
                        elapsed_seconds: elapsed_ms as f64 / 1000.0,
                        applied_improvements: improvements.to_vec(),
                    };
                    return (index, ItemOutcome::Restored(result));
                }
                Err(err) if attempt < max_attempts && err.is_retryable() => {
                    log::warn!(
                        "Attempt {}/{} for '{}' failed: {}",
                        attempt,
                        max_attempts,
                        item.original_name,
                        err
                    );
                    sink.on_event(ProgressEvent::ItemRetrying {
                        index,
                        id: item.id.clone(),
                        attempt,
                        reason: err.to_string(),
                    });
                    self.backend.pause(self.options.retry.backoff).await;
                }
                Err(err) => {
                    log::error!("Error processing '{}': {}", item.original_name, err);
                    let failure = FailedItem {
                        id: item.id.clone(),
                        original_name: item.original_name.clone(),
                        reason: err.to_string(),
                        attempts: attempt,
                    };
                    return (index, ItemOutcome::Failed(failure));
                }
            }
        }
    }

    async fn call_backend<P>(&self, request: RestoreRequest<'_, P>) -> BackendResult<RestoreResponse>
    where
        B: RestoreBackend<P>,
    {
        let Some(timeout) = self.options.request_timeout else {
            return self.backend.restore(request).await;
        };

        let call = pin!(self.backend.restore(request));
        let timer = pin!(self.backend.pause(timeout));
        match future::select(call, timer).await {
            Either::Left((answer, _)) => answer,
            Either::Right(((), _)) => Err(BackendError::Timeout(timeout)),
        }
    }
}

//! Progress reporting for processing runs.

use serde::{Deserialize, Serialize};

use crate::types::{FailedItem, ItemId, ProcessedResult, RunId};

/// Completed-over-total snapshot.
///
/// Derived only from real completions; never simulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(processed: usize, total: usize) -> Self {
        Self { processed, total }
    }

    /// Percentage in `0.0..=100.0`. An empty run is complete.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.processed as f64 / self.total as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// Events emitted while a run is processed.
#[derive(Clone, Debug, PartialEq)]
pub enum ProgressEvent {
    /// Run accepted, nothing sent yet.
    Started { run_id: RunId, total: usize },
    /// Request for an item is about to be sent.
    ItemStarted { index: usize, id: ItemId, name: String },
    /// An attempt failed and the item will be retried.
    ItemRetrying {
        index: usize,
        id: ItemId,
        attempt: u32,
        reason: String,
    },
    /// Item restored.
    ItemCompleted {
        index: usize,
        result: ProcessedResult,
        progress: Progress,
    },
    /// Item given up on; the run continues.
    ItemFailed {
        index: usize,
        failure: FailedItem,
        progress: Progress,
    },
    /// Every item is accounted for.
    Finished {
        completed: usize,
        failed: usize,
        total: usize,
    },
}

impl ProgressEvent {
    /// Progress snapshot carried by this event, if any.
    pub fn progress(&self) -> Option<Progress> {
        match self {
            ProgressEvent::Started { total, .. } => Some(Progress::new(0, *total)),
            ProgressEvent::ItemCompleted { progress, .. } | ProgressEvent::ItemFailed { progress, .. } => {
                Some(*progress)
            }
            ProgressEvent::Finished { total, .. } => Some(Progress::new(*total, *total)),
            ProgressEvent::ItemStarted { .. } | ProgressEvent::ItemRetrying { .. } => None,
        }
    }

    /// Short status line for the "current step" display.
    pub fn describe(&self) -> String {
        match self {
            ProgressEvent::Started { total, .. } => {
                format!("Starting restoration of {} photo{}", total, plural(*total))
            }
            ProgressEvent::ItemStarted { name, .. } => format!("Processing {} with AI...", name),
            ProgressEvent::ItemRetrying { attempt, reason, .. } => {
                format!("Attempt {} failed ({}), retrying...", attempt, reason)
            }
            ProgressEvent::ItemCompleted { result, .. } => format!("Restored {}", result.original_name),
            ProgressEvent::ItemFailed { failure, .. } => {
                format!("Error: {} ({})", failure.reason, failure.original_name)
            }
            ProgressEvent::Finished { .. } => "Restoration complete!".to_string(),
        }
    }
}

pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Receives progress events.
pub trait ProgressSink {
    fn on_event(&self, event: ProgressEvent);
}

impl<F: Fn(ProgressEvent)> ProgressSink for F {
    fn on_event(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&self, _event: ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(Progress::new(0, 3).percent(), 0.0);
        assert!((Progress::new(1, 3).percent() - 33.333).abs() < 0.01);
        assert_eq!(Progress::new(3, 3).percent(), 100.0);
        assert_eq!(Progress::new(0, 0).percent(), 100.0);
    }

    #[test]
    fn test_closure_sink() {
        let seen = std::cell::RefCell::new(Vec::new());
        let sink = |e: ProgressEvent| seen.borrow_mut().push(e);
        sink.on_event(ProgressEvent::Finished { completed: 1, failed: 0, total: 1 });
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_describe() {
        let e = ProgressEvent::Started { run_id: RunId::from("r"), total: 1 };
        assert_eq!(e.describe(), "Starting restoration of 1 photo");
        let e = ProgressEvent::Finished { completed: 2, failed: 0, total: 2 };
        assert_eq!(e.describe(), "Restoration complete!");
        assert_eq!(e.progress(), Some(Progress::new(2, 2)));
    }
}

//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Log Types** - In-page activity log
//! - **Error Types** - Frontend error handling

use std::fmt;

use pastperfect::ProgressEvent;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::config::MAX_LOG_ENTRIES;

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Warning => "log-warning",
            LogLevel::Error => "log-error",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Info => "ℹ️",
            LogLevel::Success => "✅",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❌",
        }
    }
}

/// A single line of the activity log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

impl LogEntry {
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }

    /// Activity line for a progress event.
    pub fn from_event(event: &ProgressEvent) -> Self {
        let level = match event {
            ProgressEvent::ItemCompleted { .. } => LogLevel::Success,
            ProgressEvent::Finished { failed: 0, .. } => LogLevel::Success,
            ProgressEvent::Finished { .. } | ProgressEvent::ItemRetrying { .. } => LogLevel::Warning,
            ProgressEvent::ItemFailed { .. } => LogLevel::Error,
            ProgressEvent::Started { .. } | ProgressEvent::ItemStarted { .. } => LogLevel::Info,
        };
        Self::now(level, event.describe())
    }
}

/// Append `entry`, dropping the oldest lines past [`MAX_LOG_ENTRIES`].
pub fn push_log(logs: &mut Vec<LogEntry>, entry: LogEntry) {
    logs.push(entry);
    if logs.len() > MAX_LOG_ENTRIES {
        let excess = logs.len() - MAX_LOG_ENTRIES;
        logs.drain(..excess);
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Browser API call failed.
    Browser(String),
    /// Clipboard unavailable or denied.
    Clipboard(String),
    /// Download could not be started.
    Download(String),
}

impl AppError {
    pub fn browser(value: &JsValue) -> Self {
        AppError::Browser(format!("{:?}", value))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Browser(msg) => write!(f, "Browser error: {}", msg),
            AppError::Clipboard(msg) => write!(f, "Clipboard error: {}", msg),
            AppError::Download(msg) => write!(f, "Download error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pastperfect::{FailedItem, ItemId, Progress, RunId};

    #[test]
    fn test_push_log_caps_entries() {
        let mut logs = Vec::new();
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            push_log(&mut logs, LogEntry::now(LogLevel::Info, format!("line {}", i)));
        }
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "line 5");
    }

    #[test]
    fn test_levels_from_events() {
        let started = ProgressEvent::Started { run_id: RunId::from("r"), total: 1 };
        assert_eq!(LogEntry::from_event(&started).level, LogLevel::Info);

        let failed = ProgressEvent::ItemFailed {
            index: 0,
            failure: FailedItem {
                id: ItemId::from("a"),
                original_name: "a.jpg".into(),
                reason: "HTTP 500".into(),
                attempts: 1,
            },
            progress: Progress::new(1, 1),
        };
        let entry = LogEntry::from_event(&failed);
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.message, "Error: HTTP 500 (a.jpg)");

        let clean = ProgressEvent::Finished { completed: 1, failed: 0, total: 1 };
        assert_eq!(LogEntry::from_event(&clean).level, LogLevel::Success);
        let partial = ProgressEvent::Finished { completed: 0, failed: 1, total: 1 };
        assert_eq!(LogEntry::from_event(&partial).level, LogLevel::Warning);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AppError::Clipboard("denied".into()).to_string(), "Clipboard error: denied");
    }
}

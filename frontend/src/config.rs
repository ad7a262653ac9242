//! Application configuration.
//!
//! Compile-time settings for the PastPerfect frontend. The backend URL can
//! be overridden at build time with `PASTPERFECT_API_URL`.

use std::time::Duration;

use pastperfect::{ProcessingOptions, RESTORE_PATH};

/// Restoration backend base URL.
pub const API_BASE_URL: &str = match option_env!("PASTPERFECT_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Maximum activity log lines kept in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Rotation period of the encouragement messages (ms).
pub const STATUS_ROTATION_MS: u32 = 5000;

/// Pause between the last result and the results view (ms).
pub const COMPLETE_DELAY_MS: u32 = 1000;

/// Free tier credits: remaining, total.
pub const FREE_CREDITS: (u32, u32) = (3, 5);

/// Per-request timeout; restorations chain several AI models.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Full URL of the restoration endpoint.
pub fn restore_url() -> String {
    format!("{}{}", API_BASE_URL.trim_end_matches('/'), RESTORE_PATH)
}

/// Whether the settings JSON is sent along with each file
/// (`PASTPERFECT_SEND_SETTINGS=1` at build time).
pub fn send_settings() -> bool {
    matches!(option_env!("PASTPERFECT_SEND_SETTINGS"), Some("1") | Some("true"))
}

/// Processing options of the browser build: sequential, no retry.
pub fn processing_options() -> ProcessingOptions {
    ProcessingOptions::default().with_timeout(REQUEST_TIMEOUT)
}

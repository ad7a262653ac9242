//! Result presenter: everything the results view needs that does not touch
//! the platform.
//!
//! - Download file names and the staggered "download all" plan
//! - Share actions (platform share URLs or clipboard text)
//! - "Copied!" acknowledgement timing
//! - Before/after comparison slider model
//! - Human-readable sizes and summaries

use std::time::Duration;

use crate::progress::plural;
use crate::types::{BatchReport, ProcessedResult};

/// Delay between consecutive downloads of "download all".
pub const DOWNLOAD_STAGGER: Duration = Duration::from_millis(100);

/// How long the "Copied!" acknowledgement stays visible.
pub const COPY_ACK_TIMEOUT: Duration = Duration::from_millis(2000);

/// Product name used in share texts.
pub const PRODUCT_NAME: &str = "PastPerfect";

// =============================================================================
// Downloads
// =============================================================================

/// File name for a downloaded restored image.
pub fn download_file_name(result: &ProcessedResult) -> String {
    format!("restored_{}", result.original_name)
}

/// One scheduled download of "download all".
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledDownload<'a> {
    /// Delay from the click.
    pub offset: Duration,
    pub file_name: String,
    pub result: &'a ProcessedResult,
}

/// Schedule every result for download, `stagger` apart, in result order.
pub fn download_plan(results: &[ProcessedResult], stagger: Duration) -> Vec<ScheduledDownload<'_>> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| ScheduledDownload {
            offset: stagger * index as u32,
            file_name: download_file_name(result),
            result,
        })
        .collect()
}

// =============================================================================
// Sharing
// =============================================================================

/// Where a result is shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SharePlatform {
    Facebook,
    Twitter,
    Instagram,
    Email,
    Copy,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 5] = [
        SharePlatform::Facebook,
        SharePlatform::Twitter,
        SharePlatform::Instagram,
        SharePlatform::Email,
        SharePlatform::Copy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SharePlatform::Facebook => "Facebook",
            SharePlatform::Twitter => "Twitter",
            SharePlatform::Instagram => "Instagram",
            SharePlatform::Email => "Email",
            SharePlatform::Copy => "Copy Link",
        }
    }

    /// Parse a lowercase platform name (`facebook`, `twitter`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "facebook" => Some(SharePlatform::Facebook),
            "twitter" | "x" => Some(SharePlatform::Twitter),
            "instagram" => Some(SharePlatform::Instagram),
            "email" | "mail" => Some(SharePlatform::Email),
            "copy" => Some(SharePlatform::Copy),
            _ => None,
        }
    }
}

/// What a share button does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareAction {
    /// Open this URL in a new tab / the default handler.
    OpenUrl(String),
    /// Put this text on the clipboard and acknowledge.
    CopyText(String),
}

/// Share text, naming the file when sharing a single result.
pub fn share_text(file_name: Option<&str>) -> String {
    match file_name {
        Some(name) => format!(
            "I just restored \"{}\" using {}! Check out the amazing before/after results.",
            name, PRODUCT_NAME
        ),
        None => format!(
            "I just restored my precious family photos using {}! Check out the amazing results.",
            PRODUCT_NAME
        ),
    }
}

/// Build the action for a share button. `origin` is the site URL shared.
pub fn share_action(platform: SharePlatform, file_name: Option<&str>, origin: &str) -> ShareAction {
    let text = share_text(file_name);
    let enc = |s: &str| urlencoding::encode(s).into_owned();

    match platform {
        SharePlatform::Facebook => ShareAction::OpenUrl(format!(
            "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
            enc(origin),
            enc(&text)
        )),
        SharePlatform::Twitter => ShareAction::OpenUrl(format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            enc(&text),
            enc(origin)
        )),
        SharePlatform::Email => ShareAction::OpenUrl(format!(
            "mailto:?subject={}&body={}",
            enc("Check out my restored photo!"),
            enc(&format!("{}\n\n{}", text, origin))
        )),
        // No URL share on Instagram: copy the text instead
        SharePlatform::Instagram | SharePlatform::Copy => {
            ShareAction::CopyText(format!("{}\n\n{}", text, origin))
        }
    }
}

/// "Copied!" flag that reverts on its own after [`COPY_ACK_TIMEOUT`].
///
/// Time is passed in by the caller (milliseconds since any fixed origin).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyAcknowledgement {
    copied_at_ms: Option<u64>,
}

impl CopyAcknowledgement {
    pub fn mark(&mut self, now_ms: u64) {
        self.copied_at_ms = Some(now_ms);
    }

    pub fn reset(&mut self) {
        self.copied_at_ms = None;
    }

    pub fn is_visible(&self, now_ms: u64) -> bool {
        self.copied_at_ms
            .is_some_and(|at| now_ms.saturating_sub(at) < COPY_ACK_TIMEOUT.as_millis() as u64)
    }

    pub fn label(&self, now_ms: u64) -> &'static str {
        if self.is_visible(now_ms) {
            "Copied!"
        } else {
            SharePlatform::Copy.label()
        }
    }
}

// =============================================================================
// Comparison Slider
// =============================================================================

/// Before/after slider. `position` is the percentage of the width showing
/// the original image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Comparison {
    position: f64,
}

impl Default for Comparison {
    fn default() -> Self {
        Self { position: 50.0 }
    }
}

impl Comparison {
    /// Keyboard step, in percent.
    pub const STEP: f64 = 5.0;

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set(&mut self, position: f64) {
        self.position = if position.is_nan() { 50.0 } else { position.clamp(0.0, 100.0) };
    }

    /// Follow a pointer at `pointer_x` over an element spanning
    /// `left..left + width`.
    pub fn drag_to(&mut self, pointer_x: f64, left: f64, width: f64) {
        if width <= 0.0 {
            return;
        }
        self.set((pointer_x - left) / width * 100.0);
    }

    pub fn nudge(&mut self, delta: f64) {
        self.set(self.position + delta);
    }

    /// CSS `clip-path` revealing the original on the left side.
    pub fn clip_path(&self) -> String {
        format!("inset(0 {:.2}% 0 0)", 100.0 - self.position)
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// "0 Bytes", "512 Bytes", "1.5 KB", "2 MB", ... (base 1024, 2 decimals).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// "3 photos • 4.2 MB"
pub fn batch_caption(count: usize, total_bytes: u64) -> String {
    format!("{} photo{} • {}", count, plural(count), format_file_size(total_bytes))
}

/// Headline of the results view.
pub fn summary_line(report: &BatchReport) -> String {
    let restored = report.results.len();
    if report.failures.is_empty() {
        format!(
            "All {} photo{} have been successfully restored",
            restored,
            plural(restored)
        )
    } else {
        format!(
            "{} of {} photo{} restored, {} failed",
            restored,
            report.total,
            plural(report.total),
            report.failures.len()
        )
    }
}

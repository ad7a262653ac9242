//! Console rendering of progress events.

use pastperfect::{ProgressEvent, ProgressSink};

/// Width of the text progress bar.
const BAR_WIDTH: usize = 20;

/// Prints progress events to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleProgress {
    quiet: bool,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only failures and the final line are printed.
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_event(&self, event: ProgressEvent) {
        let important = matches!(event, ProgressEvent::ItemFailed { .. } | ProgressEvent::Finished { .. });
        if self.quiet && !important {
            return;
        }
        eprintln!("{}", render(&event));
    }
}

/// One console line for an event.
pub fn render(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::Started { run_id, total } => {
            format!("🚀 {} (run {}, {} file{})", event.describe(), run_id, total, if *total == 1 { "" } else { "s" })
        }
        ProgressEvent::ItemStarted { index, .. } => format!("   [{}] {}", index + 1, event.describe()),
        ProgressEvent::ItemRetrying { index, .. } => format!("   [{}] ⚠️  {}", index + 1, event.describe()),
        ProgressEvent::ItemCompleted { index, result, progress } => format!(
            "   [{}] ✓ {} in {:.1}s  {} {:>3.0}%",
            index + 1,
            result.original_name,
            result.elapsed_seconds,
            bar(progress.percent()),
            progress.percent()
        ),
        ProgressEvent::ItemFailed { index, failure, progress } => format!(
            "   [{}] ❌ {}: {}  {} {:>3.0}%",
            index + 1,
            failure.original_name,
            failure.reason,
            bar(progress.percent()),
            progress.percent()
        ),
        ProgressEvent::Finished { completed, failed, total } => {
            if *failed == 0 {
                format!("✨ {} {}/{} restored", event.describe(), completed, total)
            } else {
                format!("✨ {} {}/{} restored, {} failed", event.describe(), completed, total, failed)
            }
        }
    }
}

fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

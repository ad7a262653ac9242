//! # PastPerfect client
//!
//! Native front end of the restoration workflow: local files are collected,
//! posted to the restoration backend over HTTP and the restored images are
//! written next to a JSON run report.
//!
//! ## Modules
//!
//! - [`config`] - Environment configuration
//! - [`files`] - Paths as collector input, `file://` previews
//! - [`http`] - reqwest implementation of the restoration backend
//! - [`workflow`] - Collect, hand off and process in one call
//! - [`progress`] - Console progress output
//! - [`download`] - Saving restored images
//! - [`share`] - Share links and clipboard
//! - [`report`] - JSON run report

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod workflow;
pub mod progress;
pub mod download;
pub mod share;
pub mod report;

#[cfg(test)]
mod test_server;

pub use config::ClientConfig;
pub use download::Downloader;
pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;
pub use progress::ConsoleProgress;
pub use report::RunRecord;
pub use share::ShareOutcome;
pub use workflow::{run_job, JobOutcome, RestoreJob, SkippedFile};

use tracing_subscriber::EnvFilter;

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level
/// (0 = warn, 1 = info, 2+ = debug). Records from the `log` facade used by
/// the core crate are forwarded to the same output.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

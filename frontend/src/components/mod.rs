//! UI Components for the PastPerfect application.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with credits badge
//! - [`Hero`] - Page title and description
//! - [`Footer`] - Page footer
//!
//! # Upload Page
//! - [`UploadPage`] - Drag & drop collection and submission
//! - [`CreditsCard`] - Remaining restoration credits
//! - [`SettingsPanel`] - Enhancement toggles
//!
//! # Processing Page
//! - [`ProcessingPage`] - Remote processing and results
//! - [`ProgressBar`] - Overall progress
//! - [`ActivityLog`] - Per-item activity lines
//! - [`ResultsSection`] - Restored photos, downloads, sharing
//! - [`ComparisonSlider`] - Before/after slider
//! - [`ShareButtons`] - Social share and copy buttons

mod header;
mod hero;
mod footer;
mod upload;
mod credits;
mod settings;
mod processing;
mod progress;
mod logs;
mod results;
mod comparison;
mod share;

pub use header::*;
pub use hero::*;
pub use footer::*;
pub use upload::*;
pub use credits::*;
pub use settings::*;
pub use processing::*;
pub use progress::*;
pub use logs::*;
pub use results::*;
pub use comparison::*;
pub use share::*;

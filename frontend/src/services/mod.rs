//! Browser-side services.
//!
//! # Services
//!
//! - [`restore`] - Restoration backend over `fetch` (gloo-net)
//! - [`previews`] - Object URL previews for dropped files
//! - [`browser`] - Downloads, clipboard and window helpers

pub mod restore;
pub mod previews;
pub mod browser;

pub use restore::*;
pub use previews::*;
pub use browser::*;

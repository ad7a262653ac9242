//! PastPerfect - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend to upload old photos, restore them with the
//! PastPerfect backend and compare, download or share the results.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (credits badge)                                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  /restore             UploadPage                            │
//! │  ├── Hero, CreditsCard                                      │
//! │  ├── Drop zone + collected files                            │
//! │  └── SettingsPanel, submit                                  │
//! │                          │ HandoffStore (?run=<id>)         │
//! │  /restore/processing  ProcessingPage                        │
//! │  ├── ProgressBar, current step, ActivityLog                 │
//! │  └── ResultsSection (ResultCard, ComparisonSlider, Share)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (LogEntry, AppError)
//! - [`components`] - UI components
//! - [`services`] - Backend communication and browser helpers

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use pastperfect::{Credits, HandoffStore};
use web_sys::File;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;

pub use types::{push_log, AppError, AppResult, LogEntry, LogLevel};

pub use components::*;

pub use services::*;

// =============================================================================
// Shared State
// =============================================================================

/// State shared by both pages, provided as context.
#[derive(Clone)]
pub struct AppState {
    /// Runs submitted by the upload page, waiting for the processing page.
    pub handoffs: Rc<RefCell<HandoffStore<File>>>,
    pub credits: RwSignal<Credits>,
}

impl AppState {
    pub fn new() -> Self {
        let (remaining, total) = FREE_CREDITS;
        Self {
            handoffs: Rc::new(RefCell::new(HandoffStore::new())),
            credits: create_rw_signal(Credits::new(remaining, total)),
        }
    }

    pub fn with_handoffs<R>(&self, f: impl FnOnce(&mut HandoffStore<File>) -> R) -> R {
        f(&mut self.handoffs.borrow_mut())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install panic and console logging hooks, then mount [`App`].
pub fn start() {
    console_error_panic_hook::set_once();

    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 PastPerfect - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let state = AppState::new();
    let credits = state.credits;
    provide_context(state);

    view! {
        <Title text="PastPerfect - Restore Your Precious Photos"/>
        <Router>
            <Header credits=credits/>
            <main class="container">
                <Routes>
                    <Route path="/" view=|| view! { <Redirect path="/restore"/> }/>
                    <Route path="/restore" view=UploadPage/>
                    <Route path="/restore/processing" view=ProcessingPage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

//! Processing page: runs a submitted batch and shows its results.
//!
//! Entered with `?run=<id>`. Without a pending run for that id the page
//! redirects to the upload page before any request is made.

use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use leptos::*;
use leptos_router::{use_query_map, Redirect, A};
use pastperfect::{batch_caption, resolve_entry, BatchReport, Entry, Handoff, Orchestrator, ProgressEvent, RunId};
use web_sys::File;

use crate::components::{ActivityLog, ProgressBar, ResultsSection};
use crate::services::{revoke_preview, BrowserBackend};
use crate::{config, push_log, AppState, LogEntry, LogLevel};

const LOADING_MESSAGES: [&str; 6] = [
    "This might take a while, you can check back later to see the results!",
    "Our AI is working hard to restore your precious memories...",
    "Feel free to grab a coffee while we work our magic!",
    "Processing high-quality restorations takes time - it's worth the wait!",
    "You can leave this page and come back later to see your results.",
    "We're carefully analyzing every detail of your photos...",
];

#[component]
pub fn ProcessingPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let query = use_query_map();
    let run_id = query.with_untracked(|q| q.get("run").map(|s| RunId::from(s.as_str())));

    match state.with_handoffs(|store| resolve_entry(store, run_id.as_ref())) {
        Entry::Process(handoff) => view! { <RunView handoff=handoff/> }.into_view(),
        Entry::RedirectToUpload => view! { <Redirect path="/restore"/> }.into_view(),
    }
}

#[component]
fn RunView(handoff: Handoff<File>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let credits = state.credits;

    let caption = batch_caption(handoff.items.len(), handoff.total_bytes());
    let previews: Vec<String> = handoff.items.iter().map(|item| item.preview_url.clone()).collect();

    let (percent, set_percent) = create_signal(0.0_f64);
    let (current_file, set_current_file) = create_signal(None::<String>);
    let (current_step, set_current_step) = create_signal(String::new());
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());
    let (report, set_report) = create_signal(None::<BatchReport>);
    let message_index = create_rw_signal(0usize);

    let ticker = Interval::new(config::STATUS_ROTATION_MS, move || {
        let _ = message_index.try_update(|i| *i = (*i + 1) % LOADING_MESSAGES.len());
    });

    on_cleanup(move || {
        drop(ticker);
        for url in &previews {
            revoke_preview(url);
        }
    });

    set_logs.update(|logs| {
        push_log(logs, LogEntry::now(LogLevel::Info, format!("🚀 Run {} • {}", handoff.run_id, caption)));
    });

    let sink = move |event: ProgressEvent| {
        if let Some(progress) = event.progress() {
            let _ = set_percent.try_set(progress.percent());
        }
        match &event {
            ProgressEvent::ItemStarted { name, .. } => {
                let _ = set_current_file.try_set(Some(name.clone()));
            }
            ProgressEvent::Finished { .. } => {
                let _ = set_current_file.try_set(None);
            }
            _ => {}
        }
        let _ = set_current_step.try_set(event.describe());
        let _ = set_logs.try_update(|logs| push_log(logs, LogEntry::from_event(&event)));
    };

    spawn_local(async move {
        let orchestrator = Orchestrator::new(BrowserBackend::from_config(), config::processing_options());
        let outcome = orchestrator.run(&handoff, &sink).await;

        TimeoutFuture::new(config::COMPLETE_DELAY_MS).await;

        let used = outcome.results.len() as u32;
        let _ = credits.try_update(|c| c.remaining = c.remaining.saturating_sub(used));
        log::info!("✨ Run {} finished: {}/{} restored", handoff.run_id, used, outcome.total);
        let _ = set_report.try_set(Some(outcome));
    });

    let header_caption = caption.clone();

    view! {
        <div class="processing-header">
            <div>
                <h2>"Restoring Your Photos"</h2>
                <p class="upload-hint">{header_caption}</p>
            </div>
            <A href="/restore" class="btn btn-secondary">"← Back to Upload"</A>
        </div>

        <Show
            when=move || report.with(|r| r.is_some())
            fallback=move || view! {
                <div class="card processing-card">
                    <ProgressBar percent=Signal::derive(move || percent.get())/>

                    <Show when=move || current_file.with(|f| f.is_some())>
                        <div class="current-file">
                            <p class="upload-hint">"Currently processing:"</p>
                            <p class="file-name">{move || current_file.get().unwrap_or_default()}</p>
                        </div>
                    </Show>

                    <Show when=move || current_step.with(|s| !s.is_empty())>
                        <div class="current-step">{move || current_step.get()}</div>
                    </Show>

                    <div class="encouragement">
                        <p class="encouragement-title">"☕ Take a break!"</p>
                        <p>{move || LOADING_MESSAGES[message_index.get() % LOADING_MESSAGES.len()]}</p>
                        <p class="encouragement-tips">"📖 Read a book • 🎵 Listen to music • ☕ Grab a coffee"</p>
                    </div>
                </div>
            }
        >
            {move || report.get().map(|report| view! { <ResultsSection report=report/> })}
        </Show>

        <ActivityLog logs=logs set_logs=set_logs/>
    }
}

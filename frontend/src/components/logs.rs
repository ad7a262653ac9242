//! Activity log of the processing page.
//!
//! One line per progress event, newest at the bottom.

use leptos::*;

use crate::LogEntry;

#[component]
pub fn ActivityLog(
    logs: ReadSignal<Vec<LogEntry>>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let feed = create_node_ref::<leptos::html::Div>();
    let line_count = move || logs.with(Vec::len);

    // Follow the newest line
    create_effect(move |_| {
        logs.track();
        if let Some(el) = feed.get() {
            request_animation_frame(move || el.set_scroll_top(el.scroll_height()));
        }
    });

    view! {
        <section class="logs-panel" aria-live="polite">
            <header class="logs-header">
                <span class="logs-title">{move || format!("📋 Activity ({})", line_count())}</span>
                <button
                    type="button"
                    class="logs-clear"
                    disabled=move || line_count() == 0
                    on:click=move |_| set_logs.update(Vec::clear)
                >
                    "Clear"
                </button>
            </header>
            <div class="logs-content" node_ref=feed>
                {move || {
                    logs.with(|lines| {
                        lines
                            .iter()
                            .map(|entry| view! {
                                <p class=format!("log-entry {}", entry.level.css_class())>
                                    <time class="log-time">{entry.timestamp.clone()}</time>
                                    " " {entry.level.emoji()} " " {entry.message.clone()}
                                </p>
                            })
                            .collect_view()
                    })
                }}
            </div>
        </section>
    }
}

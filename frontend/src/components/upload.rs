//! Upload page: drag & drop collection, settings and submission.

use leptos::*;
use leptos_router::use_navigate;
use pastperfect::{
    batch_caption, format_file_size, AcceptPolicy, CollectError, EnhancementSettings, FileCandidate,
    ItemId, Rejection, UploadCollector,
};
use wasm_bindgen::JsCast;
use web_sys::{Event, File, FileList, HtmlInputElement};

use crate::components::{CreditsCard, Hero, SettingsPanel};
use crate::services::ObjectUrlPreviews;
use crate::AppState;

type BrowserCollector = UploadCollector<File, ObjectUrlPreviews>;

fn candidates(files: &FileList) -> Vec<FileCandidate<File>> {
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|file| {
            let name = file.name();
            let size = file.size() as u64;
            let mime = file.type_();
            FileCandidate::new(file, name, size, mime)
        })
        .collect()
}

#[component]
pub fn UploadPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let credits = state.credits;
    let navigate = use_navigate();

    let collector = store_value(BrowserCollector::new(AcceptPolicy::photos(), ObjectUrlPreviews));
    // Bumped after every collector mutation
    let revision = create_rw_signal(0u32);
    let settings = create_rw_signal(EnhancementSettings::default());
    let (rejections, set_rejections) = create_signal(Vec::<Rejection>::new());
    let (drag_active, set_drag_active) = create_signal(false);
    let (submit_error, set_submit_error) = create_signal(None::<String>);

    let items = move || {
        revision.track();
        collector.with_value(|c| c.items().to_vec())
    };
    let count = move || {
        revision.track();
        collector.with_value(|c| c.len())
    };
    let total_bytes = move || {
        revision.track();
        collector.with_value(|c| c.total_bytes())
    };
    let can_submit = move || {
        revision.track();
        let credits = credits.get();
        collector.with_value(|c| c.can_submit(&credits))
    };
    let missing_credits = move || {
        let remaining = credits.get().remaining as usize;
        count().saturating_sub(remaining)
    };

    let accept = move |files: FileList| {
        let outcome = collector.try_update_value(|c| c.offer(candidates(&files)));
        let Some(outcome) = outcome else { return };
        for rejection in &outcome.rejected {
            log::warn!("⚠️ {} rejected: {}", rejection.name, rejection.reason);
        }
        log::info!("📥 {} file(s) accepted", outcome.accepted.len());
        set_rejections.set(outcome.rejected);
        set_submit_error.set(None);
        revision.update(|r| *r += 1);
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_drag_active.set(false);
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            accept(files);
        }
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            accept(files);
        }
        // Allow picking the same file again
        input.set_value("");
    };

    let trigger_file_input = move |_| {
        if let Some(input) = document()
            .get_element_by_id("fileInput")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.click();
        }
    };

    let remove = move |id: ItemId| {
        collector.update_value(|c| {
            c.remove(&id);
        });
        revision.update(|r| *r += 1);
    };

    let handoffs = state.clone();
    let on_submit = move |_| {
        let credits = credits.get_untracked();
        let checked = collector.with_value(|c| c.check_submit(&credits));
        if let Err(e) = checked {
            let message = match e {
                CollectError::InsufficientCredits { needed, remaining } => format!(
                    "You need {} more credit{} to restore all photos",
                    needed - remaining as usize,
                    if needed - remaining as usize == 1 { "" } else { "s" }
                ),
                other => other.to_string(),
            };
            set_submit_error.set(Some(message));
            return;
        }

        let Some(items) = collector.try_update_value(|c| c.take_items()) else { return };
        let run_id = handoffs.with_handoffs(|store| store.submit(items, settings.get_untracked()));
        log::info!("🚀 Run {} submitted", run_id);
        navigate(&format!("/restore/processing?run={}", run_id), Default::default());
    };

    // Release previews of files left behind
    on_cleanup(move || {
        collector.try_update_value(|c| c.clear());
    });

    view! {
        <Hero/>

        <CreditsCard credits=credits/>

        <div
            class="upload-section"
            class:drag-active=drag_active
            on:click=trigger_file_input
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                set_drag_active.set(true);
            }
            on:dragleave=move |_| set_drag_active.set(false)
            on:drop=on_drop
        >
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">
                {move || if drag_active.get() { "Drop your photos here" } else { "Drag & drop photos here" }}
            </div>
            <div class="upload-hint">"or click to browse files"</div>
            <div class="upload-hint">
                {move || collector.with_value(|c| {
                    let policy = c.policy();
                    format!(
                        "JPEG, PNG • Up to {} each • Max {} photos",
                        format_file_size(policy.max_file_bytes),
                        policy.max_files
                    )
                })}
            </div>
            <input
                type="file"
                id="fileInput"
                multiple=true
                accept=collector.with_value(|c| c.policy().accept_attribute())
                style="display:none"
                on:click=|ev| ev.stop_propagation()
                on:change=on_file_change
            />
        </div>

        <Show when=move || !rejections.get().is_empty()>
            <ul class="rejections">
                <For
                    each=move || rejections.get().into_iter().enumerate()
                    key=|(i, _)| *i
                    children=|(_, r)| view! { <li class="error-message">"⚠️ " {r.name} ": " {r.reason.to_string()}</li> }
                />
            </ul>
        </Show>

        <Show when=move || count() != 0>
            <div class="card files-card">
                <div class="card-header">
                    <h3>{move || format!("Uploaded Photos ({})", count())}</h3>
                    <span>{move || format!("Total: {}", format_file_size(total_bytes()))}</span>
                </div>
                <div class="file-list">
                    <For
                        each=items
                        key=|item| item.id.clone()
                        children=move |item| {
                            let id = item.id.clone();
                            view! {
                                <div class="file-item">
                                    <img src=item.preview_url.clone() alt=item.original_name.clone()/>
                                    <div class="file-info">
                                        <p class="file-name">{item.original_name.clone()}</p>
                                        <p class="file-size">{format_file_size(item.size_bytes)}</p>
                                    </div>
                                    <button
                                        type="button"
                                        class="file-remove"
                                        aria-label="Remove"
                                        on:click=move |_| remove(id.clone())
                                    >
                                        "✕"
                                    </button>
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        </Show>

        <SettingsPanel settings=settings/>

        <div class="submit-row">
            <Show when=move || { missing_credits() > 0 }>
                <p class="error-message">
                    {move || {
                        let missing = missing_credits();
                        format!("You need {} more credit{} to restore all photos", missing, if missing == 1 { "" } else { "s" })
                    }}
                </p>
            </Show>
            <Show when=move || submit_error.get().is_some()>
                <p class="error-message">{move || submit_error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || { count() != 0 }>
                <p class="upload-hint">
                    {move || {
                        revision.track();
                        let minutes = collector.with_value(|c| c.estimated_minutes());
                        format!("{} • Estimated time: ~{} min", batch_caption(count(), total_bytes()), minutes)
                    }}
                </p>
            </Show>
            <button
                type="button"
                class="btn btn-primary"
                disabled=move || !can_submit()
                on:click=on_submit
            >
                {move || {
                    let n = count();
                    if n == 0 {
                        "Restore Photos".to_string()
                    } else {
                        format!("Restore {} Photo{}", n, if n == 1 { "" } else { "s" })
                    }
                }}
            </button>
        </div>
    }
}

//! Share buttons with "Copied!" acknowledgement.

use gloo_timers::callback::Timeout;
use leptos::*;
use pastperfect::{share_action, CopyAcknowledgement, SharePlatform, COPY_ACK_TIMEOUT};

use crate::services::{now_ms, page_origin, perform_share};

#[component]
pub fn ShareButtons(
    /// Restored file named in the share text; `None` for the whole batch.
    #[prop(optional)]
    file_name: Option<String>,
    #[prop(default = SharePlatform::ALL.to_vec())]
    platforms: Vec<SharePlatform>,
) -> impl IntoView {
    let ack = create_rw_signal(CopyAcknowledgement::default());
    // Re-evaluated when the acknowledgement may have expired
    let clock = create_rw_signal(now_ms());
    let file_name = store_value(file_name);

    let share = move |platform: SharePlatform| {
        let action = file_name.with_value(|name| share_action(platform, name.as_deref(), &page_origin()));
        spawn_local(async move {
            match perform_share(action).await {
                Ok(true) => {
                    let now = now_ms();
                    ack.update(|a| a.mark(now));
                    clock.set(now);
                    let delay = u32::try_from(COPY_ACK_TIMEOUT.as_millis()).unwrap_or(u32::MAX);
                    Timeout::new(delay, move || {
                        let _ = clock.try_set(now_ms());
                    })
                    .forget();
                }
                Ok(false) => log::info!("🔗 Shared on {}", platform.label()),
                Err(e) => log::error!("❌ Share failed: {}", e),
            }
        });
    };

    view! {
        <div class="share-buttons">
            {platforms
                .into_iter()
                .map(|platform| {
                    let label = move || {
                        if platform == SharePlatform::Copy {
                            ack.get().label(clock.get())
                        } else {
                            platform.label()
                        }
                    };
                    view! {
                        <button
                            type="button"
                            class=format!("btn btn-share share-{}", platform.label().to_lowercase().replace(' ', "-"))
                            on:click=move |_| share(platform)
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

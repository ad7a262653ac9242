//! Restoration credits card.

use leptos::*;
use pastperfect::Credits;

#[component]
pub fn CreditsCard(credits: RwSignal<Credits>) -> impl IntoView {
    view! {
        <div class="card credits-card">
            <div class="card-header">
                <h3>"Restoration Credits"</h3>
                <span class="credits-count">
                    {move || {
                        let credits = credits.get();
                        format!("{} of {} Remaining", credits.remaining, credits.total)
                    }}
                </span>
            </div>
            <div class="credits-bar">
                <div
                    class="credits-fill"
                    style=move || format!("width: {:.0}%;", credits.get().used_fraction() * 100.0)
                ></div>
            </div>
            <div class="credits-footer">
                <span>"Free tier"</span>
            </div>
        </div>
    }
}

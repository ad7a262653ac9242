//! Top navigation bar.

use leptos::*;
use leptos_router::A;
use pastperfect::{Credits, PRODUCT_NAME};

#[component]
pub fn Header(credits: RwSignal<Credits>) -> impl IntoView {
    view! {
        <header class="site-header">
            <div class="header-left">
                <A href="/restore" class="logo">{PRODUCT_NAME}</A>
            </div>
            <div class="header-right">
                <span class="badge" title="Restoration credits">
                    {move || {
                        let credits = credits.get();
                        format!("✨ {} / {} credits", credits.remaining, credits.total)
                    }}
                </span>
            </div>
        </header>
    }
}

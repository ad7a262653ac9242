//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Restore Your Precious Photos"</h1>
            <p class="subtitle">
                "Upload your photos and watch the magic happen."
            </p>
        </div>
    }
}

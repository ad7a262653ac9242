//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <div>"Copyright © 2025 PastPerfect • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <span class="footer-note">
                    "Your photos are encrypted and automatically deleted after 24 hours"
                </span>
            </div>
        </footer>
    }
}

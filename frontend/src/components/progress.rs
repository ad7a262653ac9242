//! Overall progress bar.

use leptos::*;

#[component]
pub fn ProgressBar(
    /// Percentage, 0..=100.
    percent: Signal<f64>,
) -> impl IntoView {
    view! {
        <div class="progress-section">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {:.1}%;", percent.get().clamp(0.0, 100.0))
                ></div>
            </div>
            <div class="progress-caption">
                <span>"Progress"</span>
                <span>{move || format!("{:.0}%", percent.get())}</span>
            </div>
        </div>
    }
}

//! Enhancement toggles.

use leptos::*;
use pastperfect::{Enhancement, EnhancementSettings};

fn description(enhancement: Enhancement) -> &'static str {
    match enhancement {
        Enhancement::Sharpness => "Improve image clarity and detail",
        Enhancement::Scratches => "Clean up surface damage",
        Enhancement::Contrast => "Improve brightness and contrast",
        Enhancement::Noise => "Reduce grain and artifacts",
        Enhancement::Lighting => "Correct over- and under-exposure",
        Enhancement::Colorize => "Add color to black & white photos",
        Enhancement::Upscale => "Increase image resolution by 2x",
    }
}

#[component]
pub fn SettingsPanel(settings: RwSignal<EnhancementSettings>) -> impl IntoView {
    view! {
        <div class="card settings-card">
            <div class="card-header">
                <h3>"⚙️ Restoration Settings"</h3>
            </div>
            <div class="settings-list">
                {Enhancement::ALL
                    .into_iter()
                    .map(|enhancement| {
                        let enabled = move || settings.with(|s| s.is_enabled(enhancement));
                        view! {
                            <div class="setting-row">
                                <div>
                                    <p class="setting-label">{enhancement.setting_label()}</p>
                                    <p class="setting-hint">{description(enhancement)}</p>
                                </div>
                                <button
                                    type="button"
                                    role="switch"
                                    class="toggle"
                                    class:on=enabled
                                    aria-checked=move || enabled().to_string()
                                    aria-label=enhancement.setting_label()
                                    on:click=move |_| settings.update(|s| s.toggle(enhancement))
                                >
                                    <span class="toggle-knob"></span>
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

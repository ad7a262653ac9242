//! Before/after comparison slider.
//!
//! The restored image fills the frame; the original is drawn on top and
//! clipped to the left of the handle. Pointer drag and arrow keys move it.

use leptos::*;
use pastperfect::Comparison;

#[component]
pub fn ComparisonSlider(original: String, restored: String, name: String) -> impl IntoView {
    let comparison = create_rw_signal(Comparison::default());
    let (dragging, set_dragging) = create_signal(false);
    let frame = create_node_ref::<leptos::html::Div>();

    let follow = move |client_x: i32| {
        if let Some(el) = frame.get_untracked() {
            let rect = el.get_bounding_client_rect();
            comparison.update(|c| c.drag_to(f64::from(client_x), rect.left(), rect.width()));
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let handled = match ev.key().as_str() {
            "ArrowLeft" => {
                comparison.update(|c| c.nudge(-Comparison::STEP));
                true
            }
            "ArrowRight" => {
                comparison.update(|c| c.nudge(Comparison::STEP));
                true
            }
            "Home" => {
                comparison.update(|c| c.set(0.0));
                true
            }
            "End" => {
                comparison.update(|c| c.set(100.0));
                true
            }
            _ => false,
        };
        if handled {
            ev.prevent_default();
        }
    };

    view! {
        <div class="comparison">
            <p class="comparison-hint">"ℹ️ Drag the slider to compare before and after"</p>
            <div
                class="comparison-frame"
                node_ref=frame
                tabindex="0"
                role="slider"
                aria-label=format!("Before and after comparison of {}", name)
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=move || format!("{:.0}", comparison.get().position())
                on:pointerdown=move |ev: web_sys::PointerEvent| {
                    set_dragging.set(true);
                    follow(ev.client_x());
                }
                on:pointermove=move |ev: web_sys::PointerEvent| {
                    if dragging.get_untracked() {
                        follow(ev.client_x());
                    }
                }
                on:pointerup=move |_| set_dragging.set(false)
                on:pointerleave=move |_| set_dragging.set(false)
                on:keydown=on_keydown
            >
                <img class="comparison-restored" src=restored alt="Restored" draggable="false"/>
                <img
                    class="comparison-original"
                    src=original
                    alt="Original"
                    draggable="false"
                    style=move || format!("clip-path: {};", comparison.get().clip_path())
                />
                <div
                    class="comparison-handle"
                    style=move || format!("left: {:.2}%;", comparison.get().position())
                ></div>
                <span class="comparison-label before">"Before"</span>
                <span class="comparison-label after">"After"</span>
            </div>
        </div>
    }
}

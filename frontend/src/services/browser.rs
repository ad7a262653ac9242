//! Window, download and clipboard helpers.

use gloo_timers::callback::Timeout;
use gloo_utils::{document, window};
use pastperfect::{download_plan, ProcessedResult, ShareAction, DOWNLOAD_STAGGER};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAnchorElement;

use crate::types::{AppError, AppResult};

/// Milliseconds since the epoch.
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Origin of the current page, shared in social links.
pub fn page_origin() -> String {
    window()
        .location()
        .origin()
        .unwrap_or_else(|_| "https://pastperfect.app".to_string())
}

/// Start a download of `href` saved as `file_name`.
pub fn trigger_download(href: &str, file_name: &str) -> AppResult<()> {
    let anchor = document()
        .create_element("a")
        .map_err(|e| AppError::browser(&e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| AppError::Download("not an anchor element".to_string()))?;
    anchor.set_href(href);
    anchor.set_download(file_name);

    let body = document()
        .body()
        .ok_or_else(|| AppError::Download("document has no body".to_string()))?;
    body.append_child(&anchor).map_err(|e| AppError::browser(&e))?;
    anchor.click();
    body.remove_child(&anchor).map_err(|e| AppError::browser(&e))?;

    log::info!("⬇️ Download started: {}", file_name);
    Ok(())
}

/// Download every result, [`DOWNLOAD_STAGGER`] apart.
pub fn download_all(results: &[ProcessedResult]) {
    for scheduled in download_plan(results, DOWNLOAD_STAGGER) {
        let href = scheduled.result.restored_reference.clone();
        let file_name = scheduled.file_name;
        let delay = u32::try_from(scheduled.offset.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(delay, move || {
            if let Err(e) = trigger_download(&href, &file_name) {
                log::error!("❌ {}", e);
            }
        })
        .forget();
    }
}

/// Put `text` on the clipboard through `navigator.clipboard.writeText`.
pub async fn copy_text(text: &str) -> AppResult<()> {
    let navigator = window().navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|e| AppError::Clipboard(format!("{:?}", e)))?;
    if clipboard.is_undefined() {
        return Err(AppError::Clipboard("clipboard API unavailable".to_string()));
    }

    let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(|e| AppError::Clipboard(format!("{:?}", e)))?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| AppError::Clipboard("writeText is not a function".to_string()))?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|e| AppError::Clipboard(format!("{:?}", e)))?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| AppError::Clipboard("writeText did not return a promise".to_string()))?;

    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| AppError::Clipboard(format!("{:?}", e)))
}

/// Open `url` in a new tab.
pub fn open_url(url: &str) -> AppResult<()> {
    window()
        .open_with_url_and_target(url, "_blank")
        .map(|_| ())
        .map_err(|e| AppError::browser(&e))
}

/// Carry out a share action. Resolves to `true` when text was copied.
pub async fn perform_share(action: ShareAction) -> AppResult<bool> {
    match action {
        ShareAction::OpenUrl(url) => open_url(&url).map(|_| false),
        ShareAction::CopyText(text) => copy_text(&text).await.map(|_| true),
    }
}

//! Object URL previews for collected files.

use pastperfect::PreviewAllocator;
use web_sys::{File, Url};

/// Allocates `blob:` URLs with `URL.createObjectURL`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectUrlPreviews;

impl PreviewAllocator<File> for ObjectUrlPreviews {
    fn allocate(&self, payload: &File) -> String {
        match Url::create_object_url_with_blob(payload) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("No preview for {}: {:?}", payload.name(), e);
                String::new()
            }
        }
    }

    fn release(&self, preview_url: &str) {
        revoke_preview(preview_url);
    }
}

/// Revoke a preview URL; empty references are ignored.
pub fn revoke_preview(preview_url: &str) {
    if preview_url.starts_with("blob:") {
        let _ = Url::revoke_object_url(preview_url);
    }
}

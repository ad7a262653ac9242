//! Restoration backend over HTTP, for the browser.
//!
//! Posts each file as `multipart/form-data` to `{API_BASE_URL}/restore`.

use std::time::Duration;

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use web_sys::{File, FormData};

use pastperfect::{
    BackendError, BackendResult, RestoreBackend, RestoreRequest, RestoreResponse, FILE_FIELD,
    SETTINGS_FIELD,
};

use crate::config;

/// Restoration backend using the browser's `fetch`.
#[derive(Clone, Debug)]
pub struct BrowserBackend {
    restore_url: String,
    send_settings: bool,
}

impl BrowserBackend {
    pub fn new(restore_url: impl Into<String>, send_settings: bool) -> Self {
        Self {
            restore_url: restore_url.into(),
            send_settings,
        }
    }

    /// Backend built from the compile-time configuration.
    pub fn from_config() -> Self {
        Self::new(config::restore_url(), config::send_settings())
    }

    fn build_form(&self, request: &RestoreRequest<'_, File>) -> BackendResult<FormData> {
        let form = FormData::new()
            .map_err(|e| BackendError::Transport(format!("Failed to create FormData: {:?}", e)))?;

        form.append_with_blob_and_filename(FILE_FIELD, &request.item.payload, &request.item.original_name)
            .map_err(|e| BackendError::Transport(format!("Failed to append file: {:?}", e)))?;

        if self.send_settings {
            let settings = serde_json::to_string(request.settings)
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            form.append_with_str(SETTINGS_FIELD, &settings)
                .map_err(|e| BackendError::Transport(format!("Failed to append settings: {:?}", e)))?;
        }

        Ok(form)
    }
}

impl RestoreBackend<File> for BrowserBackend {
    async fn restore(&self, request: RestoreRequest<'_, File>) -> BackendResult<RestoreResponse> {
        let form = self.build_form(&request)?;

        log::debug!(
            "POST {} ({}, attempt {})",
            self.restore_url,
            request.item.original_name,
            request.attempt
        );

        let response = Request::post(&self.restore_url)
            .body(form)
            .map_err(|e| BackendError::Transport(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Http {
                status: response.status(),
                body,
            });
        }

        response
            .json::<RestoreResponse>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn pause(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

//! HTTP restoration backend.
//!
//! Posts each file as `multipart/form-data` to `{api_url}/restore` and parses
//! the JSON answer.
//!
//! # Request
//!
//! | Field      | Content                                         |
//! |------------|-------------------------------------------------|
//! | `file`     | Binary file, with its original name and MIME    |
//! | `settings` | Enhancement settings JSON (only when enabled)   |

use std::path::PathBuf;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use pastperfect::{
    BackendError, BackendResult, RestoreBackend, RestoreRequest, RestoreResponse, FILE_FIELD,
    SETTINGS_FIELD,
};

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Longest response body kept in an HTTP error.
const MAX_ERROR_BODY: usize = 512;

/// Restoration backend over HTTP.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    restore_url: String,
    send_settings: bool,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        // The orchestrator owns the request timeout; only bound the connect.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("pastperfect/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            restore_url: config.restore_url(),
            send_settings: config.send_settings,
        })
    }

    pub fn restore_url(&self) -> &str {
        &self.restore_url
    }

    async fn build_form(&self, request: &RestoreRequest<'_, PathBuf>) -> BackendResult<Form> {
        let item = request.item;
        let bytes = tokio::fs::read(&item.payload)
            .await
            .map_err(|e| BackendError::Transport(format!("cannot read {}: {}", item.payload.display(), e)))?;

        let mut part = Part::bytes(bytes).file_name(item.original_name.clone());
        if !item.mime_type.is_empty() {
            part = part
                .mime_str(&item.mime_type)
                .map_err(|e| BackendError::Transport(e.to_string()))?;
        }

        let mut form = Form::new().part(FILE_FIELD, part);
        if self.send_settings {
            let settings = serde_json::to_string(request.settings)
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            form = form.text(SETTINGS_FIELD, settings);
        }
        Ok(form)
    }
}

impl RestoreBackend<PathBuf> for HttpBackend {
    async fn restore(&self, request: RestoreRequest<'_, PathBuf>) -> BackendResult<RestoreResponse> {
        let form = self.build_form(&request).await?;

        debug!(
            file = %request.item.original_name,
            attempt = request.attempt,
            url = %self.restore_url,
            "Posting file for restoration"
        );

        let response = self
            .client
            .post(&self.restore_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), file = %request.item.original_name, "Restore request failed");
            return Err(BackendError::Http {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        serde_json::from_str::<RestoreResponse>(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

fn truncate(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{spawn_restore_server, ServerMode};
    use pastperfect::{EnhancementSettings, ItemId, PendingItem};
    use std::fs;
    use tempfile::TempDir;

    fn pending(dir: &TempDir, name: &str) -> PendingItem<PathBuf> {
        let path = dir.path().join(name);
        fs::write(&path, b"fake image bytes").unwrap();
        PendingItem {
            id: ItemId::new(),
            payload: path,
            preview_url: format!("file:///tmp/{}", name),
            original_name: name.to_string(),
            size_bytes: 16,
            mime_type: "image/jpeg".to_string(),
        }
    }

    fn backend(api_url: String, send_settings: bool) -> HttpBackend {
        let config = ClientConfig {
            api_url,
            send_settings,
            ..ClientConfig::default()
        };
        HttpBackend::new(&config).unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééé", 3), "é...");
    }

    #[tokio::test]
    async fn test_restore_success() {
        let server = spawn_restore_server(ServerMode::Normal).await;
        let dir = TempDir::new().unwrap();
        let item = pending(&dir, "family.jpg");
        let settings = EnhancementSettings::default();

        let backend = backend(server.base_url(), false);
        let response = backend
            .restore(RestoreRequest { item: &item, settings: &settings, attempt: 1 })
            .await
            .unwrap();

        let (restored, original) = response.into_references().unwrap();
        assert!(restored.starts_with("data:image/jpeg;base64,"));
        assert_eq!(original.as_deref(), Some("https://cdn.test/original/family.jpg"));

        let seen = server.received();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].file_name, "family.jpg");
        assert_eq!(seen[0].content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(seen[0].size, 16);
        assert!(seen[0].settings.is_none());
    }

    #[tokio::test]
    async fn test_settings_field_sent_when_enabled() {
        let server = spawn_restore_server(ServerMode::Normal).await;
        let dir = TempDir::new().unwrap();
        let item = pending(&dir, "wedding.png");
        let settings = EnhancementSettings::default();

        let backend = backend(server.base_url(), true);
        backend
            .restore(RestoreRequest { item: &item, settings: &settings, attempt: 1 })
            .await
            .unwrap();

        let seen = server.received();
        let json = seen[0].settings.as_deref().unwrap();
        let parsed: EnhancementSettings = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[tokio::test]
    async fn test_backend_rejection_and_http_error() {
        let server = spawn_restore_server(ServerMode::Normal).await;
        let dir = TempDir::new().unwrap();
        let settings = EnhancementSettings::default();
        let backend = backend(server.base_url(), false);

        let bad = pending(&dir, "bad.jpg");
        let response = backend
            .restore(RestoreRequest { item: &bad, settings: &settings, attempt: 1 })
            .await
            .unwrap();
        assert!(matches!(response.into_references(), Err(BackendError::Rejected(_))));

        let crash = pending(&dir, "crash.jpg");
        let err = backend
            .restore(RestoreRequest { item: &crash, settings: &settings, attempt: 1 })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Http { status: 500, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let dir = TempDir::new().unwrap();
        let item = pending(&dir, "far.jpg");
        let settings = EnhancementSettings::default();

        // Port 9 (discard) is closed on test machines
        let backend = backend("http://127.0.0.1:9".to_string(), false);
        let err = backend
            .restore(RestoreRequest { item: &item, settings: &settings, attempt: 1 })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }
}

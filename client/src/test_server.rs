//! In-process restoration server for tests.
//!
//! `POST /restore` answers with the upload echoed back as a `data:` URL.
//! File names starting with `bad` get `success: false`, names starting with
//! `crash` get a 500.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

/// What the server saw in one request.
#[derive(Clone, Debug)]
pub struct ReceivedUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: usize,
    pub settings: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerMode {
    Normal,
    /// The first request gets a 503.
    FailFirst,
}

#[derive(Clone)]
struct ServerState {
    mode: ServerMode,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<ReceivedUpload>>>,
}

pub struct TestServer {
    addr: SocketAddr,
    state: ServerState,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn received(&self) -> Vec<ReceivedUpload> {
        self.state.received.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

pub async fn spawn_restore_server(mode: ServerMode) -> TestServer {
    let state = ServerState {
        mode,
        hits: Arc::new(AtomicUsize::new(0)),
        received: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/restore", post(restore))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer { addr, state }
}

async fn restore(State(state): State<ServerState>, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    if state.mode == ServerMode::FailFirst && hit == 0 {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "detail": "warming up" })),
        );
    }

    let mut upload: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut settings = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name().unwrap_or("") {
            "file" => {
                let name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(|s| s.to_string());
                let bytes = field.bytes().await.unwrap_or_default().to_vec();
                upload = Some((name, content_type, bytes));
            }
            "settings" => settings = field.text().await.ok(),
            _ => {}
        }
    }

    let Some((file_name, content_type, bytes)) = upload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "No file provided" })),
        );
    };

    state.received.lock().unwrap().push(ReceivedUpload {
        file_name: file_name.clone(),
        content_type: content_type.clone(),
        size: bytes.len(),
        settings,
    });

    if file_name.starts_with("crash") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "model crashed" })),
        );
    }
    if file_name.starts_with("bad") {
        return (
            StatusCode::OK,
            Json(json!({ "success": false, "error": "Could not detect a photo" })),
        );
    }

    let mime = content_type.unwrap_or_else(|| "application/octet-stream".to_string());
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "restored": format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)),
            "original": format!("https://cdn.test/original/{}", file_name),
        })),
    )
}

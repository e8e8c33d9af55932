//! In-process fake of the Gemini REST API for integration tests.
//!
//! Serves `models/{model}:{method}`, `operations/{id}` and `files/{name}`
//! on an ephemeral port and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use serde_json::{json, Value};

use conceptforge_gemini::{Credential, GeminiApi, GeminiConfig, PollPolicy};

pub const TEST_KEY: &str = "test-key";
pub const VIDEO_BYTES: &[u8] = b"MP4DATA";

/// Behaviour knobs for the fake server.
#[derive(Debug, Clone, Default)]
pub struct Script {
    /// Text returned by `:generateContent`.
    pub text_reply: String,
    /// When set, `:predict` answers with no predictions.
    pub no_images: bool,
    /// Status checks answered with `done: false` before the job finishes.
    pub pending_checks: usize,
    /// When set, the finished operation carries this `(code, message)` error.
    pub operation_error: Option<(i32, String)>,
    /// Delay before `files/{name}` answers.
    pub download_delay: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub call: String,
    pub body: Value,
}

pub struct FakeGemini {
    origin: String,
    script: Script,
    calls: Mutex<Vec<RecordedCall>>,
    status_checks: AtomicUsize,
    downloads: Mutex<Vec<HashMap<String, String>>>,
}

impl FakeGemini {
    /// `http://127.0.0.1:{port}`
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn base_url(&self) -> String {
        format!("{}/v1beta", self.origin)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_checks(&self) -> usize {
        self.status_checks.load(Ordering::SeqCst)
    }

    pub fn downloads(&self) -> Vec<HashMap<String, String>> {
        self.downloads.lock().unwrap().clone()
    }

    /// Config pointing at this server with a short poll cadence.
    pub fn config(&self, api_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.map(Credential::new),
            base_url: self.base_url(),
            poll: PollPolicy {
                interval: Duration::from_millis(10),
                max_polls: 5,
            },
            request_timeout: Duration::from_secs(5),
            ..GeminiConfig::default()
        }
    }

    pub fn api(&self, api_key: Option<&str>) -> GeminiApi {
        GeminiApi::new(&self.config(api_key)).unwrap()
    }
}

/// Start the fake server and return its shared state.
pub async fn spawn(script: Script) -> Arc<FakeGemini> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = Arc::new(FakeGemini {
        origin: format!("http://{addr}"),
        script,
        calls: Mutex::new(Vec::new()),
        status_checks: AtomicUsize::new(0),
        downloads: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/v1beta/models/{call}", post(models))
        .route("/v1beta/operations/{id}", get(operation))
        .route("/files/{name}", get(file))
        .with_state(Arc::clone(&state));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    state
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        == Some(TEST_KEY)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": { "code": 401, "message": "API key not valid" } })),
    )
        .into_response()
}

async fn models(
    State(state): State<Arc<FakeGemini>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    state.calls.lock().unwrap().push(RecordedCall {
        call: call.clone(),
        body: body.clone(),
    });

    let Some((_, method)) = call.split_once(':') else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match method {
        "generateContent" => Json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": state.script.text_reply }] }
            }]
        }))
        .into_response(),
        "predict" => {
            if state.script.no_images {
                return Json(json!({})).into_response();
            }
            let count = body["parameters"]["sampleCount"].as_u64().unwrap_or(1);
            let predictions: Vec<Value> = (1..=count)
                .map(|i| {
                    json!({
                        "mimeType": "image/jpeg",
                        "bytesBase64Encoded": base64::engine::general_purpose::STANDARD
                            .encode(format!("panel-{i}")),
                    })
                })
                .collect();
            Json(json!({ "predictions": predictions })).into_response()
        }
        "predictLongRunning" => Json(json!({ "name": "operations/op-1" })).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn operation(
    State(state): State<Arc<FakeGemini>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let checks = state.status_checks.fetch_add(1, Ordering::SeqCst) + 1;
    let name = format!("operations/{id}");

    if checks <= state.script.pending_checks {
        return Json(json!({ "name": name, "done": false })).into_response();
    }

    if let Some((code, message)) = &state.script.operation_error {
        return Json(json!({
            "name": name,
            "done": true,
            "error": { "code": code, "message": message }
        }))
        .into_response();
    }

    Json(json!({
        "name": name,
        "done": true,
        "response": {
            "generateVideoResponse": {
                "generatedSamples": [{
                    "video": { "uri": format!("{}/files/clip.mp4?alt=media", state.origin) }
                }]
            }
        }
    }))
    .into_response()
}

async fn file(
    State(state): State<Arc<FakeGemini>>,
    Path(_name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Some(delay) = state.script.download_delay {
        tokio::time::sleep(delay).await;
    }
    let allowed = query.get("key").map(String::as_str) == Some(TEST_KEY);
    state.downloads.lock().unwrap().push(query);
    if !allowed {
        return (StatusCode::FORBIDDEN, "missing key").into_response();
    }
    VIDEO_BYTES.to_vec().into_response()
}

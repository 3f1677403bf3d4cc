#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};

use campusrent_ai::config::gemini::GeminiConfig;
use campusrent_ai::modules;
use campusrent_ai::services::gemini::GeminiClient;
use campusrent_ai::AppState;

/// In-process stand-in for the Gemini API: serves the `generateContent`
/// route on an ephemeral port, replays a scripted reply, and counts calls.
#[derive(Clone)]
pub struct MockUpstream {
    calls: Arc<AtomicUsize>,
    reply: Arc<Mutex<MockReply>>,
    last_request: Arc<Mutex<Option<Value>>>,
}

enum MockReply {
    Text(String),
    Failure(u16, String),
}

impl MockUpstream {
    pub async fn start() -> (MockUpstream, String) {
        let mock = MockUpstream {
            calls: Arc::new(AtomicUsize::new(0)),
            reply: Arc::new(Mutex::new(MockReply::Text("{}".to_string()))),
            last_request: Arc::new(Mutex::new(None)),
        };

        let app = Router::new()
            .route("/v1beta/models/{model}", post(handle_generate))
            .with_state(mock.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (mock, format!("http://{}/v1beta", addr))
    }

    /// Script the model's next text reply.
    pub fn reply_with_text(&self, text: &str) {
        *self.reply.lock().unwrap() = MockReply::Text(text.to_string());
    }

    /// Script an upstream HTTP failure with the given status and message.
    pub fn fail_with(&self, status: u16, message: &str) {
        *self.reply.lock().unwrap() = MockReply::Failure(status, message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The JSON body of the most recent upstream request, if any.
    pub fn last_request(&self) -> Option<Value> {
        self.last_request.lock().unwrap().clone()
    }
}

async fn handle_generate(
    State(mock): State<MockUpstream>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.calls.fetch_add(1, Ordering::SeqCst);
    *mock.last_request.lock().unwrap() = Some(body);

    match &*mock.reply.lock().unwrap() {
        MockReply::Text(text) => (
            StatusCode::OK,
            Json(json!({
                "candidates": [
                    { "content": { "role": "model", "parts": [ { "text": text } ] } }
                ]
            })),
        ),
        MockReply::Failure(status, message) => (
            StatusCode::from_u16(*status).unwrap(),
            Json(json!({
                "error": { "code": status, "message": message }
            })),
        ),
    }
}

pub fn test_config(base_url: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: "test-key".to_string(),
        base_url: base_url.to_string(),
        model: "gemini-3-flash-preview".to_string(),
        timeout_secs: 5,
    }
}

/// The proxy app wired against the mock upstream.
pub fn proxy_app(base_url: &str) -> Router {
    let gemini = GeminiClient::with_config(test_config(base_url)).unwrap();
    let state = AppState { gemini };

    Router::new()
        .merge(modules::ai::routes::routes())
        .with_state(state)
}

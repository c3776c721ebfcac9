//! Test doubles and request helpers shared by handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use kotoba_provider::{Prompt, ProviderError, TextGenerator};

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::GatewayState;

enum Behavior {
    Reply(Result<String, ProviderError>),
    Hang,
}

/// A `TextGenerator` that replays a fixed outcome and records calls.
pub(crate) struct StubGenerator {
    behavior: Behavior,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<Prompt>>,
}

impl StubGenerator {
    fn with(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub(crate) fn replying(text: &str) -> Arc<Self> {
        Self::with(Behavior::Reply(Ok(text.to_string())))
    }

    pub(crate) fn failing(error: ProviderError) -> Arc<Self> {
        Self::with(Behavior::Reply(Err(error)))
    }

    /// Never resolves.
    pub(crate) fn hanging() -> Arc<Self> {
        Self::with(Behavior::Hang)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_prompt(&self) -> Option<Prompt> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.clone());

        match &self.behavior {
            Behavior::Reply(outcome) => outcome.clone(),
            Behavior::Hang => futures::future::pending().await,
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// A JSON array of `n` well-formed vocabulary entries.
pub(crate) fn vocabulary_json(n: usize) -> String {
    let entries: Vec<_> = (0..n)
        .map(|i| {
            serde_json::json!({
                "word": format!("単語{i}"),
                "reading": format!("たんご{i}"),
                "meaning": format!("word {i}"),
                "example": "これは例です。",
                "exampleTranslation": "This is an example.",
                "level": "N3",
            })
        })
        .collect();
    Value::Array(entries).to_string()
}

pub(crate) fn state_with(generator: Arc<dyn TextGenerator>) -> Arc<GatewayState> {
    Arc::new(GatewayState::new(generator, GatewayConfig::default()))
}

pub(crate) fn router_with(generator: Arc<dyn TextGenerator>) -> Router {
    router_with_config(generator, GatewayConfig::default())
}

pub(crate) fn router_with_config(generator: Arc<dyn TextGenerator>, config: GatewayConfig) -> Router {
    create_router(GatewayState::new(generator, config))
}

pub(crate) async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub(crate) async fn post_raw(app: Router, uri: &str, body: &'static str) -> (StatusCode, Value) {
    send(
        app,
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

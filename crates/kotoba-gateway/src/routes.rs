//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, translate, vocabulary};
use crate::state::GatewayState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `POST /api/translate` - Translate text
/// - `POST /api/vocabulary` - Generate vocabulary entries
pub fn create_router(state: GatewayState) -> Router {
    // Extract config values before moving state
    let cors = build_cors_layer(&state.config.cors_origins);
    let max_body_bytes = state.config.max_body_bytes;

    let state = Arc::new(state);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/translate", post(translate::translate))
        .route("/api/vocabulary", post(vocabulary::generate_vocabulary))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::GatewayConfig;
    use crate::testing::{router_with, router_with_config, StubGenerator};

    async fn allowed_origin(cors_origins: &[&str], origin: &str) -> Option<String> {
        let config = GatewayConfig {
            cors_origins: cors_origins.iter().map(ToString::to_string).collect(),
            ..GatewayConfig::default()
        };

        let response = router_with_config(StubGenerator::replying("unused"), config)
            .oneshot(
                Request::get("/health")
                    .header("origin", origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn cors_any_origin() {
        let allowed = allowed_origin(&["*"], "https://anywhere.example").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn cors_specific_origins() {
        let origins = ["http://localhost:3000", "not a header\n"];

        let allowed = allowed_origin(&origins, "http://localhost:3000").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:3000"));

        let allowed = allowed_origin(&origins, "https://evil.example").await;
        assert_eq!(allowed, None);
    }

    #[tokio::test]
    async fn health_route_is_mounted() {
        let response = router_with(StubGenerator::replying("unused"))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = router_with(StubGenerator::replying("unused"))
            .oneshot(Request::get("/api/kanji").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn oversized_body_rejected() {
        let config = GatewayConfig {
            max_body_bytes: 16,
            ..GatewayConfig::default()
        };
        let stub = StubGenerator::replying("unused");
        let body = serde_json::json!({ "text": "x".repeat(64), "sourceLang": "en", "targetLang": "ja" });

        let response = router_with_config(stub.clone(), config)
            .oneshot(
                Request::post("/api/translate")
                    .header("content-type", "application/json")
                    .header("content-length", body.to_string().len())
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn oversized_chunked_body_rejected() {
        let config = GatewayConfig {
            max_body_bytes: 16,
            ..GatewayConfig::default()
        };
        let stub = StubGenerator::replying("unused");
        let chunks = vec![
            Ok::<_, std::io::Error>(r#"{"text": ""#.to_string()),
            Ok("x".repeat(64)),
            Ok(r#"", "sourceLang": "en", "targetLang": "ja"}"#.to_string()),
        ];

        let response = router_with_config(stub.clone(), config)
            .oneshot(
                Request::post("/api/translate")
                    .header("content-type", "application/json")
                    .body(Body::from_stream(futures::stream::iter(chunks)))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "payload_too_large");
        assert_eq!(stub.calls(), 0);
    }
}

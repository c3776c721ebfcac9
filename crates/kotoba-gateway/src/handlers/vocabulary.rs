//! Vocabulary generation endpoint.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use kotoba_core::validate_vocabulary;

use crate::error::ApiError;
use crate::guard;
use crate::state::GatewayState;

/// Generate vocabulary entries for a proficiency tier and optional topic.
///
/// `count` defaults to 6.
///
/// # Example
///
/// ```text
/// POST /api/vocabulary
/// { "query": "food", "level": "N4", "count": 3 }
///
/// Response: 200 OK
/// {
///   "vocabulary": [
///     { "word": "食べ物", "reading": "たべもの", "meaning": "food", "level": "N4" },
///     ...
///   ],
///   "success": true
/// }
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The payload fails validation (400)
/// - The provider rate limits the request (429)
/// - The provider misses the deadline (504)
/// - The provider call fails or returns malformed entries (502)
pub async fn generate_vocabulary(
    State(state): State<Arc<GatewayState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(raw) = payload?;
    let request = validate_vocabulary(raw, &state.config.request_limits())?;

    tracing::debug!(
        level = ?request.level,
        query = ?request.query,
        count = request.count,
        "Generating vocabulary"
    );

    let response = guard::race(
        state.config.provider_timeout(),
        state.invoker.generate_vocabulary(&request),
    )
    .await?
    .map_err(ApiError::vocabulary_failed)?;

    tracing::info!(
        entries = response.vocabulary.len(),
        provider = state.invoker.provider_name(),
        "Vocabulary generated"
    );

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use kotoba_provider::ProviderError;
    use serde_json::json;

    use crate::config::GatewayConfig;
    use crate::testing::{post_json, router_with, router_with_config, vocabulary_json, StubGenerator};

    #[tokio::test]
    async fn generates_requested_entries_with_level() {
        let stub = StubGenerator::replying(&vocabulary_json(3));

        let (status, body) = post_json(
            router_with(stub.clone()),
            "/api/vocabulary",
            json!({ "query": "food", "level": "N4", "count": 3 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let items = body["vocabulary"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|item| item["level"] == "N4"));

        let prompt = stub.last_prompt().unwrap();
        assert!(prompt.text.contains("exactly 3"));
        assert!(prompt.text.contains("\"food\""));
    }

    #[tokio::test]
    async fn missing_count_defaults_to_six() {
        let stub = StubGenerator::replying(&vocabulary_json(6));

        let (status, _) = post_json(router_with(stub.clone()), "/api/vocabulary", json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert!(stub.last_prompt().unwrap().text.contains("exactly 6"));
    }

    #[tokio::test]
    async fn validation_failure_lists_violations() {
        let stub = StubGenerator::replying("unused");

        let (status, body) = post_json(
            router_with(stub.clone()),
            "/api/vocabulary",
            json!({ "query": 5, "count": "many" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let details = body["error"]["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["field"], "query");
        assert_eq!(details[1]["field"], "count");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn configured_count_ceiling_enforced() {
        let config = GatewayConfig {
            max_vocabulary_count: Some(10),
            ..GatewayConfig::default()
        };
        let stub = StubGenerator::replying("unused");

        let (status, body) = post_json(
            router_with_config(stub.clone(), config),
            "/api/vocabulary",
            json!({ "count": 11 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["details"][0]["constraint"], "range");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn rate_limit_message_yields_rate_limited() {
        let stub = StubGenerator::failing(ProviderError::Transport(
            "[GoogleGenerativeAI Error]: [429 Too Many Requests] quota exceeded".to_string(),
        ));

        let (status, body) = post_json(router_with(stub), "/api/vocabulary", json!({})).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"]["code"], "rate_limited");
        assert_eq!(
            body["error"]["message"],
            "Rate limit exceeded, please try again later"
        );
    }

    #[tokio::test]
    async fn generic_failure_carries_provider_message() {
        let stub = StubGenerator::failing(ProviderError::Upstream {
            status: 500,
            message: "model overloaded".to_string(),
        });

        let (status, body) = post_json(router_with(stub), "/api/vocabulary", json!({})).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Failed to generate vocabulary"));
        assert!(message.contains("model overloaded"));
    }

    #[tokio::test]
    async fn malformed_provider_output_is_provider_error() {
        let stub = StubGenerator::replying(r#"[{"word": "水"}]"#);

        let (status, body) = post_json(router_with(stub), "/api/vocabulary", json!({})).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("malformed upstream response"));
    }

    #[tokio::test]
    async fn unconfigured_provider_is_unavailable() {
        let app = router_with(std::sync::Arc::new(kotoba_provider::NoopGenerator::new()));

        let (status, body) = post_json(app, "/api/vocabulary", json!({})).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "provider_unavailable");
    }

    #[tokio::test(start_paused = true)]
    async fn hung_provider_times_out_after_fifteen_seconds() {
        let start = tokio::time::Instant::now();

        let (status, body) = post_json(
            router_with(StubGenerator::hanging()),
            "/api/vocabulary",
            json!({ "level": "N5" }),
        )
        .await;

        let elapsed = start.elapsed();
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            body["error"]["message"],
            "Request took too long, please try again"
        );
        assert!(elapsed >= Duration::from_secs(15));
        assert!(elapsed < Duration::from_secs(15) + Duration::from_millis(100));
    }
}

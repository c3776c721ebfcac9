//! Translation endpoint.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use kotoba_core::validate_translation;

use crate::error::ApiError;
use crate::guard;
use crate::state::GatewayState;

/// Translate text between two languages.
///
/// # Example
///
/// ```text
/// POST /api/translate
/// { "text": "hello", "sourceLang": "en", "targetLang": "ja" }
///
/// Response: 200 OK
/// { "translatedText": "こんにちは" }
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The payload fails validation (400)
/// - The provider rate limits the request (429)
/// - The provider misses the deadline (504)
/// - The provider call fails (502)
pub async fn translate(
    State(state): State<Arc<GatewayState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(raw) = payload?;
    let request = validate_translation(raw)?;

    tracing::debug!(
        source_lang = %request.source_lang,
        target_lang = %request.target_lang,
        chars = request.text.chars().count(),
        "Translating"
    );

    let response = guard::race(
        state.config.provider_timeout(),
        state.invoker.translate(&request),
    )
    .await?
    .map_err(ApiError::translation_failed)?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::testing::{post_json, router_with, StubGenerator};

    #[tokio::test]
    async fn translates_valid_request() {
        let stub = StubGenerator::replying("こんにちは");
        let app = router_with(stub.clone());

        let (status, body) = post_json(
            app,
            "/api/translate",
            json!({ "text": "hello", "sourceLang": "en", "targetLang": "ja" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translatedText"], "こんにちは");
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_provider() {
        let stub = StubGenerator::replying("unused");

        for payload in [
            json!({ "text": "", "sourceLang": "en", "targetLang": "ja" }),
            json!({ "text": "a".repeat(1001), "sourceLang": "en", "targetLang": "ja" }),
            json!({ "text": "hi", "sourceLang": "e", "targetLang": "ja" }),
            json!({ "text": "hi", "sourceLang": "en", "targetLang": "jpn-JP" }),
            json!({ "text": "hi" }),
        ] {
            let (status, body) = post_json(router_with(stub.clone()), "/api/translate", payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "invalid_request");
            assert_eq!(body["error"]["message"], "Invalid request data");
            assert!(!body["error"]["details"].as_array().unwrap().is_empty());
        }

        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_request() {
        let app = router_with(StubGenerator::replying("unused"));
        let (status, body) = crate::testing::post_raw(app, "/api/translate", "text=hello").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["details"][0]["field"], "body");
    }

    #[tokio::test]
    async fn provider_failure_is_generic() {
        let stub = StubGenerator::failing(kotoba_provider::ProviderError::Upstream {
            status: 500,
            message: "internal model error".to_string(),
        });

        let (status, body) = post_json(
            router_with(stub),
            "/api/translate",
            json!({ "text": "hello", "sourceLang": "en", "targetLang": "ja" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], "Translation failed");
        assert!(body["error"].get("details").is_none());
        assert_eq!(body["success"], false);
    }

    #[tokio::test(start_paused = true)]
    async fn translation_is_deadline_bounded() {
        let start = tokio::time::Instant::now();

        let (status, body) = post_json(
            router_with(StubGenerator::hanging()),
            "/api/translate",
            json!({ "text": "hello", "sourceLang": "en", "targetLang": "ja" }),
        )
        .await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"]["code"], "timeout");
        assert!(start.elapsed() >= Duration::from_secs(15));
    }
}

//! HTTP client for the Google Gemini `generateContent` API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::{ProviderError, Result};
use crate::generator::{Prompt, TextGenerator};

/// Connection settings for [`GeminiClient`].
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key, sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Model id, e.g. `gemini-1.5-flash`.
    pub model: String,
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Transport-level timeout for one call.
    pub request_timeout: Duration,
}

impl GeminiConfig {
    /// Model used when none is configured.
    pub const DEFAULT_MODEL: &'static str = "gemini-1.5-flash";

    /// Public API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Create a configuration with the default model and endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }

    /// Override the model id.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API root (used to point tests at a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the transport timeout for one call.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Text generator backed by Gemini.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

/// Error envelope returned by Google APIs.
#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn payload(prompt: &Prompt) -> Value {
        let mut generation_config = Map::new();
        if let Some(temperature) = prompt.params.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if prompt.params.json_output {
            generation_config.insert("responseMimeType".to_string(), json!("application/json"));
        }

        let mut payload = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt.text }] }]
        });
        if !generation_config.is_empty() {
            payload["generationConfig"] = Value::Object(generation_config);
        }
        payload
    }

    /// Map a non-success response to a `ProviderError`, preferring the status
    /// code and Google's structured `status` over message text.
    async fn error_from_response(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return ProviderError::RateLimited;
        }

        match response.json::<GoogleErrorResponse>().await {
            Ok(body) if body.error.status == "RESOURCE_EXHAUSTED" => ProviderError::RateLimited,
            Ok(body) => ProviderError::Upstream {
                status: status.as_u16(),
                message: body.error.message,
            },
            Err(_) => ProviderError::Upstream {
                status: status.as_u16(),
                message: format!("Gemini returned status {status}"),
            },
        }
    }

    fn extract_text(body: &Value) -> Result<String> {
        let candidate = body
            .get("candidates")
            .and_then(Value::as_array)
            .and_then(|c| c.first());

        let Some(candidate) = candidate else {
            let reason = body
                .pointer("/promptFeedback/blockReason")
                .and_then(Value::as_str)
                .unwrap_or("no candidates returned");
            return Err(ProviderError::MalformedResponse(format!(
                "Gemini returned no candidates: {reason}"
            )));
        };

        let parts = candidate
            .pointer("/content/parts")
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::MalformedResponse("invalid content format".to_string()))?;

        Ok(parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &Prompt) -> Result<String> {
        let response = self
            .client
            .post(self.config.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&Self::payload(prompt))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let error = Self::error_from_response(response).await;
            tracing::warn!(
                model = %self.config.model,
                error = %error,
                "Gemini request failed"
            );
            return Err(error);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::TimedOut
                } else {
                    ProviderError::MalformedResponse(format!("invalid JSON body: {e}"))
                }
            })?;

        let text = Self::extract_text(&body)?;
        tracing::debug!(
            model = %self.config.model,
            chars = text.chars().count(),
            "Gemini generation complete"
        );
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::TimedOut
    } else {
        ProviderError::Transport(err.to_string())
    }
}

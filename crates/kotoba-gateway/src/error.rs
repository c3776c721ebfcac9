//! API error types and responses.
//!
//! Every failure is turned into one of these at the handler boundary.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use kotoba_core::{ValidationError, Violation};
use kotoba_provider::ProviderError;

use crate::guard::DeadlineExceeded;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The payload failed validation.
    #[error("Invalid request data")]
    ValidationFailed(Vec<Violation>),

    /// The provider throttled the request.
    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    /// The provider did not answer before the deadline.
    #[error("Request took too long, please try again")]
    Timeout,

    /// The provider call failed for any other reason.
    #[error("{0}")]
    Provider(String),

    /// No provider is configured.
    #[error("Text generation is not available")]
    ProviderUnavailable,

    /// The request body exceeded the configured size limit.
    #[error("Request body too large")]
    PayloadTooLarge,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
    success: bool,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<Violation>>,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Provider(_) => StatusCode::BAD_GATEWAY,
            Self::ProviderUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ValidationFailed(_) => "invalid_request",
            Self::RateLimited => "rate_limited",
            Self::Timeout => "timeout",
            Self::Provider(_) => "provider_error",
            Self::ProviderUnavailable => "provider_unavailable",
            Self::PayloadTooLarge => "payload_too_large",
        }
    }

    /// Map a translation failure. Provider detail is logged, not returned.
    #[must_use]
    pub fn translation_failed(err: ProviderError) -> Self {
        match err {
            ProviderError::RateLimited => Self::RateLimited,
            ProviderError::TimedOut => Self::Timeout,
            ProviderError::NotConfigured => Self::ProviderUnavailable,
            other => {
                tracing::error!(error = %other, malformed = other.is_malformed(), "Translation failed");
                Self::Provider("Translation failed".to_string())
            }
        }
    }

    /// Map a vocabulary failure. The provider message is passed through.
    #[must_use]
    pub fn vocabulary_failed(err: ProviderError) -> Self {
        match err {
            ProviderError::RateLimited => Self::RateLimited,
            ProviderError::TimedOut => Self::Timeout,
            ProviderError::NotConfigured => Self::ProviderUnavailable,
            other => {
                tracing::error!(
                    error = %other,
                    malformed = other.is_malformed(),
                    "Vocabulary generation failed"
                );
                Self::Provider(format!("Failed to generate vocabulary: {other}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();
        let details = match self {
            Self::ValidationFailed(violations) => Some(violations),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                details,
            },
            success: false,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::debug!(error = %err, "Rejected request");
        Self::ValidationFailed(err.violations)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge;
        }
        Self::from(ValidationError::malformed_body(rejection.body_text()))
    }
}

impl From<DeadlineExceeded> for ApiError {
    fn from(err: DeadlineExceeded) -> Self {
        tracing::warn!(error = %err, "Provider call abandoned");
        Self::Timeout
    }
}

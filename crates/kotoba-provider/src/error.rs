//! Provider error types.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// A result type using `ProviderError`.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Rate-limit wording seen in provider error text.
///
/// Only consulted when the provider gave no structured signal (HTTP 429 or a
/// `RESOURCE_EXHAUSTED` status), since message text can change without notice.
static RATE_LIMIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b429\b|rate[\s_-]?limit|quota|resource[\s_-]?exhausted|too many requests")
        .expect("rate-limit pattern is valid")
});

/// Errors from a call to the text-generation provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider throttled the request.
    #[error("rate limited by provider")]
    RateLimited,

    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Error message from the provider, if any.
        message: String,
    },

    /// The request never produced a response (connect, TLS, body read).
    #[error("provider request failed: {0}")]
    Transport(String),

    /// The transport timeout elapsed before the provider answered.
    #[error("provider request timed out")]
    TimedOut,

    /// The provider answered, but not in the expected shape.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    /// No provider credentials are configured.
    #[error("no text-generation provider configured")]
    NotConfigured,
}

impl ProviderError {
    /// Promote errors whose message carries a rate-limit indicator to
    /// [`ProviderError::RateLimited`]. Other errors are returned unchanged.
    #[must_use]
    pub fn classified(self) -> Self {
        let promote = match &self {
            Self::Upstream { message, .. } | Self::Transport(message) => classify_message(message),
            _ => false,
        };

        if promote {
            tracing::debug!(error = %self, "Classified provider error as rate limit by message text");
            Self::RateLimited
        } else {
            self
        }
    }

    /// Returns true if this error concerns the response body rather than the call.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }
}

/// Returns true if `message` contains a rate-limit indicator.
#[must_use]
pub fn classify_message(message: &str) -> bool {
    RATE_LIMIT_PATTERN.is_match(message)
}

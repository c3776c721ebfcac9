//! Gateway configuration types.
//!
//! Configuration comes from environment variables (see [`GatewayConfig::from_env`]);
//! every field has a default so an empty environment yields a working
//! development setup.

use std::time::Duration;

use kotoba_core::RequestLimits;
use kotoba_provider::GeminiConfig;
use thiserror::Error;

/// Headroom between the provider deadline and the HTTP client timeout.
const TRANSPORT_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable could not be parsed.
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        /// Environment variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Configuration for the gateway service.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:8080").
    pub listen_addr: String,

    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Deadline for one provider call, in seconds. Applies to every endpoint.
    pub provider_timeout_seconds: u64,

    /// Largest vocabulary `count` accepted. Unset means no ceiling.
    pub max_vocabulary_count: Option<u32>,

    /// Provider connection settings.
    pub provider: ProviderSettings,
}

/// Text-generation provider settings.
#[derive(Clone)]
pub struct ProviderSettings {
    /// Gemini API key. Without one the gateway runs with a no-op provider.
    pub api_key: Option<String>,

    /// Gemini model id.
    pub model: String,

    /// Gemini API root.
    pub base_url: String,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    fn default_cors_origins() -> Vec<String> {
        vec!["*".to_string()]
    }

    const fn default_max_body() -> usize {
        64 * 1024 // 64 KB
    }

    const fn default_provider_timeout() -> u64 {
        15
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `LISTEN_ADDR` | `listen_addr` |
    /// | `CORS_ORIGINS` | `cors_origins` (comma separated) |
    /// | `MAX_BODY_BYTES` | `max_body_bytes` |
    /// | `PROVIDER_TIMEOUT_SECONDS` | `provider_timeout_seconds` |
    /// | `MAX_VOCABULARY_COUNT` | `max_vocabulary_count` |
    /// | `GEMINI_API_KEY` | `provider.api_key` |
    /// | `GEMINI_MODEL` | `provider.model` |
    /// | `GEMINI_BASE_URL` | `provider.base_url` |
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or is zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(raw) = get("MAX_BODY_BYTES") {
            config.max_body_bytes = parse_positive("MAX_BODY_BYTES", &raw)?;
        }
        if let Some(raw) = get("PROVIDER_TIMEOUT_SECONDS") {
            config.provider_timeout_seconds = parse_positive("PROVIDER_TIMEOUT_SECONDS", &raw)?;
        }
        if let Some(raw) = get("MAX_VOCABULARY_COUNT") {
            config.max_vocabulary_count = Some(parse_positive("MAX_VOCABULARY_COUNT", &raw)?);
        }

        config.provider.api_key = get("GEMINI_API_KEY");
        if let Some(model) = get("GEMINI_MODEL") {
            config.provider.model = model;
        }
        if let Some(base_url) = get("GEMINI_BASE_URL") {
            config.provider.base_url = base_url;
        }

        Ok(config)
    }

    /// Get the provider deadline as a `Duration`.
    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_seconds)
    }

    /// Gemini client settings, if an API key is configured.
    ///
    /// The transport timeout is set past the provider deadline so a slow
    /// provider is always reported as a gateway timeout.
    #[must_use]
    pub fn gemini(&self) -> Option<GeminiConfig> {
        self.provider.api_key.as_ref().map(|key| {
            GeminiConfig::new(key.clone())
                .with_model(self.provider.model.clone())
                .with_base_url(self.provider.base_url.clone())
                .with_request_timeout(self.provider_timeout() + TRANSPORT_TIMEOUT_MARGIN)
        })
    }

    /// Request limits enforced by validation.
    #[must_use]
    pub fn request_limits(&self) -> RequestLimits {
        RequestLimits {
            max_vocabulary_count: self.max_vocabulary_count,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            cors_origins: Self::default_cors_origins(),
            max_body_bytes: Self::default_max_body(),
            provider_timeout_seconds: Self::default_provider_timeout(),
            max_vocabulary_count: None,
            provider: ProviderSettings::default(),
        }
    }
}

impl ProviderSettings {
    fn default_model() -> String {
        GeminiConfig::DEFAULT_MODEL.to_string()
    }

    fn default_base_url() -> String {
        GeminiConfig::DEFAULT_BASE_URL.to_string()
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Self::default_model(),
            base_url: Self::default_base_url(),
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let invalid = |reason: String| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason,
    };

    let value: T = raw.trim().parse().map_err(|e: T::Err| invalid(e.to_string()))?;
    if value == T::default() {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(value)
}

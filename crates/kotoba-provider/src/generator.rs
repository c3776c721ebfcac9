//! The text-generation seam.
//!
//! Everything that talks to a model goes through [`TextGenerator`], which lets
//! handlers and tests swap the Gemini client for a stub.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ProviderError, Result};

/// Sampling parameters passed alongside a prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationParams {
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Ask the provider for a JSON document instead of free text.
    pub json_output: bool,
}

/// A fully rendered prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prompt {
    /// Prompt text sent as the single user turn.
    pub text: String,
    /// Generation parameters.
    pub params: GenerationParams,
}

impl Prompt {
    /// Create a free-text prompt with default parameters.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: GenerationParams::default(),
        }
    }

    /// Replace the generation parameters.
    #[must_use]
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

/// A remote text-generation capability.
///
/// Implementations make exactly one provider call per `generate` and never
/// retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the prompt.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::RateLimited` when the provider signals
    /// throttling, and another `ProviderError` for any other failure.
    async fn generate(&self, prompt: &Prompt) -> Result<String>;

    /// Short provider name used in logs.
    fn name(&self) -> &'static str;
}

/// A generator for when no provider credentials are configured.
///
/// Every call fails with `ProviderError::NotConfigured`.
#[derive(Debug, Clone, Default)]
pub struct NoopGenerator;

impl NoopGenerator {
    /// Create a new no-op generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextGenerator for NoopGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<String> {
        tracing::warn!(
            prompt_chars = prompt.text.chars().count(),
            "NoopGenerator: generate called but no provider configured"
        );
        Err(ProviderError::NotConfigured)
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

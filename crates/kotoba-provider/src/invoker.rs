//! The remote-AI invoker: prompt, one provider call, shape check.

use std::sync::Arc;

use kotoba_core::{TranslationRequest, TranslationResponse, VocabularyRequest, VocabularyResponse};

use crate::error::Result;
use crate::generator::TextGenerator;
use crate::parse::{parse_translation, parse_vocabulary};
use crate::prompts::{translation_prompt, vocabulary_prompt};

/// Issues translation and vocabulary requests against a [`TextGenerator`].
///
/// Each method makes exactly one provider call. Errors are returned already
/// classified, so a rate-limit message surfaces as
/// [`ProviderError::RateLimited`](crate::ProviderError::RateLimited).
#[derive(Clone)]
pub struct Invoker {
    generator: Arc<dyn TextGenerator>,
}

impl Invoker {
    /// Create an invoker over the given generator.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Name of the underlying provider.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Translate text between the request's languages.
    ///
    /// # Errors
    ///
    /// Returns the provider's error, or `MalformedResponse` for blank output.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        let prompt = translation_prompt(request);
        let raw = self
            .generator
            .generate(&prompt)
            .await
            .map_err(crate::ProviderError::classified)?;

        Ok(TranslationResponse {
            translated_text: parse_translation(&raw)?,
        })
    }

    /// Generate vocabulary entries for the request.
    ///
    /// # Errors
    ///
    /// Returns the provider's error, or `MalformedResponse` if the output does
    /// not match the vocabulary entry shape.
    pub async fn generate_vocabulary(
        &self,
        request: &VocabularyRequest,
    ) -> Result<VocabularyResponse> {
        let prompt = vocabulary_prompt(request);
        let raw = self
            .generator
            .generate(&prompt)
            .await
            .map_err(crate::ProviderError::classified)?;

        let items = parse_vocabulary(&raw)?;
        if items.len() != request.count as usize {
            tracing::debug!(
                requested = request.count,
                returned = items.len(),
                "Provider returned a different number of vocabulary entries"
            );
        }

        Ok(VocabularyResponse::new(items, request.level.as_deref()))
    }
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker")
            .field("provider", &self.generator.name())
            .finish()
    }
}

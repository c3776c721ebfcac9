//! Validated request types.
//!
//! Values of these types only exist after [`crate::validation`] has accepted a
//! payload, so downstream code never re-checks bounds.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of vocabulary entries requested when the caller omits `count`.
pub const DEFAULT_VOCABULARY_COUNT: u32 = 6;

/// A request to translate `text` from `source_lang` to `target_lang`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    /// Text to translate.
    #[validate(length(min = 1, max = 1000, message = "must be between 1 and 1000 characters"))]
    pub text: String,
    /// Language code of `text`.
    #[validate(length(min = 2, max = 5, message = "must be between 2 and 5 characters"))]
    pub source_lang: String,
    /// Language code to translate into.
    #[validate(length(min = 2, max = 5, message = "must be between 2 and 5 characters"))]
    pub target_lang: String,
}

impl TranslationRequest {
    /// Create a request without validating it.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

/// A request to generate vocabulary entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyRequest {
    /// Topic filter. `None` means no filter.
    pub query: Option<String>,
    /// Proficiency tier (e.g. `N5`). Free-form; not checked against a fixed set.
    pub level: Option<String>,
    /// Number of entries to generate, already defaulted.
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub count: u32,
}

impl VocabularyRequest {
    /// The topic filter, if one was given.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

impl Default for VocabularyRequest {
    fn default() -> Self {
        Self {
            query: None,
            level: None,
            count: DEFAULT_VOCABULARY_COUNT,
        }
    }
}

/// Gateway-wide request limits that are configured rather than fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestLimits {
    /// Largest accepted vocabulary `count`. `None` leaves it unbounded.
    pub max_vocabulary_count: Option<u32>,
}

impl RequestLimits {
    /// Limits with a vocabulary count ceiling.
    #[must_use]
    pub const fn with_max_vocabulary_count(max: u32) -> Self {
        Self {
            max_vocabulary_count: Some(max),
        }
    }
}

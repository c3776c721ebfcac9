//! Response payloads returned to clients.

use serde::{Deserialize, Serialize};

/// Successful translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    /// Text as returned by the provider, trimmed.
    pub translated_text: String,
}

/// A single vocabulary entry.
///
/// The provider produces these; the gateway checks that the required fields
/// are present and non-empty but does not judge their content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    /// The word in Japanese script.
    pub word: String,
    /// Kana reading.
    pub reading: String,
    /// English meaning.
    pub meaning: String,
    /// Example sentence using the word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Translation of `example`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
    /// Proficiency tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Successful vocabulary generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyResponse {
    /// Generated entries.
    pub vocabulary: Vec<VocabularyItem>,
    /// Always `true`; failures use the error body instead.
    pub success: bool,
}

impl VocabularyResponse {
    /// Wrap generated entries, stamping the requested tier onto each one.
    #[must_use]
    pub fn new(mut vocabulary: Vec<VocabularyItem>, level: Option<&str>) -> Self {
        if let Some(level) = level {
            for item in &mut vocabulary {
                item.level = Some(level.to_string());
            }
        }

        Self {
            vocabulary,
            success: true,
        }
    }
}

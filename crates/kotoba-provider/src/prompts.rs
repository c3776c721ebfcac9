//! Prompt templates.

use kotoba_core::{TranslationRequest, VocabularyRequest};

use crate::generator::{GenerationParams, Prompt};

const TRANSLATION_TEMPERATURE: f32 = 0.3;
const VOCABULARY_TEMPERATURE: f32 = 0.7;

/// Build the prompt for a direct translation.
#[must_use]
pub fn translation_prompt(request: &TranslationRequest) -> Prompt {
    let text = format!(
        "Translate the following text from {source} to {target}.\n\
         Return only the translated text, with no explanations, notes or quotation marks.\n\n\
         Text:\n{text}",
        source = request.source_lang,
        target = request.target_lang,
        text = request.text,
    );

    Prompt::new(text).with_params(GenerationParams {
        temperature: Some(TRANSLATION_TEMPERATURE),
        ..GenerationParams::default()
    })
}

/// Build the prompt asking for `count` vocabulary entries.
#[must_use]
pub fn vocabulary_prompt(request: &VocabularyRequest) -> Prompt {
    let mut text = format!(
        "Generate exactly {count} Japanese vocabulary words for a language learner",
        count = request.count
    );

    match request.level.as_deref() {
        Some(level) => text.push_str(&format!(" at JLPT level {level}")),
        None => text.push_str(" at any JLPT level"),
    }
    if let Some(topic) = request.topic() {
        text.push_str(&format!(" related to \"{}\"", topic.trim()));
    }

    text.push_str(
        ".\n\nRespond with a JSON array only. Each element must be an object with these fields:\n\
         - \"word\": the word in Japanese script\n\
         - \"reading\": its reading in hiragana\n\
         - \"meaning\": its English meaning\n\
         - \"example\": a short Japanese example sentence using the word\n\
         - \"exampleTranslation\": the English translation of the example\n\
         - \"level\": the JLPT level of the word (N5 to N1)",
    );

    Prompt::new(text).with_params(GenerationParams {
        temperature: Some(VOCABULARY_TEMPERATURE),
        json_output: true,
        ..GenerationParams::default()
    })
}

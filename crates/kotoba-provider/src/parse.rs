//! Shape checks on provider output.
//!
//! Models are trusted for content, not for form. Output that does not match
//! the expected shape becomes `ProviderError::MalformedResponse` here instead
//! of failing somewhere further down.

use kotoba_core::VocabularyItem;
use serde_json::Value;

use crate::error::{ProviderError, Result};

/// Extract a translation from raw model output.
///
/// # Errors
///
/// Returns `MalformedResponse` if the output is blank.
pub fn parse_translation(raw: &str) -> Result<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ProviderError::MalformedResponse(
            "empty translation".to_string(),
        ));
    }
    Ok(text.to_string())
}

/// Parse and check vocabulary entries from raw model output.
///
/// Accepts a JSON array of entries, or an object with a `vocabulary` array,
/// optionally wrapped in a Markdown code fence.
///
/// # Errors
///
/// Returns `MalformedResponse` if the output is not JSON, has neither accepted
/// shape, is empty, or contains an entry with a missing or blank `word`,
/// `reading` or `meaning`.
pub fn parse_vocabulary(raw: &str) -> Result<Vec<VocabularyItem>> {
    let body = strip_code_fence(raw);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("not valid JSON: {e}")))?;

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("vocabulary") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(ProviderError::MalformedResponse(
                    "expected a `vocabulary` array".to_string(),
                ))
            }
        },
        _ => {
            return Err(ProviderError::MalformedResponse(
                "expected a JSON array of entries".to_string(),
            ))
        }
    };

    if entries.is_empty() {
        return Err(ProviderError::MalformedResponse(
            "no vocabulary entries".to_string(),
        ));
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect()
}

fn parse_entry(index: usize, entry: Value) -> Result<VocabularyItem> {
    let item: VocabularyItem = serde_json::from_value(entry)
        .map_err(|e| ProviderError::MalformedResponse(format!("entry {index}: {e}")))?;

    for (field, value) in [
        ("word", &item.word),
        ("reading", &item.reading),
        ("meaning", &item.meaning),
    ] {
        if value.trim().is_empty() {
            return Err(ProviderError::MalformedResponse(format!(
                "entry {index}: `{field}` is blank"
            )));
        }
    }

    Ok(item)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. `json`) on the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

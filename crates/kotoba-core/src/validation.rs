//! Payload validation.
//!
//! Validation runs in two passes. The shape pass reads each expected field out
//! of the raw JSON object and records `required` and `type` violations. The
//! bounds pass runs the `validator` rules on the typed request and records
//! `length` and `range` violations for fields that survived the shape pass.
//! All violations from both passes are returned together.

use serde_json::{json, Map, Value};
use validator::Validate;

use crate::error::{Result, ValidationError, Violation};
use crate::request::{RequestLimits, TranslationRequest, VocabularyRequest, DEFAULT_VOCABULARY_COUNT};

const TRANSLATION_FIELDS: &[&str] = &["text", "sourceLang", "targetLang"];
const VOCABULARY_FIELDS: &[&str] = &["query", "level", "count"];

/// Validate an untyped translation payload.
///
/// # Errors
///
/// Returns a `ValidationError` listing every violated constraint if `text` is
/// missing, empty or longer than 1000 characters, or if either language code
/// is missing or outside 2-5 characters.
pub fn validate_translation(raw: Value) -> Result<TranslationRequest> {
    let Value::Object(map) = raw else {
        return Err(ValidationError::malformed_body("expected a JSON object"));
    };

    let mut violations = Vec::new();
    let text = required_string(&map, "text", &mut violations);
    let source_lang = required_string(&map, "sourceLang", &mut violations);
    let target_lang = required_string(&map, "targetLang", &mut violations);

    let request = TranslationRequest {
        text: text.unwrap_or_default(),
        source_lang: source_lang.unwrap_or_default(),
        target_lang: target_lang.unwrap_or_default(),
    };
    collect_bounds(&request, &map, &mut violations);

    finish(request, violations, TRANSLATION_FIELDS)
}

/// Validate an untyped vocabulary payload.
///
/// Every field is optional. A missing or `null` `count` becomes
/// [`DEFAULT_VOCABULARY_COUNT`]; a blank `query` or `level` becomes `None`.
/// A `null` payload is treated as an empty object.
///
/// # Errors
///
/// Returns a `ValidationError` if a field has the wrong JSON type, if `count`
/// is not a positive integer, or if `count` exceeds the configured ceiling.
pub fn validate_vocabulary(raw: Value, limits: &RequestLimits) -> Result<VocabularyRequest> {
    let map = match raw {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        _ => return Err(ValidationError::malformed_body("expected a JSON object")),
    };

    let mut violations = Vec::new();
    let query = optional_string(&map, "query", &mut violations);
    let level = optional_string(&map, "level", &mut violations);
    let count = optional_count(&map, &mut violations);

    let request = VocabularyRequest {
        query: query.filter(|q| !q.trim().is_empty()),
        level: level.filter(|l| !l.trim().is_empty()),
        count: count.unwrap_or(DEFAULT_VOCABULARY_COUNT),
    };
    collect_bounds(&request, &map, &mut violations);

    if let Some(max) = limits.max_vocabulary_count {
        if request.count > max && !has_field(&violations, "count") {
            violations.push(
                Violation::new("count", "range", format!("must be at most {max}"))
                    .with_actual(map.get("count").cloned().unwrap_or(Value::Null)),
            );
        }
    }

    finish(request, violations, VOCABULARY_FIELDS)
}

fn required_string(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match map.get(field) {
        None | Some(Value::Null) => {
            violations.push(Violation::new(field, "required", "is required"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(type_violation(field, "a string", other));
            None
        }
    }
}

fn optional_string(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match map.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(type_violation(field, "a string", other));
            None
        }
    }
}

/// Reads `count`. Non-positive values map to 0 so the bounds pass reports
/// them. Integers too large for `u32` are reported here with their real value.
fn optional_count(map: &Map<String, Value>, violations: &mut Vec<Violation>) -> Option<u32> {
    match map.get("count") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) if n.is_f64() => {
            violations.push(type_violation("count", "an integer", &Value::Number(n.clone())));
            None
        }
        Some(Value::Number(n)) => {
            if n.as_i64().is_some_and(|v| v < 1) {
                return Some(0);
            }
            match n.as_u64().and_then(|v| u32::try_from(v).ok()) {
                Some(count) => Some(count),
                None => {
                    violations.push(
                        Violation::new("count", "range", format!("must be at most {}", u32::MAX))
                            .with_actual(Value::Number(n.clone())),
                    );
                    None
                }
            }
        }
        Some(other) => {
            violations.push(type_violation("count", "an integer", other));
            None
        }
    }
}

fn type_violation(field: &str, expected: &str, actual: &Value) -> Violation {
    let violation = Violation::new(
        field,
        "type",
        format!("expected {expected}, received {}", json_type_name(actual)),
    );
    match actual {
        Value::Number(_) | Value::Bool(_) => violation.with_actual(actual.clone()),
        _ => violation,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Runs the `validator` rules and records violations for fields the shape
/// pass did not already reject.
fn collect_bounds<T: Validate>(
    request: &T,
    raw: &Map<String, Value>,
    violations: &mut Vec<Violation>,
) {
    let Err(errors) = request.validate() else {
        return;
    };

    for (field, field_errors) in errors.field_errors() {
        let wire = to_camel_case(&field);
        if has_field(violations, &wire) {
            continue;
        }

        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map_or_else(|| format!("failed {} check", error.code), ToString::to_string);
            let mut violation = Violation::new(wire.clone(), error.code.to_string(), message);
            if let Some(actual) = raw.get(&wire).and_then(safe_actual) {
                violation = violation.with_actual(actual);
            }
            violations.push(violation);
        }
    }
}

/// Strings are reported by length only so request text is never echoed.
fn safe_actual(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(json!({ "length": s.chars().count() })),
        Value::Number(_) => Some(value.clone()),
        _ => None,
    }
}

fn has_field(violations: &[Violation], field: &str) -> bool {
    violations.iter().any(|v| v.field == field)
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn finish<T>(request: T, mut violations: Vec<Violation>, order: &[&str]) -> Result<T> {
    if violations.is_empty() {
        return Ok(request);
    }

    violations.sort_by_key(|v| {
        order
            .iter()
            .position(|f| *f == v.field)
            .unwrap_or(order.len())
    });
    Err(ValidationError::new(violations))
}

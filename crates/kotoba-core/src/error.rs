//! Validation error types.
//!
//! A rejected payload is reported as a single [`ValidationError`] that lists
//! every constraint the payload broke, so a client can fix all of them at once.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A result type using `ValidationError`.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Wire name of the offending field (`body` for the payload itself).
    pub field: String,
    /// Machine-readable constraint code (`required`, `type`, `length`, `range`).
    pub constraint: String,
    /// Human-readable description of the expected shape.
    pub message: String,
    /// The offending value, when it is safe to echo back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<serde_json::Value>,
}

impl Violation {
    /// Create a violation without an echoed value.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
            message: message.into(),
            actual: None,
        }
    }

    /// Attach the offending value.
    #[must_use]
    pub fn with_actual(mut self, actual: serde_json::Value) -> Self {
        self.actual = Some(actual);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The payload did not match the expected request shape.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid request data: {}", summarize(.violations))]
pub struct ValidationError {
    /// Every violated constraint, in field order.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Create an error from a list of violations.
    #[must_use]
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Create an error describing a body that could not be read as JSON.
    #[must_use]
    pub fn malformed_body(reason: impl Into<String>) -> Self {
        Self::new(vec![Violation::new("body", "type", reason)])
    }

    /// Returns true if any violation concerns the given field.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

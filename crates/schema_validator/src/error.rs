//! Violation types reported by validation.
//!
//! Violations are data, not control flow: every one found in a candidate is
//! collected and returned together in [`Violations`].

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Path used when the candidate itself has the wrong shape.
pub const ROOT_PATH: &str = "$root";

/// A single failed presence, type, or constraint check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// Required field is absent and has no default
    #[error("{path}: field required")]
    MissingField { path: String },

    /// Raw value cannot be safely coerced to the declared type
    #[error("{path}: {reason} (got {value})")]
    TypeMismatch {
        path: String,
        expected: String,
        value: Value,
        reason: String,
    },

    /// Value has the right type but breaks a declared constraint
    #[error("{path}: {reason}")]
    ConstraintViolation {
        path: String,
        constraint: String,
        value: Value,
        reason: String,
    },

    /// Candidate key not declared by the schema (only under a forbidding policy)
    #[error("{path}: field not declared in schema (got {value})")]
    UnexpectedField { path: String, value: Value },
}

/// Discriminant of a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    MissingField,
    TypeMismatch,
    ConstraintViolation,
    UnexpectedField,
}

impl ViolationKind {
    /// Snake-case identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "missing_field",
            ViolationKind::TypeMismatch => "type_mismatch",
            ViolationKind::ConstraintViolation => "constraint_violation",
            ViolationKind::UnexpectedField => "unexpected_field",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Violation {
    /// Creates a new missing field violation.
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    /// Creates a new type mismatch violation.
    ///
    /// The reason is derived from the expected type and the raw value's JSON
    /// type.
    pub fn type_mismatch(path: impl Into<String>, expected: impl ToString, value: &Value) -> Self {
        let expected = expected.to_string();
        let reason = format!("expected {}, got {}", expected, json_type_name(value));
        Self::type_mismatch_with_reason(path, expected, value, reason)
    }

    /// Creates a new type mismatch violation with an explicit reason.
    pub fn type_mismatch_with_reason(
        path: impl Into<String>,
        expected: impl ToString,
        value: &Value,
        reason: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected: expected.to_string(),
            value: value.clone(),
            reason: reason.into(),
        }
    }

    /// Creates a new constraint violation.
    pub fn constraint(
        path: impl Into<String>,
        constraint: impl Into<String>,
        value: &Value,
        reason: impl Into<String>,
    ) -> Self {
        Self::ConstraintViolation {
            path: path.into(),
            constraint: constraint.into(),
            value: value.clone(),
            reason: reason.into(),
        }
    }

    /// Creates a new unexpected field violation.
    pub fn unexpected_field(path: impl Into<String>, value: &Value) -> Self {
        Self::UnexpectedField {
            path: path.into(),
            value: value.clone(),
        }
    }

    /// Returns the kind of this violation.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::MissingField { .. } => ViolationKind::MissingField,
            Self::TypeMismatch { .. } => ViolationKind::TypeMismatch,
            Self::ConstraintViolation { .. } => ViolationKind::ConstraintViolation,
            Self::UnexpectedField { .. } => ViolationKind::UnexpectedField,
        }
    }

    /// Dotted, index-qualified path of the offending field.
    pub fn path(&self) -> &str {
        match self {
            Self::MissingField { path }
            | Self::TypeMismatch { path, .. }
            | Self::ConstraintViolation { path, .. }
            | Self::UnexpectedField { path, .. } => path,
        }
    }

    /// Offending raw value; `None` for a missing field.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::MissingField { .. } => None,
            Self::TypeMismatch { value, .. }
            | Self::ConstraintViolation { value, .. }
            | Self::UnexpectedField { value, .. } => Some(value),
        }
    }

    /// The violated type or constraint.
    pub fn violated(&self) -> &str {
        match self {
            Self::MissingField { .. } => "required",
            Self::TypeMismatch { expected, .. } => expected,
            Self::ConstraintViolation { constraint, .. } => constraint,
            Self::UnexpectedField { .. } => "declared",
        }
    }

    /// Human-readable reason, without the path.
    pub fn reason(&self) -> String {
        match self {
            Self::MissingField { .. } => "field required".to_string(),
            Self::TypeMismatch { reason, .. } | Self::ConstraintViolation { reason, .. } => {
                reason.clone()
            }
            Self::UnexpectedField { .. } => "field not declared in schema".to_string(),
        }
    }
}

/// Every violation found in one candidate, in discovery order.
///
/// Never empty when returned from validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over violations in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Returns the violations as a slice.
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Returns the violations reported for a path.
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.0.iter().filter(move |v| v.path() == path)
    }

    /// Consumes the list into a vector.
    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl std::error::Error for Violations {}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Returns the JSON type name of a raw value.
pub fn json_type_name(value: &Value) -> &'static str {
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

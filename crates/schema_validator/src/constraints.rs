//! Constraint validation logic.
//!
//! This module evaluates field constraints on values that already passed
//! type checking:
//! - Range: Numeric value must be within min/max bounds
//! - NonEmpty: Text or list must not be empty
//! - Pattern: Text must match a regex pattern
//! - AllowedValues: Value must be one of a predefined set
//!
//! Every failed constraint yields its own violation.

use crate::{TypedValue, Violation};
use regex::Regex;
use schema_core::{FieldConstraint, FieldType, Schema, SchemaDefinitionError, join_path};
use serde_json::Value;
use std::collections::HashMap;

/// Evaluates field constraints.
///
/// Patterns are compiled once by [`ConstraintChecker::for_schema`]; checking
/// never mutates the checker, so it can be shared between threads.
#[derive(Debug, Clone)]
pub(crate) struct ConstraintChecker {
    /// Compiled regex patterns keyed by source
    patterns: HashMap<String, Regex>,
}

impl ConstraintChecker {
    /// Creates a checker with every pattern the schema uses precompiled.
    pub fn for_schema(schema: &Schema) -> Result<Self, SchemaDefinitionError> {
        let mut checker = Self {
            patterns: HashMap::new(),
        };
        checker.compile_record(schema, "")?;
        Ok(checker)
    }

    fn compile_record(
        &mut self,
        schema: &Schema,
        prefix: &str,
    ) -> Result<(), SchemaDefinitionError> {
        for field in &schema.fields {
            let path = join_path(prefix, &field.name);
            for constraint in &field.constraints {
                if let FieldConstraint::Pattern { regex } = constraint {
                    self.compile(regex, &path)?;
                }
            }
            self.compile_nested(&field.field_type, &path)?;
        }
        Ok(())
    }

    fn compile_nested(
        &mut self,
        field_type: &FieldType,
        path: &str,
    ) -> Result<(), SchemaDefinitionError> {
        match field_type {
            FieldType::Record(schema) => self.compile_record(schema, path),
            FieldType::List(inner) => self.compile_nested(inner, &format!("{}[]", path)),
            FieldType::Optional(inner) => self.compile_nested(inner, path),
            _ => Ok(()),
        }
    }

    fn compile(&mut self, pattern: &str, path: &str) -> Result<(), SchemaDefinitionError> {
        if !self.patterns.contains_key(pattern) {
            let regex = Regex::new(pattern).map_err(|e| SchemaDefinitionError::InvalidPattern {
                field: path.to_string(),
                error: e.to_string(),
            })?;
            self.patterns.insert(pattern.to_string(), regex);
        }
        Ok(())
    }

    /// Returns the number of distinct compiled patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Evaluates every constraint against a typed value.
    ///
    /// Null values are skipped (nullability is the type check's concern).
    /// Violations are appended to `out` in constraint declaration order.
    pub fn check(
        &self,
        constraints: &[FieldConstraint],
        value: &TypedValue,
        raw: &Value,
        path: &str,
        out: &mut Vec<Violation>,
    ) {
        if value.is_null() {
            return;
        }

        for constraint in constraints {
            match constraint {
                FieldConstraint::Range { min, max } => {
                    self.check_range(value, raw, *min, *max, path, out)
                }
                FieldConstraint::NonEmpty => self.check_non_empty(value, raw, path, out),
                FieldConstraint::Pattern { regex } => {
                    self.check_pattern(value, raw, regex, path, out)
                }
                FieldConstraint::AllowedValues { values } => {
                    self.check_allowed_values(value, raw, values, path, out)
                }
            }
        }
    }

    /// Validates that a numeric value is within a range.
    fn check_range(
        &self,
        value: &TypedValue,
        raw: &Value,
        min: Option<f64>,
        max: Option<f64>,
        path: &str,
        out: &mut Vec<Violation>,
    ) {
        let (below, above) = match value {
            TypedValue::Integer(i) => (
                min.is_some_and(|min| integer_below(*i, min)),
                max.is_some_and(|max| integer_above(*i, max)),
            ),
            TypedValue::Float(f) => (
                min.is_some_and(|min| *f < min),
                max.is_some_and(|max| *f > max),
            ),
            _ => return,
        };

        if let Some(min) = min.filter(|_| below) {
            out.push(Violation::constraint(
                path,
                "minimum",
                raw,
                format!("value {} is below minimum {:?}", raw, min),
            ));
        }
        if let Some(max) = max.filter(|_| above) {
            out.push(Violation::constraint(
                path,
                "maximum",
                raw,
                format!("value {} exceeds maximum {:?}", raw, max),
            ));
        }
    }

    /// Validates that text or a list is not empty.
    fn check_non_empty(
        &self,
        value: &TypedValue,
        raw: &Value,
        path: &str,
        out: &mut Vec<Violation>,
    ) {
        let empty = match value {
            TypedValue::Text(s) => s.is_empty(),
            TypedValue::List(items) => items.is_empty(),
            _ => false,
        };
        if empty {
            out.push(Violation::constraint(
                path,
                "non_empty",
                raw,
                "value must not be empty",
            ));
        }
    }

    /// Validates that a text value matches a regex pattern.
    fn check_pattern(
        &self,
        value: &TypedValue,
        raw: &Value,
        pattern: &str,
        path: &str,
        out: &mut Vec<Violation>,
    ) {
        let (Some(text), Some(regex)) = (value.as_text(), self.patterns.get(pattern)) else {
            return;
        };
        if !regex.is_match(text) {
            out.push(Violation::constraint(
                path,
                "pattern",
                raw,
                format!("value {} does not match pattern '{}'", raw, pattern),
            ));
        }
    }

    /// Validates that a value is in the allowed set.
    fn check_allowed_values(
        &self,
        value: &TypedValue,
        raw: &Value,
        allowed: &[Value],
        path: &str,
        out: &mut Vec<Violation>,
    ) {
        let found = match value {
            TypedValue::Text(s) => allowed.iter().any(|a| a.as_str() == Some(s.as_str())),
            TypedValue::Integer(i) => allowed.iter().any(|a| a.as_i64() == Some(*i)),
            _ => true,
        };
        if !found {
            let listed: Vec<String> = allowed.iter().map(|a| a.to_string()).collect();
            out.push(Violation::constraint(
                path,
                "allowed_values",
                raw,
                format!("value {} is not one of [{}]", raw, listed.join(", ")),
            ));
        }
    }
}

/// `i < bound`, compared without rounding `i` through `f64`.
fn integer_below(i: i64, bound: f64) -> bool {
    i128::from(i) < bound.ceil() as i128
}

/// `i > bound`, compared without rounding `i` through `f64`.
fn integer_above(i: i64, bound: f64) -> bool {
    i128::from(i) > bound.floor() as i128
}

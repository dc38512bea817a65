//! Error types for schema definitions.
//!
//! A malformed schema is a configuration error: it is reported once, when the
//! schema is built or loaded, and never while validating a candidate.

use thiserror::Error;

/// Result type for schema definition operations.
pub type Result<T> = std::result::Result<T, SchemaDefinitionError>;

/// A schema violates one of its structural invariants.
///
/// Field names are reported as dotted paths for fields of nested records
/// (e.g., `address.city`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaDefinitionError {
    /// Schema declares no fields
    #[error("Schema '{0}' has no fields defined")]
    EmptySchema(String),

    /// Two fields share a name
    #[error("Duplicate field name '{field}' in schema '{schema}'")]
    DuplicateField {
        /// Schema name
        schema: String,
        /// Duplicated field path
        field: String,
    },

    /// Range bound is NaN or infinite
    #[error("Range bound for field '{field}' must be finite, got {bound}")]
    NonFiniteBound {
        /// Field path
        field: String,
        /// Offending bound
        bound: f64,
    },

    /// Range minimum exceeds maximum
    #[error("Invalid range for field '{field}': minimum {min} exceeds maximum {max}")]
    InvertedRange {
        /// Field path
        field: String,
        /// Declared minimum
        min: f64,
        /// Declared maximum
        max: f64,
    },

    /// Optional field has neither a default nor an optional type
    #[error("Optional field '{field}' must declare a default or have an optional type")]
    OptionalWithoutDefault {
        /// Field path
        field: String,
    },

    /// Constraint does not apply to the field's type
    #[error("Constraint '{constraint}' is not applicable to field '{field}' of type {field_type}")]
    InapplicableConstraint {
        /// Field path
        field: String,
        /// Constraint name
        constraint: String,
        /// Declared type
        field_type: String,
    },

    /// Pattern does not compile
    #[error("Invalid regex pattern for field '{field}': {error}")]
    InvalidPattern {
        /// Field path
        field: String,
        /// Compiler message
        error: String,
    },

    /// Allowed value has the wrong type, or the list is empty
    #[error("Invalid allowed values for field '{field}': {reason}")]
    InvalidAllowedValues {
        /// Field path
        field: String,
        /// What is wrong
        reason: String,
    },

    /// Default value does not satisfy the field declaration
    #[error("Default for field '{field}' does not satisfy its declaration: {reason}")]
    InvalidDefault {
        /// Field path
        field: String,
        /// Why the default was rejected
        reason: String,
    },
}

impl SchemaDefinitionError {
    /// Creates a new inapplicable constraint error.
    pub fn inapplicable(
        field: impl Into<String>,
        constraint: impl Into<String>,
        field_type: impl ToString,
    ) -> Self {
        Self::InapplicableConstraint {
            field: field.into(),
            constraint: constraint.into(),
            field_type: field_type.to_string(),
        }
    }

    /// Creates a new invalid default error.
    pub fn invalid_default(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefault {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

//! Structural checks for schema definitions.
//!
//! These run once, when a schema is built or loaded, so that a malformed
//! schema never reaches candidate validation.

use crate::{FieldConstraint, FieldDef, FieldType, Schema, SchemaDefinitionError};
use regex::Regex;
use std::collections::HashSet;

/// Joins a parent path and a field name with a dot.
///
/// An empty prefix yields the bare field name.
pub fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Checks every invariant of a schema, recursing into nested records.
///
/// Default values are not checked here since that requires the validation
/// engine; `schema_validator::Validator::new` completes the check.
pub fn check_definition(schema: &Schema) -> Result<(), SchemaDefinitionError> {
    check_record(schema, "")
}

fn check_record(schema: &Schema, prefix: &str) -> Result<(), SchemaDefinitionError> {
    if schema.fields.is_empty() {
        return Err(SchemaDefinitionError::EmptySchema(schema.name.clone()));
    }

    let mut seen = HashSet::new();
    for field in &schema.fields {
        let path = join_path(prefix, &field.name);
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaDefinitionError::DuplicateField {
                schema: schema.name.clone(),
                field: path,
            });
        }
        check_field(field, &path)?;
    }

    Ok(())
}

fn check_field(field: &FieldDef, path: &str) -> Result<(), SchemaDefinitionError> {
    if field.is_optional() && field.default.is_none() && !field.field_type.is_nullable() {
        return Err(SchemaDefinitionError::OptionalWithoutDefault {
            field: path.to_string(),
        });
    }

    for constraint in &field.constraints {
        check_constraint(constraint, &field.field_type, path)?;
    }

    check_nested(&field.field_type, path)
}

fn check_nested(field_type: &FieldType, path: &str) -> Result<(), SchemaDefinitionError> {
    match field_type {
        FieldType::Record(schema) => check_record(schema, path),
        FieldType::List(inner) => check_nested(inner, &format!("{}[]", path)),
        FieldType::Optional(inner) => check_nested(inner, path),
        _ => Ok(()),
    }
}

fn check_constraint(
    constraint: &FieldConstraint,
    field_type: &FieldType,
    path: &str,
) -> Result<(), SchemaDefinitionError> {
    let base = field_type.base();

    match constraint {
        FieldConstraint::Range { min, max } => {
            if !field_type.is_numeric() {
                return Err(SchemaDefinitionError::inapplicable(
                    path,
                    constraint.name(),
                    field_type,
                ));
            }
            for bound in [min, max].into_iter().flatten() {
                if !bound.is_finite() {
                    return Err(SchemaDefinitionError::NonFiniteBound {
                        field: path.to_string(),
                        bound: *bound,
                    });
                }
            }
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(SchemaDefinitionError::InvertedRange {
                        field: path.to_string(),
                        min: *min,
                        max: *max,
                    });
                }
            }
        }
        FieldConstraint::NonEmpty => {
            if !matches!(base, FieldType::Text | FieldType::List(_)) {
                return Err(SchemaDefinitionError::inapplicable(
                    path,
                    constraint.name(),
                    field_type,
                ));
            }
        }
        FieldConstraint::Pattern { regex } => {
            if !matches!(base, FieldType::Text) {
                return Err(SchemaDefinitionError::inapplicable(
                    path,
                    constraint.name(),
                    field_type,
                ));
            }
            Regex::new(regex).map_err(|e| SchemaDefinitionError::InvalidPattern {
                field: path.to_string(),
                error: e.to_string(),
            })?;
        }
        FieldConstraint::AllowedValues { values } => {
            let value_ok: fn(&serde_json::Value) -> bool = match base {
                FieldType::Text => |v: &serde_json::Value| v.is_string(),
                FieldType::Integer => |v: &serde_json::Value| v.as_i64().is_some(),
                _ => {
                    return Err(SchemaDefinitionError::inapplicable(
                        path,
                        constraint.name(),
                        field_type,
                    ));
                }
            };
            if values.is_empty() {
                return Err(SchemaDefinitionError::InvalidAllowedValues {
                    field: path.to_string(),
                    reason: "no values listed".to_string(),
                });
            }
            if let Some(bad) = values.iter().find(|v| !value_ok(v)) {
                return Err(SchemaDefinitionError::InvalidAllowedValues {
                    field: path.to_string(),
                    reason: format!("{} is not a valid {}", bad, base),
                });
            }
        }
    }

    Ok(())
}

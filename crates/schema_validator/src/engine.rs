//! Main validation engine.
//!
//! This module provides the [`Validator`] that checks candidate values
//! against a schema: presence, safe type coercion, constraints, and recursion
//! into nested records and sequences. Every violation is collected; a record
//! is returned only when there are none.

use crate::{
    ConstraintChecker, ROOT_PATH, TypedValue, ValidatedRecord, Violation, Violations, coerce,
};
use schema_core::{FieldDef, FieldType, Schema, SchemaDefinitionError, ValidationPolicy, join_path};
use serde_json::{Map, Value};
use tracing::debug;

/// Validates candidate values against one schema.
///
/// Construction checks the schema definition (including defaults) and
/// precompiles its patterns, so a malformed schema is rejected before any
/// candidate is processed. After that the validator is immutable and can be
/// shared freely between threads.
///
/// # Example
///
/// ```rust
/// use schema_core::{FieldBuilder, FieldConstraint, FieldType, SchemaBuilder};
/// use schema_validator::Validator;
/// use serde_json::json;
///
/// let schema = SchemaBuilder::new("Place")
///     .field(FieldBuilder::new("name", FieldType::Text).build())
///     .field(
///         FieldBuilder::new("rating", FieldType::Float)
///             .constraint(FieldConstraint::range(0.0, 5.0))
///             .build(),
///     )
///     .build()
///     .unwrap();
///
/// let validator = Validator::new(schema).unwrap();
///
/// match validator.validate(&json!({ "name": "Central Park", "rating": 6.2 })) {
///     Ok(record) => println!("Accepted: {:?}", record),
///     Err(violations) => {
///         for violation in &violations {
///             println!("Violation: {}", violation);
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    policy: ValidationPolicy,
    constraints: ConstraintChecker,
}

impl Validator {
    /// Creates a validator with the default (permissive) policy.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaDefinitionError` if the schema is malformed or a
    /// declared default does not satisfy its own field. Record defaults may
    /// not carry undeclared keys, whatever policy is set later.
    pub fn new(schema: Schema) -> Result<Self, SchemaDefinitionError> {
        schema.check()?;
        let constraints = ConstraintChecker::for_schema(&schema)?;

        // Defaults must hold under every policy, so check them strictly.
        let strict = Self {
            schema,
            policy: ValidationPolicy::strict(),
            constraints,
        };
        strict.check_defaults(&strict.schema, "")?;

        let validator = Self {
            policy: ValidationPolicy::default(),
            ..strict
        };

        debug!(
            "Validator ready for schema '{}' ({} fields, {} patterns)",
            validator.schema.name,
            validator.schema.fields.len(),
            validator.constraints.pattern_count()
        );
        Ok(validator)
    }

    /// Sets the validation policy.
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the schema this validator enforces.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the active policy.
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validates a single candidate record.
    ///
    /// Returns the validated record if no violation was found, otherwise
    /// every violation in schema order. Never returns a partial record.
    pub fn validate(&self, candidate: &Value) -> Result<ValidatedRecord, Violations> {
        let mut violations = Vec::new();

        let record = match candidate.as_object() {
            Some(object) => self.check_record(&self.schema, object, "", &mut violations),
            None => {
                violations.push(Violation::type_mismatch(
                    ROOT_PATH,
                    format!("record {}", self.schema.name),
                    candidate,
                ));
                None
            }
        };

        self.finish(record, violations)
    }

    /// Validates a candidate sequence of records.
    ///
    /// Each element is validated against the schema with an index-qualified
    /// path (`[2].rating`). All violations across all elements are reported.
    pub fn validate_many(&self, candidate: &Value) -> Result<Vec<ValidatedRecord>, Violations> {
        let mut violations = Vec::new();

        let Some(items) = candidate.as_array() else {
            violations.push(Violation::type_mismatch(
                ROOT_PATH,
                format!("list<record {}>", self.schema.name),
                candidate,
            ));
            return self.finish(None, violations);
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let path = format!("[{}]", index);
            let record = match item.as_object() {
                Some(object) => self.check_record(&self.schema, object, &path, &mut violations),
                None => {
                    violations.push(Violation::type_mismatch(
                        path,
                        format!("record {}", self.schema.name),
                        item,
                    ));
                    None
                }
            };
            records.extend(record);
        }

        self.finish(Some(records), violations)
    }

    fn finish<T>(&self, result: Option<T>, violations: Vec<Violation>) -> Result<T, Violations> {
        match result {
            Some(value) if violations.is_empty() => {
                debug!("Candidate accepted by schema '{}'", self.schema.name);
                Ok(value)
            }
            _ => {
                debug!(
                    "Candidate rejected by schema '{}': {} violation(s)",
                    self.schema.name,
                    violations.len()
                );
                Err(Violations::new(violations))
            }
        }
    }

    /// Validates an object against a record schema.
    fn check_record(
        &self,
        schema: &Schema,
        object: &Map<String, Value>,
        prefix: &str,
        out: &mut Vec<Violation>,
    ) -> Option<ValidatedRecord> {
        let mut fields = Vec::with_capacity(schema.fields.len());
        let mut complete = true;

        for field in &schema.fields {
            let path = join_path(prefix, &field.name);
            match self.check_field(field, object.get(&field.name), &path, out) {
                Some(value) => fields.push((field.name.clone(), value)),
                None => complete = false,
            }
        }

        if self.policy.forbids_extra_fields() {
            for (key, value) in object {
                if !schema.has_field(key) {
                    out.push(Violation::unexpected_field(join_path(prefix, key), value));
                    complete = false;
                }
            }
        }

        complete.then(|| ValidatedRecord::new(schema.name.clone(), fields))
    }

    /// Validates one declared field: presence, type, then constraints.
    fn check_field(
        &self,
        field: &FieldDef,
        raw: Option<&Value>,
        path: &str,
        out: &mut Vec<Violation>,
    ) -> Option<TypedValue> {
        let raw = match (raw, &field.default) {
            (Some(raw), _) => raw,
            (None, Some(default)) => default,
            (None, None) if field.is_optional() => return Some(TypedValue::Null),
            (None, None) => {
                out.push(Violation::missing_field(path));
                return None;
            }
        };

        let expected = field.field_type.to_string();
        let value = self.check_value(&field.field_type, raw, path, &expected, out)?;

        let before = out.len();
        self.constraints.check(&field.constraints, &value, raw, path, out);
        (out.len() == before).then_some(value)
    }

    /// Type-checks a raw value, recursing into records and lists.
    fn check_value(
        &self,
        field_type: &FieldType,
        raw: &Value,
        path: &str,
        expected: &str,
        out: &mut Vec<Violation>,
    ) -> Option<TypedValue> {
        let result = match field_type {
            FieldType::Optional(_) if raw.is_null() => Ok(TypedValue::Null),
            FieldType::Optional(inner) => return self.check_value(inner, raw, path, expected, out),
            FieldType::Text => coerce::coerce_text(raw, path, expected).map(TypedValue::Text),
            FieldType::Integer => {
                coerce::coerce_integer(raw, path, expected).map(TypedValue::Integer)
            }
            FieldType::Float => coerce::coerce_float(raw, path, expected).map(TypedValue::Float),
            FieldType::Boolean => coerce::coerce_bool(raw, path, expected).map(TypedValue::Boolean),
            FieldType::Record(schema) => match raw.as_object() {
                Some(object) => {
                    return self
                        .check_record(schema, object, path, out)
                        .map(TypedValue::Record);
                }
                None => Err(Violation::type_mismatch(path, expected, raw)),
            },
            FieldType::List(inner) => match raw.as_array() {
                Some(items) => return self.check_list(inner, items, path, out),
                None => Err(Violation::type_mismatch(path, expected, raw)),
            },
        };

        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                out.push(violation);
                None
            }
        }
    }

    /// Type-checks every element of a list.
    fn check_list(
        &self,
        element_type: &FieldType,
        items: &[Value],
        path: &str,
        out: &mut Vec<Violation>,
    ) -> Option<TypedValue> {
        let expected = element_type.to_string();
        let mut values = Vec::with_capacity(items.len());
        let mut complete = true;

        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", path, index);
            match self.check_value(element_type, item, &item_path, &expected, out) {
                Some(value) => values.push(value),
                None => complete = false,
            }
        }

        complete.then_some(TypedValue::List(values))
    }

    /// Ensures every declared default satisfies its own field.
    fn check_defaults(&self, schema: &Schema, prefix: &str) -> Result<(), SchemaDefinitionError> {
        for field in &schema.fields {
            let path = join_path(prefix, &field.name);
            if let Some(default) = &field.default {
                let mut out = Vec::new();
                self.check_field(field, Some(default), &path, &mut out);
                if let Some(violation) = out.first() {
                    return Err(SchemaDefinitionError::invalid_default(
                        path,
                        violation.reason(),
                    ));
                }
            }
            self.check_nested_defaults(&field.field_type, &path)?;
        }
        Ok(())
    }

    fn check_nested_defaults(
        &self,
        field_type: &FieldType,
        path: &str,
    ) -> Result<(), SchemaDefinitionError> {
        match field_type {
            FieldType::Record(schema) => self.check_defaults(schema, path),
            FieldType::List(inner) => self.check_nested_defaults(inner, &format!("{}[]", path)),
            FieldType::Optional(inner) => self.check_nested_defaults(inner, path),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViolationKind;
    use pretty_assertions::assert_eq;
    use schema_core::{ExtraFieldPolicy, FieldBuilder, FieldConstraint, SchemaBuilder};
    use serde_json::json;

    fn tourist_place() -> Schema {
        SchemaBuilder::new("TouristPlace")
            .field(FieldBuilder::new("name", FieldType::Text).build())
            .field(FieldBuilder::new("description", FieldType::Text).build())
            .field(FieldBuilder::new("zip_code", FieldType::Integer).build())
            .field(FieldBuilder::new("best_time_to_visit", FieldType::Text).build())
            .field(FieldBuilder::new("entry_fee", FieldType::optional(FieldType::Float)).build())
            .field(
                FieldBuilder::new("rating", FieldType::Float)
                    .constraint(FieldConstraint::range(0.0, 5.0))
                    .build(),
            )
            .build()
            .unwrap()
    }

    fn validator() -> Validator {
        Validator::new(tourist_place()).unwrap()
    }

    #[test]
    fn test_valid_candidate() {
        let record = validator()
            .validate(&json!({
                "name": "Central Park",
                "description": "A large public park",
                "zip_code": 10021,
                "best_time_to_visit": "Autumn",
                "entry_fee": null,
                "rating": 4.7
            }))
            .unwrap();

        assert_eq!(record.schema_name(), "TouristPlace");
        assert_eq!(record.len(), 6);
        assert_eq!(record.get("entry_fee"), Some(&TypedValue::Null));
        assert_eq!(record.get_float("rating"), Some(4.7));
    }

    #[test]
    fn test_invalid_candidate_reports_all() {
        let violations = validator()
            .validate(&json!({
                "name": "Statue of Liberty",
                "description": null,
                "best_time_to_visit": "Spring and Fall",
                "entry_fee": "Free",
                "rating": 6.2,
                "zip_code": 10028.90
            }))
            .unwrap_err();

        let summary: Vec<(&str, ViolationKind)> =
            violations.iter().map(|v| (v.path(), v.kind())).collect();
        assert_eq!(
            summary,
            vec![
                ("description", ViolationKind::TypeMismatch),
                ("zip_code", ViolationKind::TypeMismatch),
                ("entry_fee", ViolationKind::TypeMismatch),
                ("rating", ViolationKind::ConstraintViolation),
            ]
        );
    }

    #[test]
    fn test_missing_required_field() {
        let violations = validator()
            .validate(&json!({
                "name": "Met",
                "description": "Museum",
                "best_time_to_visit": "Winter",
                "rating": 4.8
            }))
            .unwrap_err();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations.as_slice()[0], Violation::missing_field("zip_code"));
    }

    #[test]
    fn test_root_must_be_object() {
        let violations = validator().validate(&json!("not a record")).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.as_slice()[0].path(), ROOT_PATH);
    }

    #[test]
    fn test_default_substituted() {
        let schema = SchemaBuilder::new("Preferences")
            .field(FieldBuilder::new("num_places", FieldType::Integer).default(json!(5)).build())
            .field(FieldBuilder::new("location_type", FieldType::optional(FieldType::Text)).build())
            .build()
            .unwrap();

        let record = Validator::new(schema).unwrap().validate(&json!({})).unwrap();
        assert_eq!(record.get_integer("num_places"), Some(5));
        assert_eq!(record.get("location_type"), Some(&TypedValue::Null));
    }

    #[test]
    fn test_invalid_default_rejected() {
        let schema = SchemaBuilder::new("Preferences")
            .field(
                FieldBuilder::new("num_places", FieldType::Integer)
                    .default(json!(2.5))
                    .build(),
            )
            .build()
            .unwrap();

        assert!(matches!(
            Validator::new(schema),
            Err(SchemaDefinitionError::InvalidDefault { .. })
        ));
    }

    #[test]
    fn test_default_breaking_constraint_rejected() {
        let schema = SchemaBuilder::new("Preferences")
            .field(
                FieldBuilder::new("num_places", FieldType::Integer)
                    .default(json!(0))
                    .constraint(FieldConstraint::Range {
                        min: Some(1.0),
                        max: None,
                    })
                    .build(),
            )
            .build()
            .unwrap();

        match Validator::new(schema) {
            Err(SchemaDefinitionError::InvalidDefault { field, reason }) => {
                assert_eq!(field, "num_places");
                assert_eq!(reason, "value 0 is below minimum 1.0");
            }
            other => panic!("Expected InvalidDefault, got {:?}", other),
        }
    }

    #[test]
    fn test_default_with_undeclared_key_rejected() {
        let address = SchemaBuilder::new("Address")
            .field(FieldBuilder::new("city", FieldType::Text).build())
            .build()
            .unwrap();
        let schema = SchemaBuilder::new("Place")
            .field(FieldBuilder::new("name", FieldType::Text).build())
            .field(
                FieldBuilder::new("addr", FieldType::record(address))
                    .default(json!({ "city": "Rome", "zip": "00100" }))
                    .build(),
            )
            .build()
            .unwrap();

        match Validator::new(schema) {
            Err(SchemaDefinitionError::InvalidDefault { field, reason }) => {
                assert_eq!(field, "addr");
                assert_eq!(reason, "field not declared in schema");
            }
            other => panic!("Expected InvalidDefault, got {:?}", other),
        }
    }

    #[test]
    fn test_range_on_large_integer() {
        let schema = SchemaBuilder::new("Counter")
            .field(
                FieldBuilder::new("n", FieldType::Integer)
                    .constraint(FieldConstraint::Range {
                        min: None,
                        max: Some(9007199254740992.0),
                    })
                    .build(),
            )
            .build()
            .unwrap();
        let validator = Validator::new(schema).unwrap();

        assert!(validator.validate(&json!({ "n": 9007199254740992i64 })).is_ok());

        let violations = validator
            .validate(&json!({ "n": 9007199254740993i64 }))
            .unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.as_slice()[0].violated(), "maximum");
    }

    #[test]
    fn test_required_nullable_field() {
        let schema = SchemaBuilder::new("Quote")
            .field(
                FieldBuilder::new("price", FieldType::optional(FieldType::Float))
                    .required()
                    .build(),
            )
            .build()
            .unwrap();
        let validator = Validator::new(schema).unwrap();

        assert!(validator.validate(&json!({ "price": null })).is_ok());
        let violations = validator.validate(&json!({})).unwrap_err();
        assert_eq!(violations.as_slice()[0].kind(), ViolationKind::MissingField);
    }

    #[test]
    fn test_extra_fields_policy() {
        let candidate = json!({
            "name": "Central Park",
            "description": "A large public park",
            "zip_code": 10021,
            "best_time_to_visit": "Autumn",
            "rating": 4.7,
            "city": "New York"
        });

        let record = validator().validate(&candidate).unwrap();
        assert!(record.get("city").is_none());

        let strict = validator().with_policy(
            ValidationPolicy::new().with_extra_fields(ExtraFieldPolicy::Forbid),
        );
        let violations = strict.validate(&candidate).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations.as_slice()[0],
            Violation::unexpected_field("city", &json!("New York"))
        );
    }

    #[test]
    fn test_validate_many() {
        let candidate = json!([
            {
                "name": "Central Park",
                "description": "Park",
                "zip_code": 10021,
                "best_time_to_visit": "Autumn",
                "rating": 4.7
            },
            {
                "name": "Empire State Building",
                "description": "Skyscraper",
                "zip_code": 10001,
                "best_time_to_visit": "Evening",
                "rating": 5.5
            },
            "garbage"
        ]);

        let violations = validator().validate_many(&candidate).unwrap_err();
        let paths: Vec<&str> = violations.iter().map(|v| v.path()).collect();
        assert_eq!(paths, vec!["[1].rating", "[2]"]);

        let records = validator()
            .validate_many(&json!([candidate[0].clone()]))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get_text("name"), Some("Central Park"));
    }

    #[test]
    fn test_validate_many_requires_array() {
        let violations = validator().validate_many(&json!({})).unwrap_err();
        assert_eq!(violations.as_slice()[0].path(), ROOT_PATH);
    }
}

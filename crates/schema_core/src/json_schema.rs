//! JSON Schema export.
//!
//! Renders a [`Schema`] as the JSON Schema document handed to a model
//! provider as the structured-output contract. Field descriptions travel with
//! it, so the model sees the same guidance the schema author wrote.

use crate::{FieldConstraint, FieldDef, FieldType, Schema};
use serde_json::{Map, Value, json};

impl Schema {
    /// Renders the schema as a JSON Schema object.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schema_core::{FieldBuilder, FieldType, SchemaBuilder};
    ///
    /// let schema = SchemaBuilder::new("City")
    ///     .field(FieldBuilder::new("name", FieldType::Text).build())
    ///     .build()
    ///     .unwrap();
    ///
    /// let doc = schema.to_json_schema();
    /// assert_eq!(doc["title"], "City");
    /// assert_eq!(doc["required"][0], "name");
    /// ```
    pub fn to_json_schema(&self) -> Value {
        record_schema(self)
    }
}

fn record_schema(schema: &Schema) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in &schema.fields {
        properties.insert(field.name.clone(), field_schema(field));
        if !field.is_optional() {
            required.push(Value::String(field.name.clone()));
        }
    }

    let mut doc = Map::new();
    doc.insert("title".into(), json!(schema.name));
    if let Some(description) = &schema.description {
        doc.insert("description".into(), json!(description));
    }
    doc.insert("type".into(), json!("object"));
    doc.insert("properties".into(), Value::Object(properties));
    doc.insert("required".into(), Value::Array(required));
    Value::Object(doc)
}

fn field_schema(field: &FieldDef) -> Value {
    let mut doc = match type_schema(&field.field_type) {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut constraints = Map::new();
    for constraint in &field.constraints {
        apply_constraint(&mut constraints, constraint, field.field_type.base());
    }

    // Constraints describe the non-null branch of an optional type.
    let value_branch = doc
        .get_mut("anyOf")
        .and_then(Value::as_array_mut)
        .and_then(|branches| branches.first_mut())
        .and_then(Value::as_object_mut);
    match value_branch {
        Some(inner) => inner.extend(constraints),
        None => doc.extend(constraints),
    }

    if let Some(description) = &field.description {
        doc.insert("description".into(), json!(description));
    }
    if let Some(default) = &field.default {
        doc.insert("default".into(), default.clone());
    } else if field.is_optional() && field.field_type.is_nullable() {
        doc.insert("default".into(), Value::Null);
    }

    Value::Object(doc)
}

fn type_schema(field_type: &FieldType) -> Value {
    match field_type {
        FieldType::Text => json!({ "type": "string" }),
        FieldType::Integer => json!({ "type": "integer" }),
        FieldType::Float => json!({ "type": "number" }),
        FieldType::Boolean => json!({ "type": "boolean" }),
        FieldType::Record(schema) => record_schema(schema),
        FieldType::List(inner) => json!({ "type": "array", "items": type_schema(inner) }),
        FieldType::Optional(inner) => json!({
            "anyOf": [type_schema(inner.base()), { "type": "null" }]
        }),
    }
}

fn apply_constraint(doc: &mut Map<String, Value>, constraint: &FieldConstraint, base: &FieldType) {
    match constraint {
        FieldConstraint::Range { min, max } => {
            if let Some(min) = min {
                doc.insert("minimum".into(), json!(min));
            }
            if let Some(max) = max {
                doc.insert("maximum".into(), json!(max));
            }
        }
        FieldConstraint::NonEmpty => {
            let key = if matches!(base, FieldType::List(_)) {
                "minItems"
            } else {
                "minLength"
            };
            doc.insert(key.into(), json!(1));
        }
        FieldConstraint::Pattern { regex } => {
            doc.insert("pattern".into(), json!(regex));
        }
        FieldConstraint::AllowedValues { values } => {
            doc.insert("enum".into(), Value::Array(values.clone()));
        }
    }
}

//! Validated record representation.
//!
//! A [`ValidatedRecord`] only comes out of a successful validation: every
//! declared field is present, in schema order, holding a value of its
//! declared type that satisfies its constraints.

use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A value that passed type checking.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Absent optional value
    Null,
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Nested record
    Record(ValidatedRecord),
    /// Sequence of values
    List(Vec<TypedValue>),
}

impl TypedValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::Null => "null",
            TypedValue::Text(_) => "text",
            TypedValue::Integer(_) => "integer",
            TypedValue::Float(_) => "float",
            TypedValue::Boolean(_) => "boolean",
            TypedValue::Record(_) => "record",
            TypedValue::List(_) => "list",
        }
    }

    /// Attempts to get this value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            TypedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this value as a nested record.
    pub fn as_record(&self) -> Option<&ValidatedRecord> {
        match self {
            TypedValue::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Attempts to get this value as a list.
    pub fn as_list(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts back into an untyped JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            TypedValue::Null => Value::Null,
            TypedValue::Text(s) => Value::String(s.clone()),
            TypedValue::Integer(i) => Value::from(*i),
            TypedValue::Float(f) => Value::from(*f),
            TypedValue::Boolean(b) => Value::Bool(*b),
            TypedValue::Record(r) => r.to_json(),
            TypedValue::List(items) => {
                Value::Array(items.iter().map(TypedValue::to_json).collect())
            }
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedValue::Null => serializer.serialize_none(),
            TypedValue::Text(s) => serializer.serialize_str(s),
            TypedValue::Integer(i) => serializer.serialize_i64(*i),
            TypedValue::Float(f) => serializer.serialize_f64(*f),
            TypedValue::Boolean(b) => serializer.serialize_bool(*b),
            TypedValue::Record(r) => r.serialize(serializer),
            TypedValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// An immutable record that satisfied its schema.
///
/// Fields keep the schema's declaration order. Candidate keys the schema does
/// not declare never appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    schema: String,
    fields: Vec<(String, TypedValue)>,
}

impl ValidatedRecord {
    pub(crate) fn new(schema: impl Into<String>, fields: Vec<(String, TypedValue)>) -> Self {
        Self {
            schema: schema.into(),
            fields,
        }
    }

    /// Name of the schema this record satisfied.
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    /// Gets a field value by name.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Gets a text field.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(TypedValue::as_text)
    }

    /// Gets an integer field.
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(TypedValue::as_integer)
    }

    /// Gets a float field.
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(TypedValue::as_float)
    }

    /// Gets a boolean field.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(TypedValue::as_bool)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Converts back into an untyped JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Deserializes the record into a caller-defined type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schema_core::{FieldBuilder, FieldType, SchemaBuilder};
    /// use schema_validator::Validator;
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct City {
    ///     name: String,
    /// }
    ///
    /// let schema = SchemaBuilder::new("City")
    ///     .field(FieldBuilder::new("name", FieldType::Text).build())
    ///     .build()
    ///     .unwrap();
    /// let validator = Validator::new(schema).unwrap();
    ///
    /// let record = validator.validate(&json!({ "name": "Rome" })).unwrap();
    /// let city: City = record.deserialize().unwrap();
    /// assert_eq!(city.name, "Rome");
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }
}

impl Serialize for ValidatedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> ValidatedRecord {
        ValidatedRecord::new(
            "Place",
            vec![
                ("name".to_string(), TypedValue::Text("Central Park".into())),
                ("zip_code".to_string(), TypedValue::Integer(10021)),
                ("entry_fee".to_string(), TypedValue::Null),
                ("rating".to_string(), TypedValue::Float(4.7)),
                (
                    "tags".to_string(),
                    TypedValue::List(vec![TypedValue::Text("park".into())]),
                ),
            ],
        )
    }

    #[test]
    fn test_typed_value_types() {
        assert_eq!(TypedValue::Null.type_name(), "null");
        assert_eq!(TypedValue::Text("x".into()).type_name(), "text");
        assert_eq!(TypedValue::Integer(1).type_name(), "integer");
        assert_eq!(TypedValue::Float(1.5).type_name(), "float");
        assert_eq!(TypedValue::Boolean(true).type_name(), "boolean");
    }

    #[test]
    fn test_typed_accessors() {
        let record = sample();
        assert_eq!(record.get_text("name"), Some("Central Park"));
        assert_eq!(record.get_integer("zip_code"), Some(10021));
        assert_eq!(record.get_float("rating"), Some(4.7));
        assert!(record.get("entry_fee").unwrap().is_null());
        assert_eq!(record.get_float("zip_code"), None);
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_iteration_keeps_order() {
        let record = sample();
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["name", "zip_code", "entry_fee", "rating", "tags"]);
    }

    #[test]
    fn test_to_json() {
        assert_eq!(
            sample().to_json(),
            json!({
                "name": "Central Park",
                "zip_code": 10021,
                "entry_fee": null,
                "rating": 4.7,
                "tags": ["park"]
            })
        );
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let record = sample();
        assert_eq!(serde_json::to_value(&record).unwrap(), record.to_json());
    }
}

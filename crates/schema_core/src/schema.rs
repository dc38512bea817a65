//! Schema types describing the shape of a structured output.
//!
//! A [`Schema`] is the contract a generative model's output must satisfy: an
//! ordered list of named fields, each with a semantic type, an optionality
//! flag, and zero or more constraints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::SchemaDefinitionError;

/// A named record schema.
///
/// Field order is significant: validation walks fields in declaration order,
/// and validated records keep that order.
///
/// # Example
///
/// ```rust
/// use schema_core::{FieldDef, FieldType, Schema};
///
/// let schema = Schema {
///     name: "TouristPlace".to_string(),
///     description: Some("A famous tourist place".to_string()),
///     fields: vec![FieldDef::new("name", FieldType::Text)],
/// };
///
/// assert!(schema.check().is_ok());
/// assert_eq!(schema.field("name").unwrap().field_type, FieldType::Text);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Record name (e.g., "TouristPlace")
    pub name: String,

    /// Human-readable description of the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered field declarations
    pub fields: Vec<FieldDef>,
}

impl Schema {
    /// Looks up a field declaration by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if the schema declares a field with this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Iterates over declared field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Checks the schema's structural invariants.
    ///
    /// Nested record schemas are checked recursively. The first problem found
    /// is returned.
    pub fn check(&self) -> Result<(), SchemaDefinitionError> {
        crate::definition::check_definition(self)
    }
}

/// Semantic type of a field.
///
/// Serialized in definition files as a bare name for scalars (`text`,
/// `integer`, `float`, `boolean`) and as a single-key map for compound types
/// (`{ optional: float }`, `{ list: text }`, `{ record: { name, fields } }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    Text,
    /// 64-bit signed integer
    Integer,
    /// 64-bit float
    Float,
    /// true / false
    Boolean,
    /// Nested record validated against its own schema
    Record(Box<Schema>),
    /// Sequence whose every element has the inner type
    List(Box<FieldType>),
    /// Inner type or null
    Optional(Box<FieldType>),
}

impl FieldType {
    /// Wraps a type as optional-of.
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    /// Wraps a type as sequence-of.
    pub fn list(inner: FieldType) -> Self {
        FieldType::List(Box::new(inner))
    }

    /// Creates a nested record type.
    pub fn record(schema: Schema) -> Self {
        FieldType::Record(Box::new(schema))
    }

    /// Returns true if null is an acceptable value.
    pub fn is_nullable(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }

    /// Strips any optional-of wrappers.
    pub fn base(&self) -> &FieldType {
        match self {
            FieldType::Optional(inner) => inner.base(),
            other => other,
        }
    }

    /// Returns true for integer and float (after stripping optional-of).
    pub fn is_numeric(&self) -> bool {
        matches!(self.base(), FieldType::Integer | FieldType::Float)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Float => write!(f, "float"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Record(schema) => write!(f, "record {}", schema.name),
            FieldType::List(inner) => write!(f, "list<{}>", inner),
            FieldType::Optional(inner) => write!(f, "optional<{}>", inner),
        }
    }
}

/// A single field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, unique within its schema
    pub name: String,

    /// Semantic type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Explicit optionality. When unset, optional-of fields are optional and
    /// every other field is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    /// Value substituted when the field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Human-readable description, exported to the model as guidance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Value constraints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<FieldConstraint>,
}

impl FieldDef {
    /// Creates a field with no constraints and implicit optionality.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            optional: None,
            default: None,
            description: None,
            constraints: Vec::new(),
        }
    }

    /// Returns true if the field may be absent from a candidate.
    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or_else(|| self.field_type.is_nullable())
    }
}

/// Constraints a field value must satisfy once its type is correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldConstraint {
    /// Numeric value must lie within the inclusive bounds
    Range {
        /// Minimum value (inclusive)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Maximum value (inclusive)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    /// Text must not be empty, or a list must have at least one element
    NonEmpty,

    /// Text must match the regular expression
    Pattern {
        /// Regular expression pattern
        regex: String,
    },

    /// Value must be one of the listed values
    AllowedValues {
        /// Accepted values
        values: Vec<Value>,
    },
}

impl FieldConstraint {
    /// Creates an inclusive range constraint.
    pub fn range(min: f64, max: f64) -> Self {
        FieldConstraint::Range {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Short identifier used in violation reports.
    pub fn name(&self) -> &'static str {
        match self {
            FieldConstraint::Range { .. } => "range",
            FieldConstraint::NonEmpty => "non_empty",
            FieldConstraint::Pattern { .. } => "pattern",
            FieldConstraint::AllowedValues { .. } => "allowed_values",
        }
    }
}

impl fmt::Display for FieldConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldConstraint::Range { min, max } => {
                let lo = min.map(|m| m.to_string()).unwrap_or_else(|| "-inf".into());
                let hi = max.map(|m| m.to_string()).unwrap_or_else(|| "+inf".into());
                write!(f, "range [{}, {}]", lo, hi)
            }
            FieldConstraint::NonEmpty => write!(f, "non_empty"),
            FieldConstraint::Pattern { regex } => write!(f, "pattern '{}'", regex),
            FieldConstraint::AllowedValues { values } => {
                let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "allowed_values [{}]", values.join(", "))
            }
        }
    }
}

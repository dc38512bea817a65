//! Builder pattern for creating schemas.
//!
//! This module provides ergonomic builders for declaring schemas and their
//! fields with a fluent API. Building a schema checks its definition, so a
//! malformed schema is rejected before any candidate is processed.

use crate::{FieldConstraint, FieldDef, FieldType, Schema, SchemaDefinitionError};
use serde_json::Value;

/// Builder for creating a `Schema`.
///
/// # Example
///
/// ```rust
/// use schema_core::{FieldBuilder, FieldConstraint, FieldType, SchemaBuilder};
///
/// let schema = SchemaBuilder::new("TouristPlace")
///     .description("A famous tourist place")
///     .field(FieldBuilder::new("name", FieldType::Text).build())
///     .field(
///         FieldBuilder::new("rating", FieldType::Float)
///             .constraint(FieldConstraint::range(0.0, 5.0))
///             .build(),
///     )
///     .build()
///     .expect("valid schema");
///
/// assert_eq!(schema.fields.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    name: String,
    description: Option<String>,
    fields: Vec<FieldDef>,
}

impl SchemaBuilder {
    /// Creates a new schema builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the schema description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field to the schema.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds multiple fields to the schema.
    pub fn fields(mut self, fields: Vec<FieldDef>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Builds and checks the schema.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaDefinitionError` if the schema breaks an invariant
    /// (duplicate names, inverted range, and so on).
    pub fn build(self) -> Result<Schema, SchemaDefinitionError> {
        let schema = Schema {
            name: self.name,
            description: self.description,
            fields: self.fields,
        };
        schema.check()?;
        Ok(schema)
    }
}

/// Builder for creating a `FieldDef`.
///
/// # Example
///
/// ```rust
/// use schema_core::{FieldBuilder, FieldType};
///
/// let field = FieldBuilder::new("entry_fee", FieldType::optional(FieldType::Float))
///     .description("Entry fee in USD, if applicable")
///     .build();
///
/// assert!(field.is_optional());
/// ```
#[derive(Debug)]
pub struct FieldBuilder {
    field: FieldDef,
}

impl FieldBuilder {
    /// Creates a new field builder.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field: FieldDef::new(name, field_type),
        }
    }

    /// Marks the field as optional.
    pub fn optional(mut self) -> Self {
        self.field.optional = Some(true);
        self
    }

    /// Marks the field as required, even if its type is optional-of.
    pub fn required(mut self) -> Self {
        self.field.optional = Some(false);
        self
    }

    /// Sets the value used when the field is absent. Implies optional.
    pub fn default(mut self, value: Value) -> Self {
        self.field.default = Some(value);
        self.field.optional = Some(true);
        self
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.field.description = Some(description.into());
        self
    }

    /// Adds a constraint to the field.
    pub fn constraint(mut self, constraint: FieldConstraint) -> Self {
        self.field.constraints.push(constraint);
        self
    }

    /// Builds the field.
    pub fn build(self) -> FieldDef {
        self.field
    }
}

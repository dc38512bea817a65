//! # Structured Output Validator
//!
//! Validation engine for structured model output. Given a schema and an
//! untyped candidate value, the validator either returns a strongly-typed
//! [`ValidatedRecord`] or every [`Violation`] it found:
//!
//! - Presence (required fields, defaults, optional fields)
//! - Safe type coercion (an integral float may fill an integer field; text
//!   never becomes numeric)
//! - Constraints (ranges, non-empty, patterns, allowed values)
//! - Nested records and sequences, with dotted and indexed paths
//!
//! Validation is pure: no I/O, no shared mutable state, identical results
//! for identical inputs.
//!
//! ## Example
//!
//! ```rust
//! use schema_core::{FieldBuilder, FieldConstraint, FieldType, SchemaBuilder};
//! use schema_validator::{Validator, ViolationKind};
//! use serde_json::json;
//!
//! let schema = SchemaBuilder::new("TouristPlace")
//!     .field(FieldBuilder::new("name", FieldType::Text).build())
//!     .field(FieldBuilder::new("zip_code", FieldType::Integer).build())
//!     .field(
//!         FieldBuilder::new("rating", FieldType::Float)
//!             .constraint(FieldConstraint::range(0.0, 5.0))
//!             .build(),
//!     )
//!     .build()
//!     .unwrap();
//! let validator = Validator::new(schema).unwrap();
//!
//! let violations = validator
//!     .validate(&json!({ "name": "Statue of Liberty", "zip_code": 10028.9, "rating": 6.2 }))
//!     .unwrap_err();
//!
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations.as_slice()[0].kind(), ViolationKind::TypeMismatch);
//! println!("{}", violations);
//! ```

mod coerce;
mod constraints;
mod engine;
mod error;
mod record;
mod report;

pub use engine::*;
pub use error::*;
pub use record::*;

use constraints::ConstraintChecker;

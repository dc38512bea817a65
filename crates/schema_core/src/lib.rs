//! # Structured Output Schema Core
//!
//! Core data structures for declaring the shape a generative model's output
//! must take.
//!
//! ## Key Concepts
//!
//! - **Schema**: A named, ordered list of field declarations
//! - **Field**: A name, a semantic type, an optionality flag, and constraints
//! - **Constraint**: A rule a correctly-typed value must also satisfy
//! - **Policy**: Options applied while validating candidates
//!
//! ## Example
//!
//! ```rust
//! use schema_core::{FieldBuilder, FieldConstraint, FieldType, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new("TouristPlace")
//!     .field(FieldBuilder::new("name", FieldType::Text).build())
//!     .field(FieldBuilder::new("zip_code", FieldType::Integer).build())
//!     .field(FieldBuilder::new("entry_fee", FieldType::optional(FieldType::Float)).build())
//!     .field(
//!         FieldBuilder::new("rating", FieldType::Float)
//!             .constraint(FieldConstraint::range(0.0, 5.0))
//!             .build(),
//!     )
//!     .build()
//!     .expect("schema is well-formed");
//!
//! assert!(schema.has_field("rating"));
//! ```

pub mod builder;
pub mod definition;
pub mod error;
pub mod json_schema;
pub mod policy;
pub mod schema;

pub use builder::*;
pub use definition::*;
pub use error::*;
pub use policy::*;
pub use schema::*;

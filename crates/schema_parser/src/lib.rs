//! Parser for structured output schemas (YAML/TOML formats) and raw model output.
//!
//! This module loads schema definitions from YAML and TOML files into the
//! strongly-typed [`Schema`] structure, and decodes raw model text into a
//! candidate value ready for validation.
//!
//! Every schema returned by this crate has passed its definition checks.
//!
//! # Example
//!
//! ```rust
//! use schema_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: TouristPlace
//! description: A famous tourist place
//! fields:
//!   - name: name
//!     type: text
//!   - name: entry_fee
//!     type: { optional: float }
//! "#;
//!
//! let schema = parse_yaml(yaml).expect("Failed to parse schema");
//! assert_eq!(schema.name, "TouristPlace");
//! assert_eq!(schema.fields.len(), 2);
//! ```

use schema_core::{Schema, SchemaDefinitionError};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading schemas or decoding model output.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// Model output is not valid JSON
    #[error("Failed to decode JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The parsed schema is malformed
    #[error("Invalid schema definition: {0}")]
    Definition(#[from] SchemaDefinitionError),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported schema file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a schema from a YAML string.
///
/// # Example
///
/// ```rust
/// use schema_core::FieldType;
/// use schema_parser::parse_yaml;
///
/// let yaml = r#"
/// name: Preferences
/// fields:
///   - name: num_places
///     type: integer
///     default: 5
/// "#;
///
/// let schema = parse_yaml(yaml).unwrap();
/// assert_eq!(schema.fields[0].field_type, FieldType::Integer);
/// ```
pub fn parse_yaml(content: &str) -> Result<Schema> {
    let schema: Schema = serde_yaml_ng::from_str(content)?;
    schema.check()?;
    Ok(schema)
}

/// Parse a schema from a TOML string.
///
/// # Example
///
/// ```rust
/// use schema_parser::parse_toml;
///
/// let toml = r#"
/// name = "Preferences"
///
/// [[fields]]
/// name = "location_type"
/// type = { optional = "text" }
/// "#;
///
/// let schema = parse_toml(toml).unwrap();
/// assert!(schema.fields[0].is_optional());
/// ```
pub fn parse_toml(content: &str) -> Result<Schema> {
    let schema: Schema =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    schema.check()?;
    Ok(schema)
}

/// Detect the schema format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `SchemaFormat::Yaml`
/// * `.toml` → `SchemaFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<SchemaFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(SchemaFormat::Yaml),
        "toml" => Ok(SchemaFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use schema_parser::parse_file;
/// use std::path::Path;
///
/// let schema = parse_file(Path::new("schemas/tourist_place.yml")).unwrap();
/// println!("Loaded schema: {}", schema.name);
/// ```
pub fn parse_file(path: &Path) -> Result<Schema> {
    let format = detect_format(path)?;
    info!("Loading schema from {}", path.display());
    let content = std::fs::read_to_string(path)?;

    let schema = match format {
        SchemaFormat::Yaml => parse_yaml(&content)?,
        SchemaFormat::Toml => parse_toml(&content)?,
    };

    info!(
        "Loaded schema '{}' with {} fields",
        schema.name,
        schema.fields.len()
    );
    Ok(schema)
}

/// Decode raw model output into a candidate value.
///
/// Models frequently wrap JSON in a Markdown code fence; a leading
/// ```` ``` ```` or ```` ```json ```` line and a trailing ```` ``` ```` are
/// removed before decoding. The decoded value is not validated here.
///
/// # Example
///
/// ```rust
/// use schema_parser::parse_candidate;
///
/// let text = "```json\n{\"name\": \"Central Park\"}\n```";
/// let candidate = parse_candidate(text).unwrap();
/// assert_eq!(candidate["name"], "Central Park");
/// ```
pub fn parse_candidate(text: &str) -> Result<Value> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body)?;
    debug!("Decoded candidate of {} bytes", body.len());
    Ok(value)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") up to the end of the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

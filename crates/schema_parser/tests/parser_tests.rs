use pretty_assertions::assert_eq;
use schema_core::{FieldType, SchemaDefinitionError};
use schema_parser::{ParserError, parse_file};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_yaml_and_toml_definitions_agree() {
    let from_yaml = parse_file(&fixture_path("tourist_place.yml")).unwrap();
    let from_toml = parse_file(&fixture_path("tourist_place.toml")).unwrap();

    assert_eq!(from_yaml, from_toml);
    assert_eq!(
        from_yaml.field_names().collect::<Vec<_>>(),
        vec![
            "name",
            "description",
            "zip_code",
            "best_time_to_visit",
            "entry_fee",
            "rating"
        ]
    );
}

#[test]
fn test_nested_definition() {
    let schema = parse_file(&fixture_path("stock_analysis.yml")).unwrap();

    let news = schema.field("news").unwrap();
    match &news.field_type {
        FieldType::List(inner) => match inner.as_ref() {
            FieldType::Record(item) => {
                assert_eq!(item.name, "NewsItem");
                assert_eq!(item.fields.len(), 3);
            }
            other => panic!("Expected record element, got {:?}", other),
        },
        other => panic!("Expected list type, got {:?}", other),
    }
    assert!(schema.field("watchlist").unwrap().is_optional());
}

#[test]
fn test_malformed_definition_file() {
    let result = parse_file(&fixture_path("invalid_optional.yml"));

    match result {
        Err(ParserError::Definition(SchemaDefinitionError::OptionalWithoutDefault { field })) => {
            assert_eq!(field, "num_places");
        }
        other => panic!("Expected OptionalWithoutDefault, got {:?}", other),
    }
}

#[test]
fn test_parse_file_from_temp_dir() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("city.yaml");
    let yaml = "name: City
fields:
  - name: name
    type: text
  - name: population
    type: integer
";
    fs::write(&path, yaml).unwrap();

    let schema = parse_file(&path).unwrap();
    assert_eq!(schema.name, "City");
    assert_eq!(schema.fields[1].field_type, FieldType::Integer);
}

#[test]
fn test_parse_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = parse_file(&temp_dir.path().join("missing.yml"));

    assert!(matches!(result.unwrap_err(), ParserError::IoError(_)));
}

#[test]
fn test_parse_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("schema.json");
    fs::write(&path, "{}").unwrap();

    assert!(matches!(
        parse_file(&path).unwrap_err(),
        ParserError::UnsupportedFormat(ext) if ext == "json"
    ));
}

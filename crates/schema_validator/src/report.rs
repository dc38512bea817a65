//! Human and machine readable renderings of rejected candidates.
//!
//! Each violation carries its path, offending value and reason, so a report
//! explains a rejection without the reader consulting the schema source.

use crate::{Violation, Violations};
use serde_json::{Value, json};
use std::fmt;

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} violation(s):", self.len())?;
        for (i, violation) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl Violations {
    /// Renders the violations as a JSON report.
    ///
    /// ```rust
    /// use schema_core::{FieldBuilder, FieldType, SchemaBuilder};
    /// use schema_validator::Validator;
    /// use serde_json::json;
    ///
    /// let schema = SchemaBuilder::new("City")
    ///     .field(FieldBuilder::new("zip_code", FieldType::Integer).build())
    ///     .build()
    ///     .unwrap();
    /// let violations = Validator::new(schema)
    ///     .unwrap()
    ///     .validate(&json!({ "zip_code": "10021" }))
    ///     .unwrap_err();
    ///
    /// let report = violations.to_json();
    /// assert_eq!(report["passed"], false);
    /// assert_eq!(report["violations"][0]["path"], "zip_code");
    /// ```
    pub fn to_json(&self) -> Value {
        json!({
            "passed": false,
            "violations": self.iter().map(violation_json).collect::<Vec<_>>(),
            "summary": {
                "violation_count": self.len(),
            }
        })
    }
}

fn violation_json(violation: &Violation) -> Value {
    json!({
        "path": violation.path(),
        "kind": violation.kind().as_str(),
        "violated": violation.violated(),
        "value": violation.value(),
        "reason": violation.reason(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Violations {
        Violations::new(vec![
            Violation::type_mismatch_with_reason(
                "zip_code",
                "integer",
                &json!(10028.9),
                "expected integer, got number with fractional part",
            ),
            Violation::missing_field("name"),
        ])
    }

    #[test]
    fn test_text_report() {
        assert_eq!(
            sample().to_string(),
            "2 violation(s):\n\
             \x20 1. zip_code: expected integer, got number with fractional part (got 10028.9)\n\
             \x20 2. name: field required\n"
        );
    }

    #[test]
    fn test_json_report() {
        let report = sample().to_json();
        assert_eq!(report["summary"]["violation_count"], 2);
        assert_eq!(
            report["violations"][0],
            json!({
                "path": "zip_code",
                "kind": "type_mismatch",
                "violated": "integer",
                "value": 10028.9,
                "reason": "expected integer, got number with fractional part"
            })
        );
        assert_eq!(report["violations"][1]["value"], Value::Null);
    }
}

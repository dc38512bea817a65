//! Safe coercion of raw scalar values.
//!
//! Only lossless conversions are accepted: an integral float may become an
//! integer and any integer may become a float. Text never becomes numeric and
//! numbers never become text.

use crate::Violation;
use serde_json::Value;

/// 2^63, the first float above `i64::MAX`.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Coerces a raw value into an integer.
pub fn coerce_integer(raw: &Value, path: &str, expected: &str) -> Result<i64, Violation> {
    let Value::Number(n) = raw else {
        return Err(Violation::type_mismatch(path, expected, raw));
    };

    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    if n.is_u64() {
        return Err(Violation::type_mismatch_with_reason(
            path,
            expected,
            raw,
            format!("integer {} is out of range", n),
        ));
    }

    // Float representation: accept only an exactly integral value in range.
    let f = n.as_f64().unwrap_or(f64::NAN);
    if f.fract() != 0.0 || !f.is_finite() {
        return Err(Violation::type_mismatch_with_reason(
            path,
            expected,
            raw,
            format!("expected {}, got number with fractional part", expected),
        ));
    }
    if f < -I64_UPPER || f >= I64_UPPER {
        return Err(Violation::type_mismatch_with_reason(
            path,
            expected,
            raw,
            format!("integer {} is out of range", n),
        ));
    }
    Ok(f as i64)
}

/// Coerces a raw value into a float.
pub fn coerce_float(raw: &Value, path: &str, expected: &str) -> Result<f64, Violation> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Violation::type_mismatch(path, expected, raw)),
        _ => Err(Violation::type_mismatch(path, expected, raw)),
    }
}

/// Coerces a raw value into text.
pub fn coerce_text(raw: &Value, path: &str, expected: &str) -> Result<String, Violation> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        _ => Err(Violation::type_mismatch(path, expected, raw)),
    }
}

/// Coerces a raw value into a boolean.
pub fn coerce_bool(raw: &Value, path: &str, expected: &str) -> Result<bool, Violation> {
    match raw {
        Value::Bool(b) => Ok(*b),
        _ => Err(Violation::type_mismatch(path, expected, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViolationKind;
    use serde_json::json;

    #[test]
    fn test_integer_accepts_integral_float() {
        assert_eq!(coerce_integer(&json!(10021), "z", "integer"), Ok(10021));
        assert_eq!(coerce_integer(&json!(10021.0), "z", "integer"), Ok(10021));
        assert_eq!(coerce_integer(&json!(-3.0), "z", "integer"), Ok(-3));
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let err = coerce_integer(&json!(10028.90), "zip_code", "integer").unwrap_err();
        assert_eq!(err.kind(), ViolationKind::TypeMismatch);
        assert_eq!(
            err.reason(),
            "expected integer, got number with fractional part"
        );
        assert_eq!(err.value(), Some(&json!(10028.90)));
    }

    #[test]
    fn test_integer_rejects_text_and_bool() {
        assert!(coerce_integer(&json!("42"), "z", "integer").is_err());
        assert!(coerce_integer(&json!(true), "z", "integer").is_err());
        assert!(coerce_integer(&json!(null), "z", "integer").is_err());
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = coerce_integer(&json!(u64::MAX), "z", "integer").unwrap_err();
        assert!(err.reason().contains("out of range"));

        let err = coerce_integer(&json!(1e300), "z", "integer").unwrap_err();
        assert!(err.reason().contains("out of range"));
    }

    #[test]
    fn test_float_accepts_integer() {
        assert_eq!(coerce_float(&json!(4), "r", "float"), Ok(4.0));
        assert_eq!(coerce_float(&json!(4.7), "r", "float"), Ok(4.7));
    }

    #[test]
    fn test_float_rejects_text() {
        let err = coerce_float(&json!("Free"), "entry_fee", "float").unwrap_err();
        assert_eq!(err.reason(), "expected float, got string");
    }

    #[test]
    fn test_text_rejects_number() {
        assert!(coerce_text(&json!(12), "name", "text").is_err());
        assert_eq!(coerce_text(&json!("x"), "name", "text"), Ok("x".to_string()));
    }

    #[test]
    fn test_bool_is_strict() {
        assert_eq!(coerce_bool(&json!(false), "b", "boolean"), Ok(false));
        assert!(coerce_bool(&json!("true"), "b", "boolean").is_err());
        assert!(coerce_bool(&json!(1), "b", "boolean").is_err());
    }
}

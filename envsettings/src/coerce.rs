//! Type-directed coercion of raw override strings.
//!
//! [`coerce`] is a pure function from a raw string and a [`TypeTag`] to a
//! [`Value`]. It never touches the environment and never falls back to a
//! default; a malformed override is always an error.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::CoercionError;
use crate::value::{TypeTag, Value};

const TRUTHY: [&str; 4] = ["true", "1", "yes", "on"];
const FALSY: [&str; 4] = ["false", "0", "no", "off"];

/// Convert a raw override string into a value of the declared type.
pub fn coerce(raw: &str, tag: &TypeTag) -> Result<Value, CoercionError> {
    match tag {
        TypeTag::Bool => coerce_bool(raw),
        TypeTag::Int => i64::from_str(raw)
            .map(Value::Int)
            .map_err(|e| scalar_error(raw, "int", e)),
        TypeTag::Float => f64::from_str(raw)
            .map(Value::Float)
            .map_err(|e| scalar_error(raw, "float", e)),
        TypeTag::Str => Ok(Value::Str(raw.to_string())),
        TypeTag::List => coerce_json(raw, "array"),
        TypeTag::Map => coerce_json(raw, "object"),
        TypeTag::DateTime => coerce_datetime(raw),
        TypeTag::Date => NaiveDate::from_str(raw)
            .map(Value::Date)
            .map_err(|e| scalar_error(raw, "date", e)),
        TypeTag::Time => NaiveTime::from_str(raw)
            .map(Value::Time)
            .map_err(|e| scalar_error(raw, "time", e)),
        TypeTag::Decimal => coerce_decimal(raw),
        TypeTag::Uuid => Uuid::try_parse(raw)
            .map(Value::Uuid)
            .map_err(|e| scalar_error(raw, "uuid", e)),
        TypeTag::Optional(inner) => {
            if raw.eq_ignore_ascii_case("none") {
                Ok(Value::None)
            } else {
                coerce(raw, inner)
            }
        }
        TypeTag::Union(members) => coerce_union(raw, members),
        TypeTag::Custom(custom) => {
            (custom.parse)(raw).map_err(|message| CoercionError::InvalidScalar {
                value: raw.to_string(),
                expected: custom.name,
                message,
            })
        }
    }
}

fn scalar_error(
    raw: &str,
    expected: &'static str,
    error: impl std::fmt::Display,
) -> CoercionError {
    CoercionError::InvalidScalar {
        value: raw.to_string(),
        expected,
        message: error.to_string(),
    }
}

fn coerce_bool(raw: &str) -> Result<Value, CoercionError> {
    let normalized = raw.to_ascii_lowercase();
    if TRUTHY.contains(&normalized.as_str()) {
        Ok(Value::Bool(true))
    } else if FALSY.contains(&normalized.as_str()) {
        Ok(Value::Bool(false))
    } else {
        Err(CoercionError::InvalidBool {
            value: raw.to_string(),
        })
    }
}

fn coerce_json(raw: &str, expected: &'static str) -> Result<Value, CoercionError> {
    let parsed: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| CoercionError::InvalidJson {
            expected,
            message: json_message(raw, &e),
        })?;
    match (expected, parsed) {
        ("array", serde_json::Value::Array(items)) => Ok(Value::List(items)),
        ("object", serde_json::Value::Object(entries)) => Ok(Value::Map(entries)),
        (_, other) => Err(CoercionError::JsonShape {
            expected,
            got: json_shape_name(&other),
        }),
    }
}

/// Parser message with a usage hint for the common operator mistakes.
fn json_message(raw: &str, error: &serde_json::Error) -> String {
    if raw.trim().is_empty() {
        "empty value is not valid JSON; use '[]' for an empty list or '{}' for an empty map"
            .to_string()
    } else if raw.contains('\'') {
        format!("{error} (JSON strings use double quotes, not single quotes)")
    } else {
        error.to_string()
    }
}

fn json_shape_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// ISO-8601 datetime. Offset-carrying inputs are accepted and reduced to
/// their local wall-clock components.
fn coerce_datetime(raw: &str) -> Result<Value, CoercionError> {
    if let Ok(naive) = NaiveDateTime::from_str(raw) {
        return Ok(Value::DateTime(naive));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Value::DateTime(dt.naive_local()))
        .map_err(|e| scalar_error(raw, "datetime", e))
}

/// Plain decimal literals first, scientific notation second. Both preserve
/// the exact textual precision; no float round-trip.
fn coerce_decimal(raw: &str) -> Result<Value, CoercionError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map(Value::Decimal)
        .map_err(|e| scalar_error(raw, "decimal", e))
}

fn coerce_union(raw: &str, members: &[TypeTag]) -> Result<Value, CoercionError> {
    let mut attempts = Vec::with_capacity(members.len());
    for member in members {
        match coerce(raw, member) {
            Ok(value) => return Ok(value),
            Err(error) => attempts.push((member.name(), error.to_string())),
        }
    }
    Err(CoercionError::UnionExhausted {
        value: raw.to_string(),
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_bool_truthy_spellings() {
        for raw in ["true", "True", "TRUE", "1", "yes", "Yes", "on", "ON"] {
            assert_eq!(coerce(raw, &TypeTag::Bool).unwrap(), Value::Bool(true), "{raw}");
        }
    }

    #[test]
    fn test_bool_falsy_spellings() {
        for raw in ["false", "False", "FALSE", "0", "no", "No", "off", "OFF"] {
            assert_eq!(coerce(raw, &TypeTag::Bool).unwrap(), Value::Bool(false), "{raw}");
        }
    }

    #[test]
    fn test_bool_rejects_other_strings() {
        for raw in ["maybe", "2", "", "truee"] {
            assert!(matches!(
                coerce(raw, &TypeTag::Bool),
                Err(CoercionError::InvalidBool { .. })
            ));
        }
    }

    #[test]
    fn test_int() {
        assert_eq!(coerce("42", &TypeTag::Int).unwrap(), Value::Int(42));
        assert_eq!(coerce("-7", &TypeTag::Int).unwrap(), Value::Int(-7));
        assert!(matches!(
            coerce("not_a_number", &TypeTag::Int),
            Err(CoercionError::InvalidScalar { expected: "int", .. })
        ));
        assert!(coerce("3.14", &TypeTag::Int).is_err());
    }

    #[test]
    fn test_float_widens_integer_strings() {
        assert_eq!(coerce("3.14", &TypeTag::Float).unwrap(), Value::Float(3.14));
        assert_eq!(coerce("42", &TypeTag::Float).unwrap(), Value::Float(42.0));
        assert!(coerce("fast", &TypeTag::Float).is_err());
    }

    #[test]
    fn test_str_identity() {
        assert_eq!(
            coerce("hello world", &TypeTag::Str).unwrap(),
            Value::Str("hello world".to_string())
        );
        // Even strings that look like other types stay strings
        assert_eq!(coerce("42", &TypeTag::Str).unwrap(), Value::Str("42".to_string()));
    }

    #[test]
    fn test_list_from_json() {
        let value = coerce(r#"["a", "b", "c"]"#, &TypeTag::List).unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                serde_json::json!("a"),
                serde_json::json!("b"),
                serde_json::json!("c"),
            ])
        );
    }

    #[test]
    fn test_map_from_json() {
        let value = coerce(r#"{"key": "value", "n": 3}"#, &TypeTag::Map).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.get("key"), Some(&serde_json::json!("value")));
        assert_eq!(map.get("n"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn test_json_shape_mismatch() {
        assert!(matches!(
            coerce(r#"{"key": "value"}"#, &TypeTag::List),
            Err(CoercionError::JsonShape { expected: "array", got: "object" })
        ));
        assert!(matches!(
            coerce(r#"["a"]"#, &TypeTag::Map),
            Err(CoercionError::JsonShape { expected: "object", got: "array" })
        ));
        // A bare scalar is valid JSON but the wrong shape
        assert!(matches!(
            coerce("42", &TypeTag::List),
            Err(CoercionError::JsonShape { got: "number", .. })
        ));
    }

    #[test]
    fn test_malformed_json_single_quote_hint() {
        let err = coerce("['a', 'b']", &TypeTag::List).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("double quotes"), "{message}");
    }

    #[test]
    fn test_malformed_json_empty_value_hint() {
        let err = coerce("", &TypeTag::List).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'[]'"), "{message}");
    }

    #[test]
    fn test_optional_none_fast_path() {
        let tag = TypeTag::Optional(Box::new(TypeTag::Int));
        for raw in ["none", "None", "NONE"] {
            assert_eq!(coerce(raw, &tag).unwrap(), Value::None, "{raw}");
        }
        assert_eq!(coerce("42", &tag).unwrap(), Value::Int(42));
        assert!(coerce("forty-two", &tag).is_err());
    }

    #[test]
    fn test_optional_str_none_is_still_absent() {
        // "none" reduces to the absent value regardless of the inner type
        let tag = TypeTag::Optional(Box::new(TypeTag::Str));
        assert_eq!(coerce("none", &tag).unwrap(), Value::None);
        assert_eq!(coerce("something", &tag).unwrap(), Value::Str("something".to_string()));
    }

    #[test]
    fn test_union_first_member_wins() {
        let tag = TypeTag::Union(vec![TypeTag::Int, TypeTag::Str]);
        assert_eq!(coerce("42", &tag).unwrap(), Value::Int(42));
        assert_eq!(coerce("forty", &tag).unwrap(), Value::Str("forty".to_string()));
    }

    #[test]
    fn test_union_declaration_order_matters() {
        let tag = TypeTag::Union(vec![TypeTag::Str, TypeTag::Int]);
        // Str is first and never fails, so the int never gets a chance
        assert_eq!(coerce("42", &tag).unwrap(), Value::Str("42".to_string()));
    }

    #[test]
    fn test_union_exhausted_reports_every_attempt() {
        let tag = TypeTag::Union(vec![TypeTag::Int, TypeTag::Bool]);
        let err = coerce("zzz", &tag).unwrap_err();
        match &err {
            CoercionError::UnionExhausted { attempts, .. } => {
                assert_eq!(attempts.len(), 2);
                assert_eq!(attempts[0].0, "int");
                assert_eq!(attempts[1].0, "bool");
            }
            other => panic!("expected UnionExhausted, got {other:?}"),
        }
    }

    #[test]
    fn test_datetime() {
        assert_eq!(
            coerce("2024-12-25T15:30:45", &TypeTag::DateTime).unwrap(),
            Value::DateTime(
                NaiveDate::from_ymd_opt(2024, 12, 25)
                    .unwrap()
                    .and_hms_opt(15, 30, 45)
                    .unwrap()
            )
        );
        assert!(coerce("not-a-datetime", &TypeTag::DateTime).is_err());
    }

    #[test]
    fn test_datetime_fractional_seconds() {
        let value = coerce("2024-12-31T23:59:59.999999", &TypeTag::DateTime).unwrap();
        let dt = value.as_datetime().unwrap();
        assert_eq!(dt.and_utc().timestamp_subsec_micros(), 999_999);
    }

    #[test]
    fn test_datetime_with_offset_keeps_wall_clock() {
        let value = coerce("2024-06-15T10:30:00+05:30", &TypeTag::DateTime).unwrap();
        let dt = value.as_datetime().unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2024, 6, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_date() {
        assert_eq!(
            coerce("2024-06-15", &TypeTag::Date).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        );
        // Wrong separator
        assert!(coerce("2024/06/15", &TypeTag::Date).is_err());
    }

    #[test]
    fn test_time() {
        assert_eq!(
            coerce("02:30:00", &TypeTag::Time).unwrap(),
            Value::Time(NaiveTime::from_hms_opt(2, 30, 0).unwrap())
        );
        let with_micros = coerce("09:15:30.500000", &TypeTag::Time).unwrap();
        assert_eq!(
            with_micros,
            Value::Time(NaiveTime::from_hms_micro_opt(9, 15, 30, 500_000).unwrap())
        );
        assert!(coerce("3:00 AM", &TypeTag::Time).is_err());
    }

    #[test]
    fn test_decimal_exact_precision() {
        let value = coerce("19.99", &TypeTag::Decimal).unwrap();
        assert_eq!(value, Value::Decimal("19.99".parse().unwrap()));
        assert_eq!(value.to_string(), "19.99");

        // All the digits survive, no binary-float approximation
        let precise = coerce("0.00012345678901234567890", &TypeTag::Decimal).unwrap();
        assert_eq!(precise.to_string(), "0.00012345678901234567890");
    }

    #[test]
    fn test_decimal_scientific_notation() {
        let small = coerce("2.5E-8", &TypeTag::Decimal).unwrap();
        assert_eq!(small, Value::Decimal(Decimal::from_scientific("2.5E-8").unwrap()));
        let large = coerce("3.14159E6", &TypeTag::Decimal).unwrap();
        assert_eq!(large.as_decimal().unwrap(), "3141590".parse().unwrap());
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        assert!(matches!(
            coerce("not-a-number", &TypeTag::Decimal),
            Err(CoercionError::InvalidScalar { expected: "decimal", .. })
        ));
    }

    #[test]
    fn test_uuid_accepted_forms() {
        let expected = Value::Uuid("550e8400-e29b-41d4-a716-446655440000".parse().unwrap());
        // Hyphenated, simple, and braced forms all parse to the same UUID
        for raw in [
            "550e8400-e29b-41d4-a716-446655440000",
            "550e8400e29b41d4a716446655440000",
            "{550e8400-e29b-41d4-a716-446655440000}",
        ] {
            assert_eq!(coerce(raw, &TypeTag::Uuid).unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn test_uuid_case_insensitive() {
        assert_eq!(
            coerce("A8098C1A-F86E-11DA-BD1A-00112444BE1E", &TypeTag::Uuid).unwrap(),
            Value::Uuid("a8098c1a-f86e-11da-bd1a-00112444be1e".parse().unwrap())
        );
    }

    #[test]
    fn test_uuid_invalid() {
        assert!(coerce("not-a-uuid", &TypeTag::Uuid).is_err());
    }

    #[test]
    fn test_custom_type_delegation() {
        use crate::value::CustomType;

        fn doubled(raw: &str) -> Result<Value, String> {
            raw.parse::<i64>()
                .map(|n| Value::Int(n * 2))
                .map_err(|e| e.to_string())
        }

        let tag = TypeTag::Custom(CustomType { name: "doubled", parse: doubled });
        assert_eq!(coerce("21", &tag).unwrap(), Value::Int(42));

        let err = coerce("bad", &tag).unwrap_err();
        assert!(err.to_string().contains("doubled"));
    }

    #[test]
    fn test_optional_custom_type() {
        use crate::value::CustomType;

        fn passthrough(raw: &str) -> Result<Value, String> {
            Ok(Value::Str(raw.to_string()))
        }

        let tag = TypeTag::Optional(Box::new(TypeTag::Custom(CustomType {
            name: "passthrough",
            parse: passthrough,
        })));
        assert_eq!(coerce("none", &tag).unwrap(), Value::None);
        assert_eq!(coerce("data", &tag).unwrap(), Value::Str("data".to_string()));
    }

    #[test]
    fn test_coercion_is_deterministic() {
        let tag = TypeTag::Union(vec![TypeTag::Int, TypeTag::Float, TypeTag::Str]);
        let first = coerce("1.5", &tag).unwrap();
        let second = coerce("1.5", &tag).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Value::Float(1.5));
    }
}

//! Validation of raw input against a [`ParameterCollection`].

use chrono::DateTime;
use serde_json::{Map, Number, Value};

use crate::collection::ParameterCollection;
use crate::def::{ParameterDef, Requiredness};
use crate::error::ValidationError;
use crate::kind::ParameterKind;
use crate::values::ParameterValues;

/// Validate `raw` against `fields`, producing the typed payload.
///
/// Fields are visited in declaration order. For each field:
///
/// 1. A present, non-null value is coerced into the declared kind and
///    checked against the field's rules.
/// 2. An absent value fails with
///    [`MissingRequiredField`](ValidationError::MissingRequiredField) when the
///    field is required. Conditional requiredness is evaluated against the
///    values accepted so far, so a rule can only see earlier fields.
/// 3. An absent optional field takes its default, or is left out.
///
/// Keys of `raw` that are not declared are dropped. The first failure is
/// returned; errors are never aggregated.
pub fn validate(
    fields: &ParameterCollection,
    raw: &Map<String, Value>,
) -> Result<ParameterValues, ValidationError> {
    let mut values = ParameterValues::new();

    for def in fields {
        let key = def.key();
        match raw.get(key).filter(|v| !v.is_null()) {
            Some(value) => {
                let coerced = coerce(def, value)?;
                check_rules(def, &coerced)?;
                values.set(key, coerced);
            }
            None => {
                if is_required(def, &values) {
                    return Err(ValidationError::MissingRequiredField {
                        field: key.to_owned(),
                    });
                }
                if let Some(default) = &def.default {
                    values.set(key, coerce(def, default)?);
                }
            }
        }
    }

    Ok(values)
}

fn is_required(def: &ParameterDef, validated: &ParameterValues) -> bool {
    match &def.required {
        Requiredness::Optional => false,
        Requiredness::Always => true,
        Requiredness::When { rules } => rules.evaluate(validated),
    }
}

/// Check an already coerced value against the field's rules.
///
/// Elements of a `multiple` field are checked one by one and reported as
/// `key[index]`.
pub(crate) fn check_rules(def: &ParameterDef, value: &Value) -> Result<(), ValidationError> {
    for rule in &def.validation {
        match value {
            Value::Array(items) if def.multiple => {
                for (index, item) in items.iter().enumerate() {
                    rule.check(&element_path(def.key(), index), item)?;
                }
            }
            single => rule.check(def.key(), single)?,
        }
    }
    Ok(())
}

fn element_path(key: &str, index: usize) -> String {
    format!("{key}[{index}]")
}

/// Coerce a raw value into the field's declared shape.
pub(crate) fn coerce(def: &ParameterDef, value: &Value) -> Result<Value, ValidationError> {
    if !def.multiple {
        return coerce_single(def, def.key(), value);
    }

    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| coerce_single(def, &element_path(def.key(), index), item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(mismatch(def, def.key(), format!("array of {}", def.kind), other)),
    }
}

fn coerce_single(def: &ParameterDef, path: &str, value: &Value) -> Result<Value, ValidationError> {
    let coerced = match (def.kind, value) {
        (ParameterKind::String | ParameterKind::Text | ParameterKind::Password, v) => match v {
            Value::String(_) => Some(v.clone()),
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },

        (ParameterKind::Number, Value::Number(_)) => Some(value.clone()),
        (ParameterKind::Number, Value::String(s)) => parse_number(s.trim()),

        (ParameterKind::Integer, Value::Number(n)) => integral(n),
        (ParameterKind::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::from),

        (ParameterKind::Boolean, Value::Bool(_)) => Some(value.clone()),
        (ParameterKind::Boolean, Value::String(s)) => match s.trim() {
            t if t.eq_ignore_ascii_case("true") => Some(Value::Bool(true)),
            t if t.eq_ignore_ascii_case("false") => Some(Value::Bool(false)),
            _ => None,
        },

        (ParameterKind::Datetime, Value::Number(n)) => n.as_u64().map(Value::from),
        (ParameterKind::Datetime, Value::String(s)) => {
            let s = s.trim();
            if DateTime::parse_from_rfc3339(s).is_ok() {
                Some(Value::String(s.to_owned()))
            } else {
                s.parse::<u64>().ok().map(Value::from)
            }
        }

        (ParameterKind::Object, Value::Object(map)) => {
            if def.properties.is_empty() {
                Some(value.clone())
            } else {
                let nested = validate(&def.properties, map)
                    .map_err(|e| e.nested_under(path))?;
                Some(nested.into_value())
            }
        }

        _ => None,
    };

    coerced.ok_or_else(|| mismatch(def, path, def.kind.to_string(), value))
}

fn parse_number(s: &str) -> Option<Value> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// 2^63, the first float above `i64::MAX`.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn integral(n: &Number) -> Option<Value> {
    if n.is_i64() || n.is_u64() {
        return Some(Value::Number(n.clone()));
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < I64_UPPER_BOUND)
        .map(|f| Value::from(f as i64))
}

fn mismatch(def: &ParameterDef, path: &str, expected: String, actual: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        field: path.to_owned(),
        expected,
        actual: describe(actual, def.sensitive),
    }
}

fn describe(value: &Value, sensitive: bool) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Array(_) => "array".to_owned(),
        Value::Object(_) => "object".to_owned(),
        Value::Bool(_) | Value::Number(_) | Value::String(_) if sensitive => {
            "redacted value".to_owned()
        }
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::RuleSet;
    use crate::error::ValidationErrorKind;
    use crate::validation::ValidationRule;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    fn single(def: ParameterDef) -> ParameterCollection {
        ParameterCollection::new().try_with(def).unwrap()
    }

    #[rstest]
    #[case(ParameterKind::Number, json!("12.5"), json!(12.5))]
    #[case(ParameterKind::Number, json!(" 7 "), json!(7))]
    #[case(ParameterKind::Number, json!(3), json!(3))]
    #[case(ParameterKind::Integer, json!(4.0), json!(4))]
    #[case(ParameterKind::Integer, json!("42"), json!(42))]
    #[case(ParameterKind::Boolean, json!("TRUE"), json!(true))]
    #[case(ParameterKind::Boolean, json!(false), json!(false))]
    #[case(ParameterKind::String, json!(10), json!("10"))]
    #[case(ParameterKind::Datetime, json!("2021-06-01T12:00:00Z"), json!("2021-06-01T12:00:00Z"))]
    #[case(ParameterKind::Datetime, json!("1622548800"), json!(1_622_548_800))]
    #[case(ParameterKind::Datetime, json!(1_622_548_800), json!(1_622_548_800))]
    fn coerces_by_declaration(
        #[case] kind: ParameterKind,
        #[case] input: Value,
        #[case] expected: Value,
    ) {
        let fields = single(ParameterDef::new("f", "F", kind));
        let out = validate(&fields, &raw(json!({ "f": input }))).unwrap();
        assert_eq!(out.get("f"), Some(&expected));
    }

    #[rstest]
    #[case(ParameterKind::Number, json!("abc"), "number")]
    #[case(ParameterKind::Number, json!(true), "number")]
    #[case(ParameterKind::Integer, json!(1.5), "integer")]
    #[case(ParameterKind::Boolean, json!("yes"), "boolean")]
    #[case(ParameterKind::Datetime, json!("yesterday"), "datetime")]
    #[case(ParameterKind::Datetime, json!(-5), "datetime")]
    #[case(ParameterKind::Object, json!([1]), "object")]
    #[case(ParameterKind::String, json!({"a": 1}), "string")]
    fn rejects_non_coercible(
        #[case] kind: ParameterKind,
        #[case] input: Value,
        #[case] expected: &str,
    ) {
        let fields = single(ParameterDef::new("f", "F", kind));
        let err = validate(&fields, &raw(json!({ "f": input }))).unwrap_err();
        match err {
            ValidationError::TypeMismatch {
                field,
                expected: exp,
                ..
            } => {
                assert_eq!(field, "f");
                assert_eq!(exp, expected);
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn type_mismatch_describes_actual_value() {
        let fields = single(ParameterDef::number("value", "Value"));
        let err = validate(&fields, &raw(json!({"value": "abc"}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid type for `value`: expected number, got string \"abc\""
        );
    }

    #[test]
    fn sensitive_values_are_not_echoed() {
        let fields = single(ParameterDef::new("pin", "PIN", ParameterKind::Integer).sensitive());
        let err = validate(&fields, &raw(json!({"pin": "12ab"}))).unwrap_err();
        assert!(!err.to_string().contains("12ab"));
    }

    #[test]
    fn missing_required_field() {
        let fields = single(ParameterDef::string("currency", "Currency").required());
        let err = validate(&fields, &Map::new()).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::MissingRequiredField);
        assert_eq!(err.field(), "currency");
    }

    #[test]
    fn null_counts_as_absent() {
        let fields = single(ParameterDef::string("currency", "Currency").required());
        let err = validate(&fields, &raw(json!({"currency": null}))).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::MissingRequiredField);
    }

    #[test]
    fn first_failure_in_declaration_order_wins() {
        let fields = ParameterCollection::try_from_defs([
            ParameterDef::number("value", "Value"),
            ParameterDef::string("currency", "Currency").required(),
        ])
        .unwrap();
        let err = validate(&fields, &raw(json!({"value": "nan-ish"}))).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::TypeMismatch);
        assert_eq!(err.field(), "value");
    }

    #[test]
    fn defaults_fill_absent_optional_fields() {
        let fields = ParameterCollection::try_from_defs([
            ParameterDef::string("currency", "Currency").with_default("USD"),
            ParameterDef::number("value", "Value"),
        ])
        .unwrap();
        let out = validate(&fields, &Map::new()).unwrap();
        assert_eq!(out.get("currency"), Some(&json!("USD")));
        assert!(!out.contains("value"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn undeclared_keys_are_dropped() {
        let fields = single(ParameterDef::string("a", "A"));
        let out = validate(&fields, &raw(json!({"a": "x", "b": "y"}))).unwrap();
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn conditional_requiredness_sees_earlier_fields() {
        let fields = ParameterCollection::try_from_defs([
            ParameterDef::string("action_source", "Action Source"),
            ParameterDef::string("client_user_agent", "User Agent")
                .required_when(RuleSet::equals("action_source", "website")),
        ])
        .unwrap();

        let err = validate(&fields, &raw(json!({"action_source": "website"}))).unwrap_err();
        assert_eq!(err.field(), "client_user_agent");

        let ok = validate(&fields, &raw(json!({"action_source": "email"})));
        assert!(ok.is_ok());
    }

    #[test]
    fn multiple_validates_each_element() {
        let fields = single(ParameterDef::string("content_ids", "Content IDs").multiple());
        let out = validate(&fields, &raw(json!({"content_ids": ["a", 2]}))).unwrap();
        assert_eq!(out.get("content_ids"), Some(&json!(["a", "2"])));

        let err = validate(&fields, &raw(json!({"content_ids": "a"}))).unwrap_err();
        match err {
            ValidationError::TypeMismatch { expected, .. } => {
                assert_eq!(expected, "array of string");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn element_errors_carry_index() {
        let fields = single(
            ParameterDef::string("content_ids", "Content IDs")
                .multiple()
                .with_rule(ValidationRule::min_length(2)),
        );

        let err = validate(&fields, &raw(json!({"content_ids": ["ab", {"x": 1}]}))).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::TypeMismatch);
        assert_eq!(err.field(), "content_ids[1]");

        let err = validate(&fields, &raw(json!({"content_ids": ["ab", "cd", "e"]}))).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::RuleViolation);
        assert_eq!(err.field(), "content_ids[2]");
    }

    #[test]
    fn nested_element_errors_carry_index_and_key() {
        let props = single(ParameterDef::string("user_id", "User ID").required());
        let fields = single(ParameterDef::object("events", "Events", props).multiple());

        let err = validate(
            &fields,
            &raw(json!({"events": [{"user_id": "a"}, {"user_id": "b"}, {}]})),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::MissingRequiredField);
        assert_eq!(err.field(), "events[2].user_id");
    }

    #[rstest]
    #[case(json!(9_223_372_036_854_775_807_i64), Some(json!(i64::MAX)))]
    #[case(json!(-9.223_372_036_854_775_808e18), Some(json!(i64::MIN)))]
    #[case(json!(9.223_372_036_854_775_808e18), None)]
    #[case(json!(1.0e19), None)]
    fn integer_bounds(#[case] input: Value, #[case] expected: Option<Value>) {
        let fields = single(ParameterDef::new("n", "N", ParameterKind::Integer));
        let out = validate(&fields, &raw(json!({ "n": input })));
        match expected {
            Some(value) => assert_eq!(out.unwrap().get("n"), Some(&value)),
            None => assert_eq!(out.unwrap_err().kind(), ValidationErrorKind::TypeMismatch),
        }
    }

    #[test]
    fn nested_object_errors_carry_dotted_path() {
        let props = ParameterCollection::try_from_defs([
            ParameterDef::string("email", "Email").required(),
            ParameterDef::string("city", "City"),
        ])
        .unwrap();
        let fields = single(ParameterDef::object("user_data", "User Data", props));

        let err = validate(&fields, &raw(json!({"user_data": {"city": "Oslo"}}))).unwrap_err();
        assert_eq!(err.field(), "user_data.email");

        let out = validate(
            &fields,
            &raw(json!({"user_data": {"email": "a@b.c", "extra": 1}})),
        )
        .unwrap();
        assert_eq!(out.get("user_data"), Some(&json!({"email": "a@b.c"})));
    }

    #[test]
    fn free_form_object_passes_through() {
        let fields = single(ParameterDef::new("properties", "Properties", ParameterKind::Object));
        let input = json!({"properties": {"anything": [1, 2], "goes": null}});
        let out = validate(&fields, &raw(input)).unwrap();
        assert_eq!(
            out.get("properties"),
            Some(&json!({"anything": [1, 2], "goes": null}))
        );
    }
}

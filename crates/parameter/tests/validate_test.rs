use std::collections::BTreeSet;

use courier_parameter::prelude::*;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

// ---------------------------------------------------------------------------
// Shared definitions reused across collections
// ---------------------------------------------------------------------------

fn event_time() -> ParameterDef {
    ParameterDef::new("event_time", "Event Time", ParameterKind::Datetime)
        .with_description("A Unix timestamp in seconds or an ISO 8601 string.")
}

fn action_source() -> ParameterDef {
    ParameterDef::string("action_source", "Action Source").with_rule(ValidationRule::one_of([
        "email",
        "website",
        "app",
        "phone_call",
        "chat",
        "physical_store",
        "system_generated",
        "other",
    ]))
}

#[test]
fn shared_definition_overridden_per_collection() {
    let relaxed = ParameterCollection::new().try_with(event_time()).unwrap();
    let strict = ParameterCollection::new()
        .try_with(event_time().required())
        .unwrap();

    assert!(validate(&relaxed, &Map::new()).is_ok());
    let err = validate(&strict, &Map::new()).unwrap_err();
    assert_eq!(err.field(), "event_time");
}

#[test]
fn rule_violation_after_coercion() {
    let fields = ParameterCollection::new()
        .try_with(action_source().required())
        .unwrap();
    let mut raw = Map::new();
    raw.insert("action_source".into(), json!("carrier_pigeon"));

    let err = validate(&fields, &raw).unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::RuleViolation);
    assert_eq!(err.code(), "FIELD_RULE_VIOLATION");
}

#[test]
fn chained_conditions() {
    // `c` is required when `a` is true and `b` is not set.
    let fields = ParameterCollection::try_from_defs([
        ParameterDef::new("a", "A", ParameterKind::Boolean),
        ParameterDef::string("b", "B"),
        ParameterDef::string("c", "C").required_when(RuleSet::All {
            rules: vec![
                RuleSet::Single(Rule::new("a", Condition::IsTrue)),
                RuleSet::Single(Rule::new("b", Condition::IsNotSet)),
            ],
        }),
    ])
    .unwrap();
    fields.check().unwrap();

    let as_map = |v: Value| match v {
        Value::Object(m) => m,
        _ => unreachable!(),
    };

    assert!(validate(&fields, &as_map(json!({"a": "true"}))).is_err());
    assert!(validate(&fields, &as_map(json!({"a": true, "b": "x"}))).is_ok());
    assert!(validate(&fields, &as_map(json!({"a": false}))).is_ok());
    assert!(validate(&fields, &as_map(json!({"a": true, "c": "x"}))).is_ok());
}

#[test]
fn collection_round_trips_through_manifest_json() {
    let fields = ParameterCollection::try_from_defs([
        event_time().required(),
        action_source(),
        ParameterDef::string("ua", "User Agent")
            .required_when(RuleSet::equals("action_source", "website")),
    ])
    .unwrap();

    let manifest = serde_json::to_value(&fields).unwrap();
    assert_eq!(manifest[0]["key"], "event_time");
    assert_eq!(manifest[2]["required"]["mode"], "when");

    let back: ParameterCollection = serde_json::from_value(manifest).unwrap();
    assert_eq!(back, fields);
    back.check().unwrap();
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Field `i` is required when `required[i]`, has a default when `defaulted[i]`
/// and is present in the raw input when `present[i]` (required fields are
/// always present).
fn build(
    required: &[bool],
    defaulted: &[bool],
    present: &[bool],
) -> (ParameterCollection, Map<String, Value>, BTreeSet<String>) {
    let mut fields = ParameterCollection::new();
    let mut raw = Map::new();
    let mut expected = BTreeSet::new();

    for i in 0..required.len() {
        let key = format!("field_{i}");
        let mut def = ParameterDef::string(key.clone(), key.clone());
        if required[i] {
            def = def.required();
        } else if defaulted[i] {
            def = def.with_default(format!("default_{i}"));
        }
        fields.try_add(def).unwrap();

        if required[i] || present[i] {
            raw.insert(key.clone(), json!(format!("value_{i}")));
            expected.insert(key);
        } else if defaulted[i] {
            expected.insert(key);
        }
    }
    raw.insert("undeclared".into(), json!(true));

    (fields, raw, expected)
}

proptest! {
    #[test]
    fn payload_has_exactly_present_fields_plus_defaults(
        flags in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..12)
    ) {
        let required: Vec<bool> = flags.iter().map(|f| f.0).collect();
        let defaulted: Vec<bool> = flags.iter().map(|f| f.1).collect();
        let present: Vec<bool> = flags.iter().map(|f| f.2).collect();
        let (fields, raw, expected) = build(&required, &defaulted, &present);

        let payload = validate(&fields, &raw).unwrap();
        let keys: BTreeSet<String> = payload.keys().map(str::to_owned).collect();
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn missing_required_field_is_named(
        len in 1usize..10,
        missing in 0usize..10,
    ) {
        let missing = missing % len;
        let required = vec![true; len];
        let (fields, mut raw, _) = build(&required, &vec![false; len], &vec![true; len]);
        let missing_key = format!("field_{missing}");
        raw.remove(&missing_key);

        let err = validate(&fields, &raw).unwrap_err();
        prop_assert_eq!(err.kind(), ValidationErrorKind::MissingRequiredField);
        prop_assert_eq!(err.field(), missing_key.as_str());
    }
}

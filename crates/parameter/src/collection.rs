use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::def::ParameterDef;
use crate::error::SchemaError;
use crate::validate::{check_rules, coerce};

/// An ordered collection of field definitions.
///
/// Order is significant: validation walks fields in declaration order and a
/// conditional requiredness rule can only see fields declared before it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterCollection {
    parameters: Vec<ParameterDef>,
}

impl ParameterCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, rejecting a key that is already present.
    pub fn try_add(&mut self, param: ParameterDef) -> Result<&mut Self, SchemaError> {
        if self.contains(param.key()) {
            return Err(SchemaError::DuplicateKey {
                key: param.key().to_owned(),
            });
        }
        self.parameters.push(param);
        Ok(self)
    }

    /// Add a field (builder-style, consuming), rejecting duplicates.
    pub fn try_with(mut self, param: ParameterDef) -> Result<Self, SchemaError> {
        self.try_add(param)?;
        Ok(self)
    }

    /// Build a collection from definitions, rejecting duplicate keys.
    pub fn try_from_defs(
        params: impl IntoIterator<Item = ParameterDef>,
    ) -> Result<Self, SchemaError> {
        params
            .into_iter()
            .try_fold(Self::new(), |col, param| col.try_with(param))
    }

    /// Check whether a field with the given key exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.parameters.iter().any(|p| p.key() == key)
    }

    /// Iterate over all field keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(ParameterDef::key)
    }

    /// The number of fields in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterate over all field definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterDef> {
        self.parameters.iter()
    }

    /// Verify the collection can be used for validation.
    ///
    /// Rejects duplicate keys (possible through deserialization), rules that
    /// depend on a field not declared earlier in the same collection, regex
    /// rules that do not compile, and defaults that do not coerce into their
    /// field's kind or break the field's own rules. Nested `object` properties are checked recursively.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.parameters.len());

        for param in &self.parameters {
            let key = param.key();

            for dependency in param.dependencies() {
                if !seen.contains(dependency.as_str()) {
                    return Err(SchemaError::ForwardReference {
                        key: key.to_owned(),
                        dependency,
                    });
                }
            }

            for rule in &param.validation {
                rule.check_definition(key)?;
            }

            if let Some(default) = &param.default {
                coerce(param, default)
                    .and_then(|coerced| check_rules(param, &coerced))
                    .map_err(|e| SchemaError::InvalidDefault {
                        key: key.to_owned(),
                        reason: e.to_string(),
                    })?;
            }

            param.properties.check()?;

            if !seen.insert(key) {
                return Err(SchemaError::DuplicateKey {
                    key: key.to_owned(),
                });
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a ParameterCollection {
    type Item = &'a ParameterDef;
    type IntoIter = std::slice::Iter<'a, ParameterDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

impl IntoIterator for ParameterCollection {
    type Item = ParameterDef;
    type IntoIter = std::vec::IntoIter<ParameterDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::RuleSet;
    use crate::kind::ParameterKind;
    use crate::validation::ValidationRule;

    #[test]
    fn new_is_empty() {
        let col = ParameterCollection::new();
        assert!(col.is_empty());
        assert_eq!(col.len(), 0);
    }

    #[test]
    fn try_add_rejects_duplicates() {
        let mut col = ParameterCollection::new();
        col.try_add(ParameterDef::string("a", "A")).unwrap();
        let err = col.try_add(ParameterDef::number("a", "A again")).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateKey { key: "a".into() });
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn keys_in_declaration_order() {
        let col = ParameterCollection::try_from_defs([
            ParameterDef::string("z", "Z"),
            ParameterDef::string("a", "A"),
        ])
        .unwrap();
        assert_eq!(col.keys().collect::<Vec<_>>(), vec!["z", "a"]);
    }

    #[test]
    fn check_accepts_backward_reference() {
        let col = ParameterCollection::try_from_defs([
            ParameterDef::string("action_source", "Action Source"),
            ParameterDef::string("user_agent", "User Agent")
                .required_when(RuleSet::equals("action_source", "website")),
        ])
        .unwrap();
        assert!(col.check().is_ok());
    }

    #[test]
    fn check_rejects_forward_reference() {
        let col = ParameterCollection::try_from_defs([
            ParameterDef::string("user_agent", "User Agent")
                .required_when(RuleSet::equals("action_source", "website")),
            ParameterDef::string("action_source", "Action Source"),
        ])
        .unwrap();
        assert_eq!(
            col.check().unwrap_err(),
            SchemaError::ForwardReference {
                key: "user_agent".into(),
                dependency: "action_source".into(),
            }
        );
    }

    #[test]
    fn check_rejects_bad_pattern_in_nested_property() {
        let inner = ParameterCollection::new()
            .try_with(ParameterDef::string("zip", "Zip").with_rule(ValidationRule::pattern("[")))
            .unwrap();
        let col = ParameterCollection::new()
            .try_with(ParameterDef::object("user_data", "User Data", inner))
            .unwrap();
        assert_eq!(col.check().unwrap_err().code(), "SCHEMA_INVALID_PATTERN");
    }

    #[test]
    fn check_rejects_default_of_wrong_kind() {
        let col = ParameterCollection::new()
            .try_with(
                ParameterDef::new("count", "Count", ParameterKind::Integer).with_default("many"),
            )
            .unwrap();
        assert_eq!(col.check().unwrap_err().code(), "SCHEMA_INVALID_DEFAULT");
    }

    #[test]
    fn check_rejects_default_breaking_its_rules() {
        let col = ParameterCollection::try_from_defs([
            ParameterDef::string("action_source", "Action Source")
                .with_rule(ValidationRule::one_of(["website", "email"]))
                .with_default("phone_call"),
            ParameterDef::number("value", "Value").with_rule(ValidationRule::min(0.0)),
        ])
        .unwrap();
        let err = col.check().unwrap_err();
        assert_eq!(err.code(), "SCHEMA_INVALID_DEFAULT");
        assert!(err.to_string().contains("action_source"));

        let ok = ParameterCollection::new()
            .try_with(
                ParameterDef::number("value", "Value")
                    .with_rule(ValidationRule::min(0.0))
                    .with_default(0),
            )
            .unwrap();
        assert!(ok.check().is_ok());
    }

    #[test]
    fn deserialized_duplicates_caught_by_check() {
        let col: ParameterCollection = serde_json::from_value(serde_json::json!([
            {"key": "a", "label": "A", "type": "string"},
            {"key": "a", "label": "A", "type": "number"}
        ]))
        .unwrap();
        assert_eq!(col.check().unwrap_err().code(), "SCHEMA_DUPLICATE_KEY");
    }
}

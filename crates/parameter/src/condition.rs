use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::values::ParameterValues;

/// A condition checked against the value of one sibling field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum Condition {
    /// Field value equals the given value.
    Equals { value: Value },
    /// Field value does not equal the given value.
    NotEquals { value: Value },
    /// Field has a value (present and not null).
    IsSet,
    /// Field is missing or null.
    IsNotSet,
    /// Field value is one of the given values.
    OneOf { values: Vec<Value> },
    /// Field value is boolean true.
    IsTrue,
    /// Field value is boolean false.
    IsFalse,
}

impl Condition {
    /// Evaluate this condition against a concrete value.
    ///
    /// A missing field is evaluated as `Value::Null`.
    #[must_use]
    pub fn evaluate(&self, value: &Value) -> bool {
        match self {
            Self::Equals { value: expected } => value == expected,
            Self::NotEquals { value: expected } => value != expected,
            Self::IsSet => !value.is_null(),
            Self::IsNotSet => value.is_null(),
            Self::OneOf { values } => values.contains(value),
            Self::IsTrue => value.as_bool() == Some(true),
            Self::IsFalse => value.as_bool() == Some(false),
        }
    }
}

/// A single rule: check a named sibling field against a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// The sibling field key to check.
    pub field: String,
    /// The condition to evaluate against that field's value.
    pub condition: Condition,
}

impl Rule {
    /// Build a rule for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, condition: Condition) -> Self {
        Self {
            field: field.into(),
            condition,
        }
    }

    /// Evaluate this rule against the values validated so far.
    #[must_use]
    pub fn evaluate(&self, values: &ParameterValues) -> bool {
        let value = values.get(&self.field).unwrap_or(&Value::Null);
        self.condition.evaluate(value)
    }
}

/// Composable predicate over sibling fields: combine rules with AND, OR, NOT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "logic", rename_all = "snake_case")]
pub enum RuleSet {
    /// A single rule.
    Single(Rule),
    /// All nested rules must match.
    All { rules: Vec<RuleSet> },
    /// At least one nested rule must match.
    Any { rules: Vec<RuleSet> },
    /// Negates the nested rule.
    Not { rule: Box<RuleSet> },
}

impl RuleSet {
    /// Shorthand for a single `field == value` rule.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Single(Rule::new(
            field,
            Condition::Equals {
                value: value.into(),
            },
        ))
    }

    /// Shorthand for a single "field is present" rule.
    #[must_use]
    pub fn is_set(field: impl Into<String>) -> Self {
        Self::Single(Rule::new(field, Condition::IsSet))
    }

    /// Evaluate the rule set against the values validated so far.
    #[must_use]
    pub fn evaluate(&self, values: &ParameterValues) -> bool {
        match self {
            Self::Single(rule) => rule.evaluate(values),
            Self::All { rules } => rules.iter().all(|r| r.evaluate(values)),
            Self::Any { rules } => rules.iter().any(|r| r.evaluate(values)),
            Self::Not { rule } => !rule.evaluate(values),
        }
    }

    /// Collect all field names referenced by this rule set.
    #[must_use]
    pub fn dependencies(&self) -> Vec<String> {
        let mut deps = Vec::new();
        self.collect_dependencies(&mut deps);
        deps.sort();
        deps.dedup();
        deps
    }

    fn collect_dependencies(&self, deps: &mut Vec<String>) {
        match self {
            Self::Single(rule) => deps.push(rule.field.clone()),
            Self::All { rules } | Self::Any { rules } => {
                for r in rules {
                    r.collect_dependencies(deps);
                }
            }
            Self::Not { rule } => rule.collect_dependencies(deps),
        }
    }
}

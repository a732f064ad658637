use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SchemaError, ValidationError};

/// Regex source text, compiled on first use and reused afterwards.
///
/// Serializes as the plain source string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegexPattern {
    source: String,
    #[serde(skip)]
    compiled: OnceLock<Result<Regex, regex::Error>>,
}

impl RegexPattern {
    /// Wrap regex source text without compiling it.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            compiled: OnceLock::new(),
        }
    }

    /// The source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled regex.
    pub fn regex(&self) -> Result<&Regex, &regex::Error> {
        self.compiled
            .get_or_init(|| Regex::new(&self.source))
            .as_ref()
    }
}

impl PartialEq for RegexPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for RegexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// A declarative validation rule that can be attached to a field.
///
/// Rules run after the value has been coerced into its declared kind. A rule
/// that does not apply to the value's shape (e.g. `min_length` on a number)
/// passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
    /// String must be at least `length` characters.
    MinLength {
        length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// String must be at most `length` characters.
    MaxLength {
        length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// String must match the given regex pattern.
    Pattern {
        pattern: RegexPattern,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Numeric value must be >= `value`.
    Min {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Numeric value must be <= `value`.
    Max {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must be one of the given allowed values.
    OneOf {
        values: Vec<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ValidationRule {
    /// Require a minimum string length.
    #[must_use]
    pub fn min_length(length: usize) -> Self {
        Self::MinLength {
            length,
            message: None,
        }
    }

    /// Require a maximum string length.
    #[must_use]
    pub fn max_length(length: usize) -> Self {
        Self::MaxLength {
            length,
            message: None,
        }
    }

    /// Require a string to match a regex pattern.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: RegexPattern::new(pattern),
            message: None,
        }
    }

    /// Require a numeric minimum (inclusive).
    #[must_use]
    pub fn min(value: f64) -> Self {
        Self::Min {
            value,
            message: None,
        }
    }

    /// Require a numeric maximum (inclusive).
    #[must_use]
    pub fn max(value: f64) -> Self {
        Self::Max {
            value,
            message: None,
        }
    }

    /// Require the value to be one of `values`.
    #[must_use]
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::OneOf {
            values: values.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Attach a custom failure message.
    #[must_use]
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match &mut self {
            Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::Pattern { message, .. }
            | Self::Min { message, .. }
            | Self::Max { message, .. }
            | Self::OneOf { message, .. } => *message = text,
        }
        self
    }

    fn message(&self) -> Option<&str> {
        match self {
            Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::Pattern { message, .. }
            | Self::Min { message, .. }
            | Self::Max { message, .. }
            | Self::OneOf { message, .. } => message.as_deref(),
        }
    }

    /// Confirm the rule itself is well-formed.
    pub(crate) fn check_definition(&self, key: &str) -> Result<(), SchemaError> {
        if let Self::Pattern { pattern, .. } = self {
            pattern.regex().map_err(|e| SchemaError::InvalidPattern {
                key: key.to_owned(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Check a coerced value against this rule.
    pub fn check(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let failure = match (self, value) {
            (Self::MinLength { length, .. }, Value::String(s)) if s.chars().count() < *length => {
                Some(format!("must be at least {length} characters"))
            }
            (Self::MaxLength { length, .. }, Value::String(s)) if s.chars().count() > *length => {
                Some(format!("must be at most {length} characters"))
            }
            (Self::Pattern { pattern, .. }, Value::String(s)) => match pattern.regex() {
                Ok(re) if re.is_match(s) => None,
                Ok(_) => Some(format!("must match pattern `{pattern}`")),
                Err(e) => Some(format!("pattern `{pattern}` is invalid: {e}")),
            },
            (Self::Min { value: min, .. }, Value::Number(n)) => n
                .as_f64()
                .filter(|v| v < min)
                .map(|_| format!("must be >= {min}")),
            (Self::Max { value: max, .. }, Value::Number(n)) => n
                .as_f64()
                .filter(|v| v > max)
                .map(|_| format!("must be <= {max}")),
            (Self::OneOf { values, .. }, v) if !values.contains(v) => {
                Some(format!("{v} is not an accepted value"))
            }
            _ => None,
        };

        match failure {
            None => Ok(()),
            Some(reason) => Err(ValidationError::RuleViolation {
                field: field.to_owned(),
                reason: self.message().map_or(reason, str::to_owned),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ValidationRule::min_length(3), json!("ab"), false)]
    #[case(ValidationRule::min_length(3), json!("abc"), true)]
    #[case(ValidationRule::max_length(2), json!("abc"), false)]
    #[case(ValidationRule::max_length(2), json!("äö"), true)]
    #[case(ValidationRule::pattern(r"^\d{5}$"), json!("12345"), true)]
    #[case(ValidationRule::pattern(r"^\d{5}$"), json!("1234a"), false)]
    #[case(ValidationRule::min(0.0), json!(-1), false)]
    #[case(ValidationRule::min(0.0), json!(0), true)]
    #[case(ValidationRule::max(10.0), json!(10.5), false)]
    #[case(ValidationRule::one_of(["website", "email"]), json!("email"), true)]
    #[case(ValidationRule::one_of(["website", "email"]), json!("chat"), false)]
    fn rule_outcomes(#[case] rule: ValidationRule, #[case] value: Value, #[case] ok: bool) {
        assert_eq!(rule.check("f", &value).is_ok(), ok);
    }

    #[test]
    fn shape_mismatch_passes() {
        assert!(ValidationRule::min_length(5).check("f", &json!(1)).is_ok());
        assert!(ValidationRule::min(5.0).check("f", &json!("1")).is_ok());
    }

    #[test]
    fn custom_message_replaces_default() {
        let rule = ValidationRule::min_length(3).with_message("too short");
        let err = rule.check("name", &json!("a")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RuleViolation {
                field: "name".into(),
                reason: "too short".into(),
            }
        );
    }

    #[test]
    fn invalid_pattern_is_a_schema_error() {
        let rule = ValidationRule::pattern("(unclosed");
        let err = rule.check_definition("zip").unwrap_err();
        assert_eq!(err.code(), "SCHEMA_INVALID_PATTERN");
    }

    #[test]
    fn pattern_compiles_once() {
        let rule = ValidationRule::pattern(r"^[A-Z]{3}$");
        let ValidationRule::Pattern { pattern, .. } = &rule else {
            panic!("expected a pattern rule");
        };
        let first: *const Regex = pattern.regex().unwrap();

        assert!(rule.check("currency", &json!("USD")).is_ok());
        assert!(rule.check("currency", &json!("usd")).is_err());
        let again: *const Regex = pattern.regex().unwrap();
        assert!(std::ptr::eq(first, again));
    }

    #[test]
    fn pattern_serializes_as_source() {
        let rule = ValidationRule::pattern(r"^\d+$").with_message("digits only");
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["pattern"], r"^\d+$");

        let back: ValidationRule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
        assert!(back.check("zip", &json!("0042")).is_ok());
        assert!(back.check("zip", &json!("42a")).is_err());
    }

    #[test]
    fn serde_shape() {
        let rule = ValidationRule::MinLength {
            length: 5,
            message: Some("too short".into()),
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["rule"], "min_length");
        assert_eq!(json["length"], 5);

        let back: ValidationRule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::ParameterCollection;
use crate::condition::RuleSet;
use crate::kind::ParameterKind;
use crate::metadata::ParameterMetadata;
use crate::validation::ValidationRule;

/// Whether a field must be present in the raw input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Requiredness {
    /// The field may be omitted.
    #[default]
    Optional,
    /// The field must always be present.
    Always,
    /// The field must be present when the rule set matches the fields
    /// validated before it.
    When { rules: RuleSet },
}

impl Requiredness {
    /// Whether this requiredness can ever demand a value.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional)
    }
}

/// The declaration of one input field.
///
/// Definitions are immutable values. Sharing one between actions means
/// cloning it; tweaking it for one action (for example making a shared
/// `event_time` field required) goes through the consuming `with_*` /
/// [`required`](Self::required) builders, which return a new definition and
/// leave the original untouched.
///
/// ```
/// use courier_parameter::prelude::*;
///
/// let event_time = ParameterDef::new("event_time", "Event Time", ParameterKind::Datetime);
/// let strict = event_time.clone().required();
///
/// assert!(!event_time.is_required_unconditionally());
/// assert!(strict.is_required_unconditionally());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDef {
    #[serde(flatten)]
    pub metadata: ParameterMetadata,

    #[serde(rename = "type")]
    pub kind: ParameterKind,

    #[serde(default, skip_serializing_if = "Requiredness::is_optional")]
    pub required: Requiredness,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// The value is an array of `kind` elements.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,

    /// Declared sub-fields of an `object` field.
    #[serde(default, skip_serializing_if = "ParameterCollection::is_empty")]
    pub properties: ParameterCollection,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,

    /// Whether the value must be masked in manifests and logs.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
}

impl ParameterDef {
    /// Create an optional field of the given kind.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            metadata: ParameterMetadata::new(key, label),
            kind,
            required: Requiredness::Optional,
            default: None,
            multiple: false,
            properties: ParameterCollection::new(),
            validation: Vec::new(),
            sensitive: kind.is_sensitive(),
        }
    }

    /// Shorthand for a `string` field.
    #[must_use]
    pub fn string(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ParameterKind::String)
    }

    /// Shorthand for a `number` field.
    #[must_use]
    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ParameterKind::Number)
    }

    /// Shorthand for an `object` field with declared properties.
    #[must_use]
    pub fn object(
        key: impl Into<String>,
        label: impl Into<String>,
        properties: ParameterCollection,
    ) -> Self {
        let mut def = Self::new(key, label, ParameterKind::Object);
        def.properties = properties;
        def
    }

    /// The unique key identifying this field.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.metadata.key
    }

    /// The human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.metadata.label
    }

    /// Whether the field is required regardless of sibling values.
    #[must_use]
    pub fn is_required_unconditionally(&self) -> bool {
        matches!(self.required, Requiredness::Always)
    }

    /// Copy of this definition that is always required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = Requiredness::Always;
        self
    }

    /// Copy of this definition that is optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = Requiredness::Optional;
        self
    }

    /// Copy of this definition that is required only when `rules` match.
    #[must_use]
    pub fn required_when(mut self, rules: RuleSet) -> Self {
        self.required = Requiredness::When { rules };
        self
    }

    /// Copy with a default used when the field is absent.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Copy with a different label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.metadata.label = label.into();
        self
    }

    /// Copy with a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    /// Copy that accepts an array of values.
    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Copy with an extra validation rule.
    #[must_use]
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }

    /// Copy flagged as sensitive.
    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Keys of sibling fields this definition's requiredness depends on.
    #[must_use]
    pub fn dependencies(&self) -> Vec<String> {
        match &self.required {
            Requiredness::When { rules } => rules.dependencies(),
            _ => Vec::new(),
        }
    }
}

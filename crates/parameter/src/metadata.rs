use serde::{Deserialize, Serialize};

/// Descriptive metadata attached to every field definition.
///
/// This is the human-facing information shown to integration users. It is
/// separate from the field's type and requiredness semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    /// Unique key identifying this field within its parent collection.
    pub key: String,

    /// Human-readable label.
    pub label: String,

    /// Longer description shown as help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterMetadata {
    /// Create metadata with the required key and label.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            ..Self::default()
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared type of a field, determining how raw input is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Single-line string.
    String,
    /// Multi-line string; same coercion as [`ParameterKind::String`].
    Text,
    /// Any finite number.
    Number,
    /// A whole number.
    Integer,
    /// `true` / `false`.
    Boolean,
    /// RFC 3339 timestamp string or unix seconds.
    Datetime,
    /// JSON object, optionally with declared properties.
    Object,
    /// String value that must never be logged.
    Password,
}

impl ParameterKind {
    /// The wire name of this kind, as used in manifests and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
            Self::Object => "object",
            Self::Password => "password",
        }
    }

    /// Whether values of this kind are stored as strings after coercion.
    #[must_use]
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::String | Self::Text | Self::Password)
    }

    /// Whether values of this kind are sensitive by default.
    #[must_use]
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::Password)
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::fmt;

/// Structural failure of a raw input against a field collection.
///
/// Validation is fail-fast: the first failing field in declaration order is
/// reported and no further fields are inspected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// A required field (unconditionally or by a matching rule) is absent.
    #[error("missing value for required field `{field}`")]
    MissingRequiredField { field: String },

    /// The value cannot be coerced into the declared kind.
    #[error("invalid type for `{field}`: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// The value has the right type but breaks a declarative rule.
    #[error("validation failed for `{field}`: {reason}")]
    RuleViolation { field: String, reason: String },
}

/// Discriminant of [`ValidationError`] for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    MissingRequiredField,
    TypeMismatch,
    RuleViolation,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::TypeMismatch => "type_mismatch",
            Self::RuleViolation => "rule_violation",
        })
    }
}

impl ValidationError {
    /// The error discriminant.
    #[must_use]
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::MissingRequiredField { .. } => ValidationErrorKind::MissingRequiredField,
            Self::TypeMismatch { .. } => ValidationErrorKind::TypeMismatch,
            Self::RuleViolation { .. } => ValidationErrorKind::RuleViolation,
        }
    }

    /// Path of the offending field, e.g. `user_data.email` or `events[2].user_id`.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequiredField { field }
            | Self::TypeMismatch { field, .. }
            | Self::RuleViolation { field, .. } => field,
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { .. } => "FIELD_MISSING",
            Self::TypeMismatch { .. } => "FIELD_TYPE_MISMATCH",
            Self::RuleViolation { .. } => "FIELD_RULE_VIOLATION",
        }
    }

    /// Prefix the field path with a parent path (`parent.child`, `items[1].child`).
    #[must_use]
    pub(crate) fn nested_under(self, parent: &str) -> Self {
        let join = |field: String| format!("{parent}.{field}");
        match self {
            Self::MissingRequiredField { field } => Self::MissingRequiredField {
                field: join(field),
            },
            Self::TypeMismatch {
                field,
                expected,
                actual,
            } => Self::TypeMismatch {
                field: join(field),
                expected,
                actual,
            },
            Self::RuleViolation { field, reason } => Self::RuleViolation {
                field: join(field),
                reason,
            },
        }
    }

    /// Whether the same input could succeed on retry. Always `false`:
    /// validation is deterministic.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// A field collection that cannot be used as declared.
///
/// Raised while an action is being defined or registered, never during a
/// dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// Two fields in the same collection share a key.
    #[error("field already exists: `{key}`")]
    DuplicateKey { key: String },

    /// A conditional rule refers to a field not declared before it.
    #[error("field `{key}` depends on `{dependency}`, which is not declared before it")]
    ForwardReference { key: String, dependency: String },

    /// A `pattern` rule does not compile.
    #[error("invalid pattern for `{key}`: {reason}")]
    InvalidPattern { key: String, reason: String },

    /// The default value does not satisfy the field's own declaration.
    #[error("invalid default for `{key}`: {reason}")]
    InvalidDefault { key: String, reason: String },
}

impl SchemaError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => "SCHEMA_DUPLICATE_KEY",
            Self::ForwardReference { .. } => "SCHEMA_FORWARD_REFERENCE",
            Self::InvalidPattern { .. } => "SCHEMA_INVALID_PATTERN",
            Self::InvalidDefault { .. } => "SCHEMA_INVALID_DEFAULT",
        }
    }
}

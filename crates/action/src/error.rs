use courier_parameter::error::{SchemaError, ValidationError};
use http::StatusCode;

use crate::endpoint::EndpointError;

/// Reason attached to business-rule violations on a single field.
pub const MISCONFIGURED_FIELD: &str = "Misconfigured required field";

/// Error type for everything that can go wrong while dispatching one event.
///
/// Every variant is returned to the caller of
/// [`ActionRegistry::dispatch`](crate::registry::ActionRegistry::dispatch).
/// Only [`Transport`](Self::Transport) failures are ever candidates for a
/// retry, and the engine itself never retries.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ActionError {
    /// The raw event failed structural validation against the field schema.
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    /// `perform` rejected the payload on a business rule.
    #[error("integration: {0}")]
    Integration(#[from] IntegrationError),

    /// The request capability failed. Passed through as-is.
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    /// Destination settings could not be read into the action's settings type.
    #[error("invalid settings: {reason}")]
    Settings {
        /// Why deserialization failed.
        reason: String,
    },

    /// The validated payload could not be read into the action's payload type,
    /// or the raw event was not a mapping at all.
    #[error("invalid payload: {reason}")]
    Payload {
        /// Why the payload was rejected.
        reason: String,
    },

    /// No action is registered under this destination and action slug.
    #[error("unknown action `{action}` for destination `{destination}`")]
    UnknownAction {
        /// Destination slug that was requested.
        destination: String,
        /// Action slug that was requested.
        action: String,
    },
}

impl ActionError {
    /// Create a settings error.
    pub fn settings(reason: impl Into<String>) -> Self {
        Self::Settings {
            reason: reason.into(),
        }
    }

    /// Create a payload error.
    pub fn payload(reason: impl Into<String>) -> Self {
        Self::Payload {
            reason: reason.into(),
        }
    }

    /// Create an unknown-action error.
    pub fn unknown_action(destination: impl Into<String>, action: impl Into<String>) -> Self {
        Self::UnknownAction {
            destination: destination.into(),
            action: action.into(),
        }
    }

    /// Returns `true` if the caller may retry the same event later.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Returns `true` if resending the same event can never succeed.
    pub fn is_fatal(&self) -> bool {
        !self.is_retryable()
    }

    /// Returns `true` if the failure happened before any request was sent.
    pub fn is_pre_request(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }

    /// HTTP-style status for classification, when the error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Integration(e) => Some(e.status()),
            Self::Transport(TransportError::Status { status, .. }) => Some(*status),
            Self::Validation(_) | Self::Settings { .. } | Self::Payload { .. } => {
                Some(StatusCode::BAD_REQUEST)
            }
            _ => None,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.code(),
            Self::Integration(_) => "INTEGRATION_ERROR",
            Self::Transport(e) => e.code(),
            Self::Settings { .. } => "INVALID_SETTINGS",
            Self::Payload { .. } => "INVALID_PAYLOAD",
            Self::UnknownAction { .. } => "UNKNOWN_ACTION",
        }
    }
}

/// Business-rule violation detected inside `perform`, before any request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct IntegrationError {
    message: String,
    reason: String,
    status: StatusCode,
}

impl IntegrationError {
    /// Create an integration error with an explicit reason and status.
    pub fn new(message: impl Into<String>, reason: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            reason: reason.into(),
            status,
        }
    }

    /// A field value that is present but unacceptable (status 400).
    ///
    /// ```
    /// use courier_action::error::{IntegrationError, MISCONFIGURED_FIELD};
    ///
    /// let err = IntegrationError::misconfigured_field("XYZ is not a valid currency code.");
    /// assert_eq!(err.reason(), MISCONFIGURED_FIELD);
    /// assert_eq!(err.status().as_u16(), 400);
    /// ```
    pub fn misconfigured_field(message: impl Into<String>) -> Self {
        Self::new(message, MISCONFIGURED_FIELD, StatusCode::BAD_REQUEST)
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Machine-checkable reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Status used by callers to classify the failure.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Failure reported by a [`RequestClient`](crate::request::RequestClient).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection could not be established or was interrupted.
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The remote answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Response body, as text.
        body: String,
    },

    /// The request could not be built or encoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Returns `true` for network failures, timeouts, 429 and 5xx responses.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Self::InvalidRequest(_) => false,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "TRANSPORT_NETWORK",
            Self::Timeout => "TRANSPORT_TIMEOUT",
            Self::Status { .. } => "TRANSPORT_STATUS",
            Self::InvalidRequest(_) => "TRANSPORT_INVALID_REQUEST",
        }
    }
}

/// Configuration error raised while populating an
/// [`ActionRegistry`](crate::registry::ActionRegistry).
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The `(destination, action)` pair is already registered.
    #[error("action `{action}` is already registered for destination `{destination}`")]
    DuplicateAction {
        /// Destination slug.
        destination: String,
        /// Action slug.
        action: String,
    },

    /// A destination with this slug is already registered.
    #[error("destination `{destination}` is already registered")]
    DuplicateDestination {
        /// Destination slug.
        destination: String,
    },

    /// The action's field schema is inconsistent.
    #[error("invalid field schema for `{destination}.{action}`: {source}")]
    InvalidSchema {
        /// Destination slug.
        destination: String,
        /// Action slug.
        action: String,
        /// Underlying schema problem.
        #[source]
        source: SchemaError,
    },

    /// A destination's endpoint table is incomplete or malformed.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    /// A destination's field schema could not be assembled.
    #[error("failed to build field schema: {0}")]
    Schema(#[from] SchemaError),
}

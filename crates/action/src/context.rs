use std::fmt;

use crate::error::ActionError;
use crate::request::{HttpRequest, HttpResponse, RequestClient};

/// Everything one `perform` call may use: the destination settings, the
/// validated payload and the request capability.
///
/// Built fresh for every dispatch and dropped when `perform` returns. There
/// is no other way for an action to reach configuration or the network.
pub struct ExecutionContext<'a, S, P> {
    settings: S,
    payload: P,
    request: &'a dyn RequestClient,
}

impl<'a, S, P> ExecutionContext<'a, S, P> {
    /// Assemble a context.
    pub fn new(settings: S, payload: P, request: &'a dyn RequestClient) -> Self {
        Self {
            settings,
            payload,
            request,
        }
    }

    /// Destination settings.
    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Validated payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Issue the outbound request. Transport failures are returned unchanged
    /// inside [`ActionError::Transport`].
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ActionError> {
        tracing::debug!(method = %request.method(), host = ?request.url().host_str(), "sending request");
        Ok(self.request.send(request).await?)
    }
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Debug for ExecutionContext<'_, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("settings", &self.settings)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

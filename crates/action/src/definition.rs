use async_trait::async_trait;
use courier_parameter::collection::ParameterCollection;
use serde::de::DeserializeOwned;

use crate::context::ExecutionContext;
use crate::error::ActionError;
use crate::metadata::ActionMetadata;
use crate::request::HttpResponse;

/// A typed destination action.
///
/// The engine validates the raw event against [`fields`](Self::fields),
/// deserializes the result into [`Payload`](Self::Payload), deserializes the
/// destination settings into [`Settings`](Self::Settings) and calls
/// [`perform`](Self::perform). Implementations hold no per-call state; one
/// instance serves every concurrent dispatch.
///
/// `perform` runs business checks first and returns an
/// [`IntegrationError`](crate::error::IntegrationError) without touching the
/// network when one fails. Otherwise it sends exactly one request through
/// [`ExecutionContext::send`].
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use courier_action::prelude::*;
/// use courier_parameter::prelude::*;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Settings { endpoint: url::Url }
///
/// #[derive(Deserialize)]
/// struct Payload { name: String }
///
/// struct Ping { meta: ActionMetadata, fields: ParameterCollection }
///
/// #[async_trait]
/// impl ActionDefinition for Ping {
///     type Settings = Settings;
///     type Payload = Payload;
///
///     fn metadata(&self) -> &ActionMetadata { &self.meta }
///     fn fields(&self) -> &ParameterCollection { &self.fields }
///
///     async fn perform(
///         &self,
///         ctx: ExecutionContext<'_, Settings, Payload>,
///     ) -> Result<HttpResponse, ActionError> {
///         let body = serde_json::json!({ "name": ctx.payload().name });
///         ctx.send(HttpRequest::post(ctx.settings().endpoint.clone()).json(body)).await
///     }
/// }
/// ```
#[async_trait]
pub trait ActionDefinition: Send + Sync + 'static {
    /// Destination-scoped configuration read by this action.
    type Settings: DeserializeOwned + Send + Sync;

    /// Typed view of the validated payload.
    type Payload: DeserializeOwned + Send + Sync;

    /// Static description.
    fn metadata(&self) -> &ActionMetadata;

    /// Field schema the raw event is validated against.
    fn fields(&self) -> &ParameterCollection;

    /// Apply business rules and send the request.
    async fn perform(
        &self,
        ctx: ExecutionContext<'_, Self::Settings, Self::Payload>,
    ) -> Result<HttpResponse, ActionError>;
}

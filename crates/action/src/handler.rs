//! Type-erased handler stored in the registry.
//!
//! Action authors implement [`ActionDefinition`](crate::definition::ActionDefinition)
//! and never this trait directly; the registry wraps them in a
//! [`DefinitionAdapter`](crate::adapters::DefinitionAdapter).

use async_trait::async_trait;
use courier_parameter::collection::ParameterCollection;
use serde_json::Value;

use crate::error::ActionError;
use crate::metadata::ActionMetadata;
use crate::request::{HttpResponse, RequestClient};

/// JSON-in, response-out view of an action.
#[async_trait]
pub trait ActionHandler: Send + Sync + 'static {
    /// Validate `raw`, read `settings`, and perform the action.
    async fn execute(
        &self,
        raw: &Value,
        settings: &Value,
        request: &dyn RequestClient,
    ) -> Result<HttpResponse, ActionError>;

    /// The action's static metadata.
    fn metadata(&self) -> &ActionMetadata;

    /// The action's field schema.
    fn fields(&self) -> &ParameterCollection;
}

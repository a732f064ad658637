//! Adapter for [`ActionDefinition`] to [`ActionHandler`].

use std::sync::Arc;

use async_trait::async_trait;
use courier_parameter::collection::ParameterCollection;
use courier_parameter::validate::validate;
use serde_json::Value;

use crate::context::ExecutionContext;
use crate::definition::ActionDefinition;
use crate::error::ActionError;
use crate::handler::ActionHandler;
use crate::metadata::ActionMetadata;
use crate::request::{HttpResponse, RequestClient};

/// Wraps a typed [`ActionDefinition`] as an [`ActionHandler`].
///
/// 1. Requires the raw event to be a JSON object
/// 2. Validates it against `fields()`, producing the payload values
/// 3. Deserializes the payload values into `A::Payload`
/// 4. Deserializes the settings into `A::Settings`
/// 5. Builds an [`ExecutionContext`] and calls `perform()`
pub struct DefinitionAdapter<A> {
    action: Arc<A>,
}

impl<A> DefinitionAdapter<A> {
    /// Wrap an action definition.
    pub fn new(action: A) -> Self {
        Self {
            action: Arc::new(action),
        }
    }
}

#[async_trait]
impl<A: ActionDefinition> ActionHandler for DefinitionAdapter<A> {
    async fn execute(
        &self,
        raw: &Value,
        settings: &Value,
        request: &dyn RequestClient,
    ) -> Result<HttpResponse, ActionError> {
        let Value::Object(raw) = raw else {
            return Err(ActionError::payload(format!(
                "event must be a JSON object, got {}",
                json_type(raw)
            )));
        };

        let values = validate(self.action.fields(), raw)?;

        let payload: A::Payload = values
            .deserialize_into()
            .map_err(|e| ActionError::payload(e.to_string()))?;

        let settings: A::Settings = serde_json::from_value(settings.clone())
            .map_err(|e| ActionError::settings(e.to_string()))?;

        self.action
            .perform(ExecutionContext::new(settings, payload, request))
            .await
    }

    fn metadata(&self) -> &ActionMetadata {
        self.action.metadata()
    }

    fn fields(&self) -> &ParameterCollection {
        self.action.fields()
    }
}

impl<A: ActionDefinition> std::fmt::Debug for DefinitionAdapter<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionAdapter")
            .field("action_key", &self.action.metadata().key)
            .finish()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

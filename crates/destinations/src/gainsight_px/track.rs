use std::sync::Arc;

use async_trait::async_trait;
use courier_action::prelude::*;
use courier_parameter::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Endpoint, Settings};

/// One track event as validated from the raw input.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackPayload {
    pub anonymous_id: Option<String>,
    pub user_id: Option<String>,
    pub event: String,
    pub properties: Option<Map<String, Value>>,
    pub timestamp: Option<Value>,
    pub message_id: Option<String>,
    pub context: Option<Map<String, Value>>,
}

/// Ingestion shape of a track event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireEvent<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anonymous_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a Map<String, Value>>,
}

impl TrackPayload {
    pub(crate) fn to_wire(&self) -> WireEvent<'_> {
        WireEvent {
            kind: "track",
            event: &self.event,
            user_id: self.user_id.as_deref(),
            anonymous_id: self.anonymous_id.as_deref(),
            properties: self.properties.as_ref(),
            timestamp: self.timestamp.as_ref(),
            message_id: self.message_id.as_deref(),
            context: self.context.as_ref(),
        }
    }
}

/// Fields of a single event. `user_id` is required when no `anonymous_id`
/// was given.
pub(crate) fn event_fields() -> Result<ParameterCollection, SchemaError> {
    ParameterCollection::try_from_defs([
        ParameterDef::string("anonymous_id", "Anonymous ID")
            .with_description("An anonymous identifier for the user."),
        ParameterDef::string("user_id", "User ID")
            .with_description("The unique identifier of the user.")
            .required_when(RuleSet::Not {
                rule: Box::new(RuleSet::is_set("anonymous_id")),
            }),
        ParameterDef::string("event", "Event Name")
            .required()
            .with_rule(ValidationRule::min_length(1)),
        ParameterDef::new("properties", "Properties", ParameterKind::Object),
        ParameterDef::new("timestamp", "Timestamp", ParameterKind::Datetime),
        ParameterDef::string("message_id", "Message ID"),
        ParameterDef::new("context", "Context", ParameterKind::Object),
    ])
}

/// Sends one track event to the regional push endpoint.
pub struct Track {
    meta: ActionMetadata,
    fields: ParameterCollection,
    endpoints: Arc<EndpointTable<Endpoint>>,
}

impl Track {
    pub fn new(endpoints: Arc<EndpointTable<Endpoint>>) -> Result<Self, SchemaError> {
        Ok(Self {
            meta: ActionMetadata::new("track", "Track Event", "Send a track event to Gainsight PX.")
                .with_default_subscription("type = \"track\""),
            fields: event_fields()?,
            endpoints,
        })
    }
}

#[async_trait]
impl ActionDefinition for Track {
    type Settings = Settings;
    type Payload = TrackPayload;

    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    fn fields(&self) -> &ParameterCollection {
        &self.fields
    }

    async fn perform(
        &self,
        ctx: ExecutionContext<'_, Settings, TrackPayload>,
    ) -> Result<HttpResponse, ActionError> {
        let settings = ctx.settings();
        let (name, key) = settings.api_key_header()?;
        let url = self
            .endpoints
            .resolve(Endpoint::Track, settings.region.as_deref())
            .clone();
        let body = serde_json::to_value(ctx.payload().to_wire())
            .map_err(|e| ActionError::payload(e.to_string()))?;

        ctx.send(HttpRequest::post(url).header(name, key).json(body))
            .await
    }
}

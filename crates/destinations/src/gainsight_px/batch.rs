use std::sync::Arc;

use async_trait::async_trait;
use courier_action::prelude::*;
use courier_parameter::prelude::*;
use serde::Deserialize;
use serde_json::json;

use super::track::{TrackPayload, event_fields};
use super::{Endpoint, Settings};

#[derive(Debug, Clone, Deserialize)]
pub struct BatchPayload {
    pub events: Vec<TrackPayload>,
}

/// Sends several track events in one request to the regional batch
/// endpoint. Every event is validated like a single [`Track`](super::Track).
pub struct Batch {
    meta: ActionMetadata,
    fields: ParameterCollection,
    endpoints: Arc<EndpointTable<Endpoint>>,
}

impl Batch {
    pub fn new(endpoints: Arc<EndpointTable<Endpoint>>) -> Result<Self, SchemaError> {
        let fields = ParameterCollection::new().try_with(
            ParameterDef::object("events", "Events", event_fields()?)
                .with_description("Track events to send together.")
                .multiple()
                .required(),
        )?;

        Ok(Self {
            meta: ActionMetadata::new(
                "batch",
                "Track Events (Batch)",
                "Send several track events to Gainsight PX in one request.",
            ),
            fields,
            endpoints,
        })
    }
}

#[async_trait]
impl ActionDefinition for Batch {
    type Settings = Settings;
    type Payload = BatchPayload;

    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    fn fields(&self) -> &ParameterCollection {
        &self.fields
    }

    async fn perform(
        &self,
        ctx: ExecutionContext<'_, Settings, BatchPayload>,
    ) -> Result<HttpResponse, ActionError> {
        let events = &ctx.payload().events;
        if events.is_empty() {
            return Err(
                IntegrationError::misconfigured_field("A batch must contain at least one event")
                    .into(),
            );
        }

        let settings = ctx.settings();
        let (name, key) = settings.api_key_header()?;
        let url = self
            .endpoints
            .resolve(Endpoint::Batch, settings.region.as_deref())
            .clone();
        let batch: Vec<_> = events.iter().map(TrackPayload::to_wire).collect();

        ctx.send(HttpRequest::post(url).header(name, key).json(json!({ "batch": batch })))
            .await
    }
}

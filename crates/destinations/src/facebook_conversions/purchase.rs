use async_trait::async_trait;
use courier_action::prelude::*;
use courier_parameter::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::fields::{
    ACTION_SOURCE, CONTENT_IDS, CONTENT_NAME, CURRENCY, EVENT_TIME, NUM_ITEMS, VALUE, contents,
    user_data,
};
use super::{Content, Settings, UserData, check_event, event_time_seconds};

/// Validated input of [`Purchase`].
#[derive(Debug, Clone, Deserialize)]
pub struct PurchasePayload {
    pub user_data: Option<UserData>,
    pub event_time: Value,
    pub action_source: String,
    pub currency: String,
    pub value: f64,
    pub content_ids: Option<Vec<String>>,
    pub content_name: Option<String>,
    pub contents: Option<Vec<Content>>,
    pub num_items: Option<i64>,
}

#[derive(Serialize)]
struct PurchaseData<'a> {
    currency: &'a str,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_ids: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contents: Option<&'a [Content]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_items: Option<i64>,
}

/// Sends a `Purchase` server event. Currency and value are mandatory.
pub struct Purchase {
    meta: ActionMetadata,
    fields: ParameterCollection,
}

impl Purchase {
    pub fn new() -> Result<Self, SchemaError> {
        let fields = ParameterCollection::try_from_defs([
            user_data()?,
            EVENT_TIME.clone().required(),
            ACTION_SOURCE.clone().required(),
            CURRENCY.clone().required(),
            VALUE.clone().required().with_rule(ValidationRule::min(0.0)),
            CONTENT_IDS.clone(),
            CONTENT_NAME.clone(),
            contents()?,
            NUM_ITEMS.clone(),
        ])?;

        Ok(Self {
            meta: ActionMetadata::new(
                "purchase",
                "Purchase",
                "Send a purchase event to Facebook when an order is completed.",
            )
            .with_default_subscription("type = \"track\" and event = \"Order Completed\""),
            fields,
        })
    }
}

#[async_trait]
impl ActionDefinition for Purchase {
    type Settings = Settings;
    type Payload = PurchasePayload;

    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    fn fields(&self) -> &ParameterCollection {
        &self.fields
    }

    async fn perform(
        &self,
        ctx: ExecutionContext<'_, Settings, PurchasePayload>,
    ) -> Result<HttpResponse, ActionError> {
        let payload = ctx.payload();
        let user_data = check_event(
            Some(payload.currency.as_str()),
            payload.user_data.as_ref(),
            &payload.action_source,
        )?;
        let event_time = event_time_seconds(&payload.event_time)?;
        let url = ctx.settings().events_url()?;

        let custom_data = PurchaseData {
            currency: &payload.currency,
            value: payload.value,
            content_ids: payload.content_ids.as_deref(),
            content_name: payload.content_name.as_deref(),
            content_type: payload.contents.as_ref().map(|_| "product"),
            contents: payload.contents.as_deref(),
            num_items: payload.num_items,
        };

        let body = json!({
            "data": [{
                "event_name": "Purchase",
                "event_time": event_time,
                "action_source": payload.action_source,
                "user_data": user_data.to_wire(),
                "custom_data": custom_data,
            }]
        });

        ctx.send(HttpRequest::post(url).json(body)).await
    }
}

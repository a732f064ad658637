use async_trait::async_trait;
use courier_action::prelude::*;
use courier_parameter::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::fields::{
    ACTION_SOURCE, CONTENT_CATEGORY, CONTENT_IDS, CURRENCY, EVENT_TIME, VALUE, contents, user_data,
};
use super::{Content, Settings, UserData, check_event, event_time_seconds};

/// Validated input of [`Search`].
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPayload {
    pub user_data: Option<UserData>,
    pub event_time: Value,
    pub action_source: String,
    pub content_category: Option<String>,
    pub content_ids: Option<Vec<String>>,
    pub contents: Option<Vec<Content>>,
    pub currency: Option<String>,
    pub value: Option<f64>,
    pub search_string: Option<String>,
}

#[derive(Serialize)]
struct SearchData<'a> {
    currency: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_ids: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contents: Option<&'a [Content]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_string: Option<&'a str>,
}

/// Sends a `Search` server event.
pub struct Search {
    meta: ActionMetadata,
    fields: ParameterCollection,
}

impl Search {
    pub fn new() -> Result<Self, SchemaError> {
        let fields = ParameterCollection::try_from_defs([
            user_data()?,
            EVENT_TIME.clone().required(),
            ACTION_SOURCE.clone().required(),
            CONTENT_CATEGORY.clone(),
            CONTENT_IDS.clone(),
            contents()?,
            CURRENCY.clone(),
            VALUE.clone(),
            ParameterDef::string("search_string", "Search String")
                .with_description("The string entered by the user for the search."),
        ])?;

        Ok(Self {
            meta: ActionMetadata::new("search", "Search", "Send a search event to Facebook.")
                .with_default_subscription("type = \"track\" and event = \"Products Searched\""),
            fields,
        })
    }
}

#[async_trait]
impl ActionDefinition for Search {
    type Settings = Settings;
    type Payload = SearchPayload;

    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    fn fields(&self) -> &ParameterCollection {
        &self.fields
    }

    async fn perform(
        &self,
        ctx: ExecutionContext<'_, Settings, SearchPayload>,
    ) -> Result<HttpResponse, ActionError> {
        let payload = ctx.payload();
        let user_data = check_event(
            payload.currency.as_deref(),
            payload.user_data.as_ref(),
            &payload.action_source,
        )?;
        let event_time = event_time_seconds(&payload.event_time)?;
        let url = ctx.settings().events_url()?;

        let custom_data = SearchData {
            currency: payload.currency.as_deref(),
            content_ids: payload.content_ids.as_deref(),
            contents: payload.contents.as_deref(),
            content_category: payload.content_category.as_deref(),
            value: payload.value,
            search_string: payload.search_string.as_deref(),
        };

        let body = json!({
            "data": [{
                "event_name": "Search",
                "event_time": event_time,
                "action_source": payload.action_source,
                "user_data": user_data.to_wire(),
                "custom_data": custom_data,
            }]
        });

        ctx.send(HttpRequest::post(url).json(body)).await
    }
}

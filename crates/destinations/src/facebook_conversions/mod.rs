//! Facebook Conversions API.
//!
//! Server events are posted to
//! `https://graph.facebook.com/{api_version}/{pixel_id}/events` with the
//! access token as a query parameter. Personal fields of `user_data` are
//! hashed before the request is built.

pub mod fields;
pub mod purchase;
pub mod search;
pub mod user_data;

use courier_action::prelude::*;
use courier_transform::{CURRENCY_ISO_CODES, unix_seconds};
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

pub use purchase::Purchase;
pub use search::Search;
pub use user_data::UserData;

/// Destination slug.
pub const SLUG: &str = "facebook-conversions-api";

/// Graph API host.
pub const GRAPH_API_BASE: &str = "https://graph.facebook.com";

/// Graph API version used when settings do not name one.
pub const DEFAULT_API_VERSION: &str = "v11.0";

/// Destination settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Pixel the events are attributed to.
    #[serde(alias = "pixelId")]
    pub pixel_id: String,
    /// System-user access token.
    #[serde(alias = "accessToken")]
    pub access_token: SecureString,
    /// Graph API version segment, e.g. `v11.0`.
    #[serde(default = "default_api_version", alias = "apiVersion")]
    pub api_version: String,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_owned()
}

impl Settings {
    /// Events endpoint for this pixel, access token included.
    pub fn events_url(&self) -> Result<Url, ActionError> {
        if self.pixel_id.trim().is_empty() {
            return Err(ActionError::settings("pixel_id must not be empty"));
        }
        let mut url = Url::parse(GRAPH_API_BASE).map_err(|e| ActionError::settings(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ActionError::settings("graph API base URL cannot carry a path"))?
            .push(&self.api_version)
            .push(&self.pixel_id)
            .push("events");
        url.query_pairs_mut()
            .append_pair("access_token", self.access_token.expose());
        Ok(url)
    }
}

/// One product line in `contents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_category: Option<String>,
}

/// Business checks every server event goes through before a request is
/// built. Returns the user data to send.
pub(crate) fn check_event<'a>(
    currency: Option<&str>,
    user_data: Option<&'a UserData>,
    action_source: &str,
) -> Result<&'a UserData, IntegrationError> {
    if !CURRENCY_ISO_CODES.contains_opt(currency) {
        return Err(IntegrationError::misconfigured_field(format!(
            "{} is not a valid currency code.",
            currency.unwrap_or("undefined")
        )));
    }

    let user_data = user_data.ok_or_else(|| {
        IntegrationError::misconfigured_field("Must include at least one user data property")
    })?;

    if action_source == "website" && user_data.client_user_agent.is_none() {
        return Err(IntegrationError::misconfigured_field(
            "If action source is \"Website\" then client_user_agent must be defined",
        ));
    }

    Ok(user_data)
}

/// `event_time` as Unix seconds.
pub(crate) fn event_time_seconds(value: &Value) -> Result<i64, IntegrationError> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => unix_seconds(s),
        _ => None,
    }
    .ok_or_else(|| {
        IntegrationError::misconfigured_field(format!("{value} is not a valid event_time."))
    })
}

/// The destination with all of its actions.
pub fn destination() -> Result<DestinationDefinition, RegistryError> {
    Ok(
        DestinationDefinition::new(SLUG, "Facebook Conversions API", Version::new(1, 0, 0))
            .with_description(
                "Send web and offline events to Facebook through the Conversions API.",
            )
            .with_action(Search::new()?)
            .with_action(Purchase::new()?),
    )
}

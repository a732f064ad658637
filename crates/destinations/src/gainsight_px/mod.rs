//! Gainsight PX.
//!
//! Events are pushed to a regional ingestion host. Accounts live in one of
//! the [`Region`]s; an unset or unknown region goes to North America.

pub mod batch;
pub mod track;

use std::sync::Arc;

use courier_action::endpoint::EndpointError;
use courier_action::prelude::*;
use http::header::{HeaderName, HeaderValue};
use semver::Version;
use serde::Deserialize;

pub use batch::Batch;
pub use track::Track;

/// Destination slug.
pub const SLUG: &str = "gainsight-px-cloud-action";

/// Header carrying the product API key.
pub const API_KEY_HEADER: &str = "x-aptrinsic-api-key";

courier_action::endpoint_capability! {
    /// Ingestion endpoints.
    pub enum Endpoint {
        /// Single event.
        Track => "track",
        /// Array of events.
        Batch => "batch",
    }
}

/// The regional endpoint table.
pub fn endpoints() -> Result<EndpointTable<Endpoint>, EndpointError> {
    EndpointTable::builder()
        .endpoint(
            Endpoint::Track,
            Region::NorthAmerica,
            "https://segment-esp.aptrinsic.com/rte/segmentio/v1/push",
        )
        .endpoint(
            Endpoint::Track,
            Region::Europe,
            "https://segment-esp-eu.aptrinsic.com/rte/segmentio/v1/push",
        )
        .endpoint(
            Endpoint::Track,
            Region::Dev,
            "https://esp-dev.aptrinsic.com/rte/segmentio/v1/push",
        )
        .endpoint(
            Endpoint::Batch,
            Region::NorthAmerica,
            "https://segment-esp.aptrinsic.com/rte/segmentio/v1/batch",
        )
        .endpoint(
            Endpoint::Batch,
            Region::Europe,
            "https://segment-esp-eu.aptrinsic.com/rte/segmentio/v1/batch",
        )
        .endpoint(
            Endpoint::Batch,
            Region::Dev,
            "https://esp-dev.aptrinsic.com/rte/segmentio/v1/batch",
        )
        .build()
}

/// Destination settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Product API key.
    #[serde(alias = "apiKey")]
    pub api_key: SecureString,
    /// Data residency region identifier, e.g. `europe`.
    #[serde(default, alias = "dataCenter")]
    pub region: Option<String>,
}

impl Settings {
    pub(crate) fn api_key_header(&self) -> Result<(HeaderName, HeaderValue), ActionError> {
        let mut value = HeaderValue::from_str(self.api_key.expose())
            .map_err(|_| ActionError::settings("api_key contains characters not allowed in a header"))?;
        value.set_sensitive(true);
        Ok((HeaderName::from_static(API_KEY_HEADER), value))
    }
}

/// The destination with all of its actions.
pub fn destination() -> Result<DestinationDefinition, RegistryError> {
    let endpoints = Arc::new(endpoints()?);
    Ok(
        DestinationDefinition::new(SLUG, "Gainsight PX Cloud (Actions)", Version::new(1, 0, 0))
            .with_description("Send track events to Gainsight PX, one at a time or in batches.")
            .with_action(Track::new(Arc::clone(&endpoints))?)
            .with_action(Batch::new(endpoints)?),
    )
}

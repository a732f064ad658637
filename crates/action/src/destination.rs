use std::fmt;
use std::sync::Arc;

use semver::Version;
use serde::Serialize;

use crate::adapters::DefinitionAdapter;
use crate::definition::ActionDefinition;
use crate::handler::ActionHandler;

/// A named, versioned group of actions sharing one settings shape.
///
/// Handed to [`ActionRegistry::register_destination`](crate::registry::ActionRegistry::register_destination),
/// which registers every action under the destination's slug.
pub struct DestinationDefinition {
    info: DestinationInfo,
    actions: Vec<Arc<dyn ActionHandler>>,
}

/// Identity of a registered destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationInfo {
    /// Stable identifier used in dispatch and output paths.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Release version of the destination.
    pub version: Version,
    /// Optional long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DestinationDefinition {
    /// Start a destination with no actions.
    pub fn new(slug: impl Into<String>, name: impl Into<String>, version: Version) -> Self {
        Self {
            info: DestinationInfo {
                slug: slug.into(),
                name: name.into(),
                version,
                description: None,
            },
            actions: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.info.description = Some(description.into());
        self
    }

    /// Add a typed action. Its slug is `metadata().key`.
    pub fn with_action<A: ActionDefinition>(self, action: A) -> Self {
        self.with_handler(Arc::new(DefinitionAdapter::new(action)))
    }

    /// Add an already type-erased action.
    pub fn with_handler(mut self, handler: Arc<dyn ActionHandler>) -> Self {
        self.actions.push(handler);
        self
    }

    /// Destination identity.
    pub fn info(&self) -> &DestinationInfo {
        &self.info
    }

    /// Destination slug.
    pub fn slug(&self) -> &str {
        &self.info.slug
    }

    /// Actions in declaration order.
    pub fn actions(&self) -> &[Arc<dyn ActionHandler>] {
        &self.actions
    }

    pub(crate) fn into_parts(self) -> (DestinationInfo, Vec<Arc<dyn ActionHandler>>) {
        (self.info, self.actions)
    }
}

impl fmt::Debug for DestinationDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationDefinition")
            .field("info", &self.info)
            .field(
                "actions",
                &self
                    .actions
                    .iter()
                    .map(|a| a.metadata().key.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

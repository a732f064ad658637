use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::adapters::DefinitionAdapter;
use crate::definition::ActionDefinition;
use crate::destination::{DestinationDefinition, DestinationInfo};
use crate::error::{ActionError, RegistryError};
use crate::handler::ActionHandler;
use crate::request::{HttpResponse, RequestClient};

type ActionTable = BTreeMap<String, Arc<dyn ActionHandler>>;

/// Actions keyed by destination slug and action slug.
///
/// Populated once at process start, then only read. Registration fails on a
/// duplicate `(destination, action)` pair or an inconsistent field schema,
/// so [`dispatch`](Self::dispatch) never sees either. Concurrent dispatches
/// share the registry through `&self` with no locking.
///
/// # Example
///
/// ```rust
/// use courier_action::prelude::*;
///
/// let registry = ActionRegistry::new();
/// assert!(registry.is_empty());
/// assert!(registry.get("acme", "track").is_none());
/// ```
#[derive(Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, ActionTable>,
    destinations: BTreeMap<String, DestinationInfo>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed action under `destination` and `action`.
    pub fn register<A: ActionDefinition>(
        &mut self,
        destination: &str,
        action: &str,
        definition: A,
    ) -> Result<(), RegistryError> {
        self.register_handler(destination, action, Arc::new(DefinitionAdapter::new(definition)))
    }

    /// Register a type-erased handler under `destination` and `action`.
    pub fn register_handler(
        &mut self,
        destination: &str,
        action: &str,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<(), RegistryError> {
        self.check_new(destination, action, handler.as_ref())?;
        self.insert(destination, action, handler);
        Ok(())
    }

    /// Register every action of a destination, or none of them.
    pub fn register_destination(
        &mut self,
        definition: DestinationDefinition,
    ) -> Result<(), RegistryError> {
        let (info, handlers) = definition.into_parts();
        if self.destinations.contains_key(&info.slug) {
            return Err(RegistryError::DuplicateDestination {
                destination: info.slug,
            });
        }

        let mut seen = Vec::with_capacity(handlers.len());
        for handler in &handlers {
            let key = handler.metadata().key.as_str();
            if seen.contains(&key) {
                return Err(RegistryError::DuplicateAction {
                    destination: info.slug,
                    action: key.to_owned(),
                });
            }
            self.check_new(&info.slug, key, handler.as_ref())?;
            seen.push(key);
        }

        self.actions.entry(info.slug.clone()).or_default();
        for handler in handlers {
            let key = handler.metadata().key.clone();
            self.insert(&info.slug, &key, handler);
        }
        tracing::debug!(destination = %info.slug, version = %info.version, "registered destination");
        self.destinations.insert(info.slug.clone(), info);
        Ok(())
    }

    fn check_new(
        &self,
        destination: &str,
        action: &str,
        handler: &dyn ActionHandler,
    ) -> Result<(), RegistryError> {
        if self.contains(destination, action) {
            return Err(RegistryError::DuplicateAction {
                destination: destination.to_owned(),
                action: action.to_owned(),
            });
        }
        handler
            .fields()
            .check()
            .map_err(|source| RegistryError::InvalidSchema {
                destination: destination.to_owned(),
                action: action.to_owned(),
                source,
            })
    }

    fn insert(&mut self, destination: &str, action: &str, handler: Arc<dyn ActionHandler>) {
        self.actions
            .entry(destination.to_owned())
            .or_default()
            .insert(action.to_owned(), handler);
    }

    /// Look up an action.
    pub fn get(&self, destination: &str, action: &str) -> Option<&Arc<dyn ActionHandler>> {
        self.actions.get(destination)?.get(action)
    }

    /// Whether an action is registered.
    pub fn contains(&self, destination: &str, action: &str) -> bool {
        self.get(destination, action).is_some()
    }

    /// Total number of registered actions across all destinations.
    pub fn len(&self) -> usize {
        self.actions.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(destination, action, handler)` in slug order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Arc<dyn ActionHandler>)> {
        self.actions.iter().flat_map(|(destination, table)| {
            table
                .iter()
                .map(move |(action, handler)| (destination.as_str(), action.as_str(), handler))
        })
    }

    /// Destinations registered through [`register_destination`](Self::register_destination).
    pub fn destinations(&self) -> impl Iterator<Item = &DestinationInfo> {
        self.destinations.values()
    }

    /// Identity of one destination.
    pub fn destination(&self, slug: &str) -> Option<&DestinationInfo> {
        self.destinations.get(slug)
    }

    /// JSON manifest of a destination: identity plus every action's
    /// metadata and field schema. `None` if nothing is registered under
    /// `destination`.
    pub fn describe(&self, destination: &str) -> Option<Value> {
        let table = self.actions.get(destination)?;
        let mut manifest = Map::new();
        manifest.insert("slug".into(), json!(destination));
        if let Some(info) = self.destinations.get(destination) {
            manifest.insert("name".into(), json!(info.name));
            manifest.insert("version".into(), json!(info.version.to_string()));
            if let Some(description) = &info.description {
                manifest.insert("description".into(), json!(description));
            }
        }
        manifest.insert(
            "actions".into(),
            table.values().map(|h| action_manifest(h.as_ref())).collect(),
        );
        Some(Value::Object(manifest))
    }

    /// JSON manifest of a single action.
    pub fn describe_action(&self, destination: &str, action: &str) -> Option<Value> {
        self.get(destination, action)
            .map(|h| action_manifest(h.as_ref()))
    }

    /// Validate `raw`, build the execution context and perform the action.
    ///
    /// Every failure is returned. At most one request is sent, and none when
    /// the error is not [`ActionError::Transport`].
    pub async fn dispatch(
        &self,
        destination: &str,
        action: &str,
        raw: &Value,
        settings: &Value,
        request: &dyn RequestClient,
    ) -> Result<HttpResponse, ActionError> {
        let handler = self
            .get(destination, action)
            .ok_or_else(|| ActionError::unknown_action(destination, action))?;

        tracing::debug!(destination, action, "dispatching event");
        let result = handler.execute(raw, settings, request).await;
        match &result {
            Ok(response) => {
                tracing::debug!(destination, action, status = %response.status(), "action completed");
            }
            Err(e) => {
                tracing::debug!(destination, action, code = e.code(), error = %e, "action failed");
            }
        }
        result
    }
}

fn action_manifest(handler: &dyn ActionHandler) -> Value {
    let meta = handler.metadata();
    let mut manifest = json!({
        "key": meta.key,
        "title": meta.title,
        "description": meta.description,
        "fields": handler.fields(),
    });
    if let Some(subscription) = &meta.default_subscription {
        manifest["defaultSubscription"] = json!(subscription);
    }
    manifest
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("count", &self.len())
            .field(
                "keys",
                &self
                    .iter()
                    .map(|(d, a, _)| format!("{d}.{a}"))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

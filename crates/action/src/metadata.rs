use serde::Serialize;

/// Static description of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMetadata {
    /// Action slug, unique within its destination (e.g. `"search"`).
    pub key: String,
    /// Human-readable title.
    pub title: String,
    /// What the action sends and when.
    pub description: String,
    /// Event filter suggested when a user first enables the action
    /// (e.g. `type = "track" and event = "Products Searched"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_subscription: Option<String>,
}

impl ActionMetadata {
    /// Create metadata with no default subscription.
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            description: description.into(),
            default_subscription: None,
        }
    }

    /// Set the default subscription filter.
    pub fn with_default_subscription(mut self, subscription: impl Into<String>) -> Self {
        self.default_subscription = Some(subscription.into());
        self
    }
}

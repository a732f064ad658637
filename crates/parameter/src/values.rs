use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A validated set of field values, keyed by field key.
///
/// Produced by [`validate`](crate::validate::validate). Keys keep the
/// declaration order of the collection that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterValues {
    values: Map<String, Value>,
}

impl ParameterValues {
    /// Create an empty value set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by field key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Set a value for a field key.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Check whether a value exists for the given key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over all keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of values stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert the values into a typed payload.
    ///
    /// Field keys map onto struct fields by name; absent optional fields
    /// deserialize as `None`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(Value::Object(self.values.clone()))
    }

    /// Consume the set and return it as a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

impl FromIterator<(String, Value)> for ParameterValues {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Map<String, Value>> for ParameterValues {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_is_empty() {
        let vals = ParameterValues::new();
        assert!(vals.is_empty());
        assert_eq!(vals.len(), 0);
    }

    #[test]
    fn set_and_get() {
        let mut vals = ParameterValues::new();
        vals.set("currency", json!("USD"));
        vals.set("value", json!(12.5));

        assert_eq!(vals.get("currency"), Some(&json!("USD")));
        assert_eq!(vals.get("value"), Some(&json!(12.5)));
        assert_eq!(vals.get("missing"), None);
        assert_eq!(vals.len(), 2);
    }

    #[test]
    fn contains_reports_set_keys() {
        let mut vals = ParameterValues::new();
        vals.set("key", json!("value"));
        assert!(vals.contains("key"));
        assert!(!vals.contains("other"));
    }

    #[test]
    fn keys_keep_insertion_order() {
        let mut vals = ParameterValues::new();
        vals.set("zeta", json!(1));
        vals.set("alpha", json!(2));
        vals.set("mid", json!(3));

        let keys: Vec<&str> = vals.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn deserialize_into_typed_payload() {
        #[derive(Deserialize)]
        struct Payload {
            currency: String,
            value: Option<f64>,
            search_string: Option<String>,
        }

        let vals: ParameterValues = vec![
            ("currency".to_owned(), json!("EUR")),
            ("value".to_owned(), json!(3.0)),
        ]
        .into_iter()
        .collect();

        let payload: Payload = vals.deserialize_into().unwrap();
        assert_eq!(payload.currency, "EUR");
        assert_eq!(payload.value, Some(3.0));
        assert!(payload.search_string.is_none());
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut vals = ParameterValues::new();
        vals.set("name", json!("test"));

        let json_str = serde_json::to_string(&vals).unwrap();
        assert_eq!(json_str, r#"{"name":"test"}"#);
    }
}

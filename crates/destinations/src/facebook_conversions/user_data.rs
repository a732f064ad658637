use courier_transform::{Normalization, hash_pii};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Customer information attached to a server event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserData {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub external_id: Option<String>,
    pub client_ip_address: Option<String>,
    pub client_user_agent: Option<String>,
    pub fbc: Option<String>,
    pub fbp: Option<String>,
    pub subscription_id: Option<String>,
    pub lead_id: Option<String>,
    pub fb_login_id: Option<String>,
}

impl UserData {
    /// Wire representation: personal fields normalized, hashed and renamed
    /// to their Graph API keys; technical identifiers passed through.
    pub fn to_wire(&self) -> Map<String, Value> {
        let hashed = [
            ("em", &self.email, Normalization::Email),
            ("ph", &self.phone, Normalization::Phone),
            ("ge", &self.gender, Normalization::Lowercase),
            ("db", &self.date_of_birth, Normalization::Digits),
            ("ln", &self.last_name, Normalization::AlphaLower),
            ("fn", &self.first_name, Normalization::AlphaLower),
            ("ct", &self.city, Normalization::AlphaLower),
            ("st", &self.state, Normalization::AlphaLower),
            ("zp", &self.zip, Normalization::Lowercase),
            ("country", &self.country, Normalization::AlphaLower),
            ("external_id", &self.external_id, Normalization::Trim),
        ];
        let passthrough = [
            ("client_ip_address", &self.client_ip_address),
            ("client_user_agent", &self.client_user_agent),
            ("fbc", &self.fbc),
            ("fbp", &self.fbp),
            ("subscription_id", &self.subscription_id),
            ("lead_id", &self.lead_id),
            ("fb_login_id", &self.fb_login_id),
        ];

        let mut wire = Map::new();
        for (key, value, normalization) in hashed {
            if let Some(value) = value {
                wire.insert(key.to_owned(), Value::String(hash_pii(value, normalization)));
            }
        }
        for (key, value) in passthrough {
            if let Some(value) = value {
                wire.insert(key.to_owned(), Value::String(value.clone()));
            }
        }
        wire
    }
}

use serde::{Deserialize, Serialize};

/// A configured light: its display name and `host:port` (or bare IP) address.
///
/// Loaded once at startup and never mutated; workers get their own clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    #[serde(rename = "ip")]
    pub address: String,
}

impl Device {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    pub fn lights_url(&self) -> String {
        format!("http://{}{}", self.address, crate::api::client::LIGHTS_PATH)
    }
}

use serde::{Deserialize, Serialize};

/// Envelope used by `/elgato/lights` for both requests and responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LightStatus {
    #[serde(default)]
    pub lights: Vec<LightDetail>,
    #[serde(
        rename = "numberOfLights",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub number_of_lights: Option<u32>,
}

impl LightStatus {
    pub fn single(detail: LightDetail) -> Self {
        Self {
            lights: vec![detail],
            number_of_lights: None,
        }
    }

    pub fn first(&self) -> Option<&LightDetail> {
        self.lights.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightDetail {
    pub on: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    /// Color temperature in mired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<u16>,
}

use serde::Serialize;

use crate::api::response::LightDetail;
use crate::models::color_temp::{kelvin_to_mired, mired_to_kelvin};

/// State of a light as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceState {
    pub power: bool,
    pub brightness: u8,
    pub temperature_kelvin: u16,
}

impl DeviceState {
    pub fn from_detail(detail: &LightDetail) -> Self {
        Self {
            power: detail.on == 1,
            brightness: detail.brightness.unwrap_or_default(),
            temperature_kelvin: mired_to_kelvin(detail.temperature.unwrap_or_default()),
        }
    }

    pub fn temperature_mired(&self) -> u16 {
        kelvin_to_mired(self.temperature_kelvin)
    }

    /// Full settings reproducing this state with the power flag replaced.
    pub fn with_power(&self, power: bool) -> LightSettings {
        LightSettings {
            power,
            brightness: Some(self.brightness),
            temperature_kelvin: Some(self.temperature_kelvin),
        }
    }
}

/// A requested change to one light.
///
/// Power is always sent; brightness and temperature only when set, so a
/// write never clobbers fields the caller left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightSettings {
    pub power: bool,
    pub brightness: Option<u8>,
    pub temperature_kelvin: Option<u16>,
}

impl LightSettings {
    pub fn power(power: bool) -> Self {
        Self {
            power,
            ..Self::default()
        }
    }

    pub fn to_detail(&self) -> LightDetail {
        LightDetail {
            on: u8::from(self.power),
            brightness: self.brightness,
            temperature: self.temperature_kelvin.map(kelvin_to_mired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_detail() {
        let detail = LightDetail {
            on: 1,
            brightness: Some(45),
            temperature: Some(250),
        };
        let state = DeviceState::from_detail(&detail);
        assert_eq!(
            state,
            DeviceState {
                power: true,
                brightness: 45,
                temperature_kelvin: 4000,
            }
        );
        assert_eq!(state.temperature_mired(), 250);
    }

    #[test]
    fn test_power_only_settings_omit_other_fields() {
        let detail = LightSettings::power(false).to_detail();
        assert_eq!(detail.on, 0);
        assert_eq!(detail.brightness, None);
        assert_eq!(detail.temperature, None);
    }

    #[test]
    fn test_with_power_keeps_levels() {
        let state = DeviceState {
            power: false,
            brightness: 30,
            temperature_kelvin: 5000,
        };
        let detail = state.with_power(true).to_detail();
        assert_eq!(detail.on, 1);
        assert_eq!(detail.brightness, Some(30));
        assert_eq!(detail.temperature, Some(200));
    }
}

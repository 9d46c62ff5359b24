//! Local mirror of every light's believed state, plus the selection cursor.
//!
//! Only the dashboard's event loop holds a `Model`; network tasks never see it.

use crate::classify::ErrorKind;
use crate::models::color_temp::{MAX_BRIGHTNESS, MAX_KELVIN, MIN_KELVIN};
use crate::models::{Device, DeviceState};

pub const DEFAULT_BRIGHTNESS: u8 = 20;
pub const DEFAULT_KELVIN: u16 = 5000;
pub const BRIGHTNESS_STEP: i16 = 5;
pub const TEMPERATURE_STEP: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightEntry {
    pub device: Device,
    pub state: DeviceState,
    /// Set when the last call for this light failed; cleared by the next success.
    pub error: Option<ErrorKind>,
}

#[derive(Debug, Clone)]
pub struct Model {
    lights: Vec<LightEntry>,
    cursor: usize,
    size: (u16, u16),
    quit: bool,
}

impl Model {
    pub fn new(devices: Vec<Device>) -> Self {
        let lights = devices
            .into_iter()
            .map(|device| LightEntry {
                device,
                state: DeviceState {
                    power: false,
                    brightness: DEFAULT_BRIGHTNESS,
                    temperature_kelvin: DEFAULT_KELVIN,
                },
                error: None,
            })
            .collect();

        Self {
            lights,
            cursor: 0,
            size: (0, 0),
            quit: false,
        }
    }

    pub fn lights(&self) -> &[LightEntry] {
        &self.lights
    }

    pub fn light(&self, index: usize) -> Option<&LightEntry> {
        self.lights.get(index)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&LightEntry> {
        self.lights.get(self.cursor)
    }

    /// True iff every light is on. Derived from the lights on every read.
    pub fn global_on(&self) -> bool {
        self.lights.iter().all(|l| l.state.power)
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    /// Move the cursor, clamped to the list.
    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.lights.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn set_power(&mut self, index: usize, power: bool) {
        if let Some(light) = self.lights.get_mut(index) {
            light.state.power = power;
        }
    }

    pub fn adjust_brightness(&mut self, index: usize, delta: i16) {
        if let Some(light) = self.lights.get_mut(index) {
            let next = (i16::from(light.state.brightness) + delta)
                .clamp(0, i16::from(MAX_BRIGHTNESS));
            light.state.brightness = u8::try_from(next).unwrap_or(MAX_BRIGHTNESS);
        }
    }

    pub fn adjust_temperature(&mut self, index: usize, delta: i32) {
        if let Some(light) = self.lights.get_mut(index) {
            let next = (i32::from(light.state.temperature_kelvin) + delta)
                .clamp(i32::from(MIN_KELVIN), i32::from(MAX_KELVIN));
            light.state.temperature_kelvin = u16::try_from(next).unwrap_or(MAX_KELVIN);
        }
    }

    /// The device's report replaces whatever was assumed locally.
    pub fn apply_state(&mut self, index: usize, state: DeviceState) {
        if let Some(light) = self.lights.get_mut(index) {
            light.state = state;
            light.error = None;
        }
    }

    /// Keep the local state, but mark the light as failing.
    pub fn apply_failure(&mut self, index: usize, kind: ErrorKind) {
        if let Some(light) = self.lights.get_mut(index) {
            light.error = Some(kind);
        }
    }
}

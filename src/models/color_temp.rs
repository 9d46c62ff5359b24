//! Color temperature conversions and input validation.
//!
//! Lights take color temperature in mired (1,000,000 / Kelvin) on the wire.
//! Kelvin values shown to users are rounded to the nearest 50, so a
//! Kelvin -> mired -> Kelvin round trip is lossy by up to 50K.

use crate::error::AppError;

pub const MIN_KELVIN: u16 = 2900;
pub const MAX_KELVIN: u16 = 7000;
pub const MAX_BRIGHTNESS: u8 = 100;

const MIRED_SCALE: u32 = 1_000_000;

pub fn round_to_nearest_50(n: u32) -> u32 {
    (n + 25) / 50 * 50
}

/// Convert Kelvin to the nearest whole mired.
pub fn kelvin_to_mired(kelvin: u16) -> u16 {
    if kelvin == 0 {
        return 0;
    }
    let kelvin = u32::from(kelvin);
    narrow((MIRED_SCALE + kelvin / 2) / kelvin)
}

/// Convert mired to Kelvin, rounded to the nearest 50K.
///
/// A reported mired of 0 yields 0 rather than dividing by zero.
pub fn mired_to_kelvin(mired: u16) -> u16 {
    if mired == 0 {
        return 0;
    }
    let mired = u32::from(mired);
    narrow(round_to_nearest_50((MIRED_SCALE + mired / 2) / mired))
}

fn narrow(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

pub fn validate_brightness(brightness: i64) -> Result<u8, AppError> {
    if !(0..=i64::from(MAX_BRIGHTNESS)).contains(&brightness) {
        return Err(AppError::InvalidInput(
            "brightness must be between 0 and 100".into(),
        ));
    }
    u8::try_from(brightness).map_err(|e| AppError::InvalidInput(e.to_string()))
}

pub fn validate_temperature(kelvin: i64) -> Result<u16, AppError> {
    if !(i64::from(MIN_KELVIN)..=i64::from(MAX_KELVIN)).contains(&kelvin) {
        return Err(AppError::InvalidInput(
            "temperature must be between 2900K and 7000K".into(),
        ));
    }
    u16::try_from(kelvin).map_err(|e| AppError::InvalidInput(e.to_string()))
}

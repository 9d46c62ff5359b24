use crate::api::client::{KeyLightClient, Operation};
use crate::cli::report::report;
use crate::cli::targets_or_notify;
use crate::config::RuntimeConfig;
use crate::dispatch::dispatch_with_progress;
use crate::error::AppError;
use crate::models::color_temp::{validate_brightness, validate_temperature};
use crate::models::{Device, LightSettings};

/// Build the settings for `on`, validating levels before anything is sent.
pub fn on_settings(
    brightness: Option<i64>,
    temperature: Option<i64>,
) -> Result<LightSettings, AppError> {
    Ok(LightSettings {
        power: true,
        brightness: brightness.map(validate_brightness).transpose()?,
        temperature_kelvin: temperature.map(validate_temperature).transpose()?,
    })
}

pub async fn handle_on(
    light: Option<&str>,
    brightness: Option<i64>,
    temperature: Option<i64>,
    devices: &[Device],
    client: &KeyLightClient,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let settings = on_settings(brightness, temperature)?;
    update(light, settings, devices, client, config).await
}

pub async fn handle_off(
    light: Option<&str>,
    devices: &[Device],
    client: &KeyLightClient,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    update(light, LightSettings::power(false), devices, client, config).await
}

async fn update(
    light: Option<&str>,
    settings: LightSettings,
    devices: &[Device],
    client: &KeyLightClient,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let Some(targets) = targets_or_notify(devices, light)? else {
        return Ok(());
    };

    let operation = Operation::Write(settings);
    let outcomes = dispatch_with_progress(client, &targets, &operation).await;
    report(&operation, &outcomes, config.output_mode);
    Ok(())
}

use crate::api::client::{KeyLightClient, Operation};
use crate::cli::report::report;
use crate::cli::targets_or_notify;
use crate::config::RuntimeConfig;
use crate::dispatch::dispatch_with_progress;
use crate::error::AppError;
use crate::models::Device;

pub async fn handle(
    light: Option<&str>,
    devices: &[Device],
    client: &KeyLightClient,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let Some(targets) = targets_or_notify(devices, light)? else {
        return Ok(());
    };

    let operation = Operation::Read;
    let outcomes = dispatch_with_progress(client, &targets, &operation).await;
    report(&operation, &outcomes, config.output_mode);
    Ok(())
}

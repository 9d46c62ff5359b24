use crate::error::AppError;
use crate::models::Device;

/// Find a configured light by exact name.
pub fn find_device<'a>(devices: &'a [Device], name: &str) -> Option<&'a Device> {
    devices.iter().find(|d| d.name == name)
}

/// Comma-separated list of configured light names, in config order.
pub fn available_names(devices: &[Device]) -> String {
    devices
        .iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pick the lights a command targets: one by name, or all of them.
pub fn select_devices(devices: &[Device], name: Option<&str>) -> Result<Vec<Device>, AppError> {
    match name {
        None => Ok(devices.to_vec()),
        Some(name) => find_device(devices, name)
            .map(|d| vec![d.clone()])
            .ok_or_else(|| AppError::DeviceNotFound {
                name: name.to_string(),
                available: available_names(devices),
            }),
    }
}

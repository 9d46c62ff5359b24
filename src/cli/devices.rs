use serde_json::json;
use tabled::Tabled;

use crate::cli::output::{print_json, print_table};
use crate::config::{OutputMode, RuntimeConfig};
use crate::models::Device;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ADDRESS")]
    address: String,
}

/// Print the configured lights. No network calls are made.
pub fn handle_list(devices: &[Device], config: &RuntimeConfig) {
    if config.output_mode == OutputMode::Table {
        let rows: Vec<DeviceRow> = devices
            .iter()
            .map(|d| DeviceRow {
                name: d.name.clone(),
                address: d.address.clone(),
            })
            .collect();
        print_table(&rows);
    } else {
        let json_devices: Vec<serde_json::Value> = devices
            .iter()
            .map(|d| {
                json!({
                    "name": d.name,
                    "address": d.address,
                    "url": d.lights_url(),
                })
            })
            .collect();
        print_json(&json!(json_devices));
    }
}

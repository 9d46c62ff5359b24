//! Per-light rendering of dispatch outcomes for batch commands.

use serde_json::json;
use tabled::Tabled;

use crate::api::client::Operation;
use crate::cli::output::{print_json, print_table};
use crate::config::OutputMode;
use crate::dispatch::Outcome;

#[derive(Tabled)]
pub struct OutcomeRow {
    #[tabled(rename = "LIGHT")]
    light: String,
    #[tabled(rename = "POWER")]
    power: String,
    #[tabled(rename = "BRIGHTNESS")]
    brightness: String,
    #[tabled(rename = "TEMPERATURE")]
    temperature: String,
    #[tabled(rename = "ERROR")]
    error: String,
}

pub fn format_on_off(power: bool) -> &'static str {
    if power {
        "ON"
    } else {
        "OFF"
    }
}

pub fn outcome_json(operation: &Operation, outcome: &Outcome) -> serde_json::Value {
    let op = operation.verb().to_lowercase();
    match &outcome.result {
        Ok(state) => json!({
            "light": outcome.device.name,
            "operation": op,
            "status": "ok",
            "power": format_on_off(state.power).to_lowercase(),
            "brightness": state.brightness,
            "temperature_kelvin": state.temperature_kelvin,
            "temperature_mired": state.temperature_mired(),
        }),
        Err(kind) => json!({
            "light": outcome.device.name,
            "operation": op,
            "status": "error",
            "error": kind.as_str(),
            "message": kind.message(),
        }),
    }
}

pub fn outcome_row(operation: &Operation, outcome: &Outcome) -> OutcomeRow {
    let light = outcome.device.name.clone();
    match &outcome.result {
        Ok(state) => OutcomeRow {
            light,
            power: format_on_off(state.power).to_string(),
            brightness: format!("{}%", state.brightness),
            temperature: format!(
                "{}K (mired: {})",
                state.temperature_kelvin,
                state.temperature_mired()
            ),
            error: String::new(),
        },
        Err(kind) => OutcomeRow {
            light,
            power: "-".into(),
            brightness: "-".into(),
            temperature: "-".into(),
            error: format!("{} failed: {}", operation.verb(), kind.message()),
        },
    }
}

/// Print one entry per light, in the order the outcomes arrived.
pub fn report(operation: &Operation, outcomes: &[Outcome], mode: OutputMode) {
    match mode {
        OutputMode::Json => {
            let entries: Vec<_> = outcomes
                .iter()
                .map(|o| outcome_json(operation, o))
                .collect();
            print_json(&json!(entries));
        }
        OutputMode::Table => {
            let rows: Vec<_> = outcomes
                .iter()
                .map(|o| outcome_row(operation, o))
                .collect();
            print_table(&rows);
        }
    }
}

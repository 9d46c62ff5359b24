//! Fan one operation out to many lights and collect one outcome per light.

use std::collections::HashMap;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::api::client::{LightTransport, Operation};
use crate::classify::{classify, ErrorKind};
use crate::models::{Device, DeviceState};

const SPINNER_TICK: std::time::Duration = std::time::Duration::from_millis(100);

/// Result of one dispatched call, tagged with the light it was sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub device: Device,
    pub result: Result<DeviceState, ErrorKind>,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run `operation` against every device concurrently.
///
/// Returns once every device has reported, with outcomes in completion
/// order. One device failing never affects another's call. A worker that
/// panics still produces an `Unknown` outcome for its own device.
pub async fn dispatch<T: LightTransport>(
    transport: &T,
    devices: &[Device],
    operation: &Operation,
) -> Vec<Outcome> {
    let mut tasks = JoinSet::new();
    let mut in_flight = HashMap::with_capacity(devices.len());

    for device in devices {
        let transport = transport.clone();
        let operation = *operation;
        let target = device.clone();

        let handle = tasks.spawn(async move {
            let result = transport
                .execute(&target, &operation)
                .await
                .map_err(|err| {
                    debug!(light = %target.name, error = %err, "light call failed");
                    classify(&err)
                });
            Outcome {
                device: target,
                result,
            }
        });
        in_flight.insert(handle.id(), device.clone());
    }

    let mut outcomes = Vec::with_capacity(devices.len());
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((id, outcome)) => {
                in_flight.remove(&id);
                outcomes.push(outcome);
            }
            Err(err) => {
                if let Some(device) = in_flight.remove(&err.id()) {
                    warn!(light = %device.name, error = %err, "light worker did not finish");
                    outcomes.push(Outcome {
                        device,
                        result: Err(ErrorKind::Unknown),
                    });
                }
            }
        }
    }

    outcomes
}

/// [`dispatch`] with a spinner on stderr that stops when every light has reported.
pub async fn dispatch_with_progress<T: LightTransport>(
    transport: &T,
    devices: &[Device],
    operation: &Operation,
) -> Vec<Outcome> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().tick_strings(&["|", "/", "-", "\\", ""]),
    );
    spinner.enable_steady_tick(SPINNER_TICK);

    let outcomes = dispatch(transport, devices, operation).await;

    spinner.finish_and_clear();
    outcomes
}

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use super::errors::TransportError;
use super::response::LightStatus;
use super::retry::RetryPolicy;
use crate::config::ClientSettings;
use crate::error::AppError;
use crate::models::{Device, DeviceState, LightSettings};

pub const LIGHTS_PATH: &str = "/elgato/lights";

const USER_AGENT: &str = concat!("keylight/", env!("CARGO_PKG_VERSION"));

/// What to do with a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write(LightSettings),
}

impl Operation {
    /// Label used when reporting the outcome of this operation.
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Read => "Status",
            Operation::Write(_) => "Update",
        }
    }
}

/// Anything that can carry an [`Operation`] to a light and report its state.
///
/// Implemented by [`KeyLightClient`]; the fan-out and the dashboard only
/// depend on this so they can be driven without a network.
pub trait LightTransport: Clone + Send + Sync + 'static {
    fn execute(
        &self,
        device: &Device,
        operation: &Operation,
    ) -> impl Future<Output = Result<DeviceState, TransportError>> + Send;
}

/// HTTP client for the local light control endpoint.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct KeyLightClient {
    client: reqwest::Client,
    retry: RetryPolicy,
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Transport(TransportError::Http(e)))
}

impl KeyLightClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, AppError> {
        let client = build_http_client(settings.timeout())?;
        Ok(Self::with_client(client, settings.retry_policy()))
    }

    pub fn with_client(client: reqwest::Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// One attempt, no retry.
    pub async fn call(
        &self,
        device: &Device,
        operation: &Operation,
    ) -> Result<DeviceState, TransportError> {
        let status = match operation {
            Operation::Read => self.get_light(device).await?,
            Operation::Write(settings) => self.put_light(device, settings).await?,
        };

        let detail = status.first().ok_or(TransportError::EmptyResponse)?;
        Ok(DeviceState::from_detail(detail))
    }

    /// [`call`](Self::call) wrapped in the client's retry policy.
    pub async fn call_with_retry(
        &self,
        device: &Device,
        operation: &Operation,
    ) -> Result<DeviceState, TransportError> {
        self.retry.run(|| self.call(device, operation)).await
    }

    async fn get_light(&self, device: &Device) -> Result<LightStatus, TransportError> {
        let url = device.lights_url();
        debug!(light = %device.name, %url, "GET");

        let response = self.client.get(&url).send().await?;
        let body = response.bytes().await?;
        let status: LightStatus = serde_json::from_slice(&body)?;

        debug!(light = %device.name, lights = status.lights.len(), "GET ok");
        Ok(status)
    }

    async fn put_light(
        &self,
        device: &Device,
        settings: &LightSettings,
    ) -> Result<LightStatus, TransportError> {
        let url = device.lights_url();
        let body_json = serde_json::to_string(&LightStatus::single(settings.to_detail()))?;
        debug!(light = %device.name, %url, body = %body_json, "PUT");

        let response = self
            .client
            .put(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(body_json)
            .send()
            .await?;

        let code = response.status();
        if code != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: code.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let status: LightStatus = serde_json::from_slice(&body)?;
        debug!(light = %device.name, lights = status.lights.len(), "PUT ok");
        Ok(status)
    }
}

impl LightTransport for KeyLightClient {
    fn execute(
        &self,
        device: &Device,
        operation: &Operation,
    ) -> impl Future<Output = Result<DeviceState, TransportError>> + Send {
        self.call_with_retry(device, operation)
    }
}

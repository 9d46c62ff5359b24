use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::api::retry::RetryPolicy;
use crate::error::AppError;
use crate::models::Device;

const CONFIG_FILE_NAME: &str = ".keylight.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Table,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub output_mode: OutputMode,
    pub verbose: bool,
}

/// Contents of the lights config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub lights: Vec<Device>,
    #[serde(default)]
    pub client: ClientSettings,
}

/// Per-call timeout and retry tuning for the light client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 3000,
            max_attempts: 3,
            retry_delay_ms: 100,
        }
    }
}

impl ClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }
}

/// `$HOME/.keylight.toml`, if a home directory can be found.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

impl FileConfig {
    pub fn parse(contents: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&contents)
    }

    /// Load from `path`, or from the default location when none is given.
    pub fn load_or_default_path(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let path = default_config_path().ok_or_else(|| {
                    AppError::Config("Could not determine home directory".into())
                })?;
                Self::load(&path)
            }
        }
    }
}

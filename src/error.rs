use crate::api::errors::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Light with name '{name}' not found. Available lights: {available}")]
    DeviceNotFound { name: String, available: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::Toml(_) => 2,
            AppError::InvalidInput(_) => 3,
            _ => 1,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::DeviceNotFound { .. } => "device_not_found",
            AppError::Transport(_) => "transport",
            AppError::Json(_) => "json",
            AppError::Toml(_) => "toml",
            AppError::Io(_) => "io",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.error_type(),
            "message": self.to_string(),
        })
    }
}

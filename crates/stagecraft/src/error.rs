use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config YAML: {message}")]
    ParseYaml { message: String },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {0}")]
    Validation(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseYaml {
            message: err.to_string(),
        }
    }
}

/// Errors returned while rendering Argo CD manifests.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The environment has no Argo CD configuration at all.
    #[error("no ArgoCd configured for environment {environment}")]
    Configuration { environment: String },

    #[error("Failed to serialize YAML: {0}")]
    SerializeYaml(String),
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        RenderError::SerializeYaml(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to install log bridge: {0}")]
    LogBridge(String),

    #[error("Failed to install tracing subscriber: {0}")]
    Subscriber(String),
}

use std::collections::HashMap;

use crate::config::schema::{EnvironmentConfig, RenderOptions};
use crate::error::ConfigError;

/// Parses a single environment's `config.json`.
pub fn parse_environment_config(content: &str) -> Result<EnvironmentConfig, ConfigError> {
    let config: EnvironmentConfig = serde_json::from_str(content)?;
    Ok(config)
}

/// Parses a YAML mapping of environment name to configuration.
pub fn parse_environments(content: &str) -> Result<HashMap<String, EnvironmentConfig>, ConfigError> {
    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }
    let envs: HashMap<String, EnvironmentConfig> = serde_yaml::from_str(content)?;
    log::debug!("Parsed {} environment configs", envs.len());
    Ok(envs)
}

pub fn parse_render_options(content: &str) -> Result<RenderOptions, ConfigError> {
    if content.trim().is_empty() {
        return Ok(RenderOptions::default());
    }
    let options: RenderOptions = serde_yaml::from_str(content)?;
    Ok(options)
}

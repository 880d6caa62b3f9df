//! Configuration file loading and validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::EmberConfig;

/// Name of the configuration file within a project directory.
pub const CONFIG_FILE: &str = "ember.toml";

/// Loads and validates `ember.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<EmberConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Like [`load_config`], but a missing file yields the default configuration.
pub fn load_config_or_default(project_dir: &Path) -> Result<EmberConfig, ConfigError> {
    match load_config(project_dir) {
        Err(ConfigError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(EmberConfig::default())
        }
        other => other,
    }
}

/// Parses and validates an `ember.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<EmberConfig, ConfigError> {
    let config: EmberConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that the cache root is set and every mirror list is usable.
fn validate_config(config: &EmberConfig) -> Result<(), ConfigError> {
    if config.cache.root.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "cache.root must not be empty".to_string(),
        ));
    }
    for (host, mirrors) in &config.mirrors {
        if mirrors.0.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "mirrors.\"{host}\" has no mirror hosts"
            )));
        }
        if let Some(bad) = mirrors
            .0
            .iter()
            .find(|m| m.is_empty() || m.contains(|c: char| c.is_whitespace() || c == '/'))
        {
            return Err(ConfigError::ValidationError(format!(
                "mirrors.\"{host}\" contains invalid host '{bad}'"
            )));
        }
    }
    Ok(())
}

//! Core configuration traits

use crate::CugError;
use std::path::Path;

/// Layered configuration: file, then environment, then explicit overrides
pub trait ConfigLayer: Clone + Default + Send + Sync + 'static {
    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> Result<Self, CugError>;

    /// Merge with environment variables
    fn merge_with_env(&mut self) -> Result<(), CugError>;

    /// Merge with another configuration
    fn merge_with(&mut self, other: &Self) -> Result<(), CugError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), CugError>;

    /// Set a configuration value from a string (for CLI parsing)
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), CugError>;
}

/// Read a TOML or JSON file, picking the format from the extension
pub fn read_config_file<T>(path: &Path) -> Result<T, CugError>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path).map_err(|e| {
        CugError::config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(toml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => Err(CugError::config(format!(
            "Unsupported config file format: {}",
            path.display()
        ))),
    }
}

//! Registry configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings for constructing a [`Registry`](crate::Registry) and the demo runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// First id handed out by `next_id`.
    #[serde(default)]
    pub first_id: i64,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            first_id: 0,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

impl RegistryConfig {
    /// Load configuration, picking the format from the file extension.
    /// Anything that is not `.json` is read as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(path),
            _ => Self::from_yaml(path),
        }
    }

    /// Load configuration from YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: RegistryConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: RegistryConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_id < 0 {
            return Err(ConfigError::Validation(format!(
                "first_id must be non-negative, got {}",
                self.first_id
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();

        assert_eq!(config.first_id, 0);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RegistryConfig = serde_yaml::from_str("first_id: 10\n").unwrap();

        assert_eq!(config.first_id, 10);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = RegistryConfig {
            first_id: 42,
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.yaml");
        config.to_yaml(&path).unwrap();

        let loaded = RegistryConfig::load(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(&path, r#"{ "logging": { "level": "warn" } }"#).unwrap();

        let config = RegistryConfig::load(&path).unwrap();
        assert_eq!(config.first_id, 0);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_negative_first_id_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.yaml");
        std::fs::write(&path, "first_id: -5\n").unwrap();

        let err = RegistryConfig::from_yaml(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RegistryConfig::load("/nonexistent/registry.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

//! Configuration management

use crate::error::{ErrorContext, NavalhubError, NavalhubResult};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavalhubConfig {
    pub session: SessionSettings,
    pub logging: LoggingConfig,
}

/// Session lifecycle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Stand-in credential check latency in milliseconds
    pub login_delay_ms: u64,
    /// Origin the durable session record is scoped to
    pub origin: String,
    /// Directory holding per-origin session records
    pub storage_dir: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            login_delay_ms: 500,
            origin: "navalhub".to_string(),
            storage_dir: "~/.navalhub/sessions".to_string(),
        }
    }
}

impl SessionSettings {
    /// Resolve `storage_dir`, expanding a leading `~` to the home directory
    pub fn expand_storage_dir(&self) -> PathBuf {
        match self.storage_dir.strip_prefix('~') {
            Some(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
                None => PathBuf::from(&self.storage_dir),
            },
            None => PathBuf::from(&self.storage_dir),
        }
    }
}

impl NavalhubConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> NavalhubResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| NavalhubError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: NavalhubConfig = toml::from_str(&content).map_err(|e| NavalhubError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> NavalhubResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| NavalhubError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| NavalhubError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> NavalhubResult<()> {
        if self.session.origin.trim().is_empty() {
            return Err(NavalhubError::Config {
                message: "Session origin must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set session.origin to the application origin"),
            });
        }

        if self.session.storage_dir.trim().is_empty() {
            return Err(NavalhubError::Config {
                message: "Session storage_dir must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set session.storage_dir to a writable directory"),
            });
        }

        if self.logging.log_to_file && self.logging.log_file_path.is_none() {
            return Err(NavalhubError::Config {
                message: "logging.log_file_path is required when log_to_file is set".to_string(),
                source: None,
                context: ErrorContext::new("config").with_operation("validate"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NavalhubConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.login_delay_ms, 500);
    }

    #[test]
    fn test_empty_origin_rejected() {
        let mut config = NavalhubConfig::default();
        config.session.origin = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(NavalhubError::Config { .. })
        ));
    }

    #[test]
    fn test_expand_storage_dir_without_tilde() {
        let settings = SessionSettings {
            storage_dir: "/var/lib/navalhub".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.expand_storage_dir(),
            PathBuf::from("/var/lib/navalhub")
        );
    }
}

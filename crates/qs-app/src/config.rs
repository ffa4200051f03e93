//! Deployment configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Default per-input payload bound: 16 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// Settings read once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Upper bound on each uploaded payload.
    pub max_input_bytes: u64,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Pretty-print JSON reports.
    pub pretty_json: bool,
    /// Report store used when none is given on the command line.
    pub store_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            log_filter: "info".to_string(),
            pretty_json: true,
            store_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::InputRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let config: AppConfig = if content.trim().is_empty() {
            AppConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.max_input_bytes == 0 {
            return Err(AppError::Config(
                "max_input_bytes must be greater than zero".to_string(),
            ));
        }
        if self.log_filter.trim().is_empty() {
            return Err(AppError::Config("log_filter must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = AppConfig::from_yaml("max_input_bytes: 1024\nstore_dir: /tmp/qs\n").unwrap();
        assert_eq!(config.max_input_bytes, 1024);
        assert_eq!(config.store_dir, Some(PathBuf::from("/tmp/qs")));
        assert_eq!(config.log_filter, "info");
        assert!(config.pretty_json);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            AppConfig::from_yaml("max_input_bytes: 0\n"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_yaml("log_filter: '  '\n"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_yaml("unknown_key: 1\n"),
            Err(AppError::Config(_))
        ));
    }
}

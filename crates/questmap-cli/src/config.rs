//! Configuration for the questmap command-line tool
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! environment variables prefixed with `QUESTMAP__` (nested keys separated
//! by `__`, e.g. `QUESTMAP__LAYOUT__MIN_DISTANCE=140`).

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use questmap_core::{LayoutConfig, LayoutConfigError, LockPolicy, XpRules};
use questmap_monitoring::{LogFormat, MonitoringConfig};

/// File read from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "questmap.yaml";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "QUESTMAP";

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file or environment could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// An explicitly requested file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Layout constants out of range
    #[error(transparent)]
    Layout(#[from] LayoutConfigError),

    /// Any other invalid value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level filter used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Console log format
    pub log_format: LogFormat,

    /// Optional log file, rotated daily
    pub log_file: Option<PathBuf>,

    /// Layout constants
    pub layout: LayoutConfig,

    /// Experience rules
    pub xp: XpRules,

    /// Lock rule
    pub lock_policy: LockPolicy,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            log_format: LogFormat::Pretty,
            log_file: None,
            layout: LayoutConfig::default(),
            xp: XpRules::default(),
            lock_policy: LockPolicy::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from the given or default file and the process
    /// environment
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(file, None)
    }

    /// Load configuration with an explicit environment map instead of the
    /// process environment when `env` is `Some`
    pub fn load_from(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        builder = match file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::MissingFile(path.to_path_buf()));
                }
                builder.add_source(File::from(path).format(FileFormat::Yaml).required(true))
            }
            None => builder.add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false)),
        };

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__").source(env));

        let config: CliConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(file = ?file, lock_policy = ?config.lock_policy, "Configuration loaded");
        Ok(config)
    }

    /// Check every value
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        if self.xp.score_bonus_divisor == 0 {
            return Err(ConfigError::Invalid("xp.score_bonus_divisor must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Logging settings for the monitoring crate
    pub fn monitoring(&self) -> MonitoringConfig {
        MonitoringConfig {
            service_name: "questmap".to_string(),
            log_filter: self.log_filter.clone(),
            log_format: self.log_format,
            log_file: self.log_file.clone(),
        }
    }
}

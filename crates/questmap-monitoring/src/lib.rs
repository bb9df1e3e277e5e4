//! Logging and metrics events for Questmap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogExt};

/// Output format for console logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}', expected 'pretty' or 'json'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Configuration for initializing the monitoring system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Service name attached to the startup event
    pub service_name: String,
    /// Log level filter (e.g., "warn,questmap_core=debug"); `RUST_LOG` wins when set
    pub log_filter: String,
    /// Console log format
    pub log_format: LogFormat,
    /// Optional log file, rotated daily
    pub log_file: Option<PathBuf>,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            service_name: "questmap".to_string(),
            log_filter: "warn".to_string(),
            log_format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

/// Initialize monitoring system
pub fn init(config: &MonitoringConfig) -> anyhow::Result<()> {
    init_logging(config)?;
    info!(service_name = %config.service_name, "Monitoring initialized");
    Ok(())
}

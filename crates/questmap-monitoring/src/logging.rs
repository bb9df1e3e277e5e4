//! Structured logging module using tracing.
//!
//! Console output goes to stderr so that command output on stdout stays
//! machine-readable.

use anyhow::Context;
use std::path::Path;
use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{LogFormat, MonitoringConfig};

/// Initialize structured logging
pub fn init_logging(config: &MonitoringConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .with_context(|| format!("Invalid log filter '{}'", config.log_filter))?;

    let json_layer = (config.log_format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
    });

    let pretty_layer = (config.log_format == LogFormat::Pretty).then(|| {
        fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
    });

    // Daily-rotated JSON file next to the configured path
    let file_layer = config.log_file.as_ref().map(|log_file| {
        let directory = log_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let prefix = log_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "questmap.log".to_string());
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, prefix);

        fmt::layer()
            .json()
            .with_current_span(true)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(file_appender)
    });

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber).context("Failed to set global default subscriber")?;

    debug!(
        log_format = %config.log_format,
        log_file = ?config.log_file,
        "Logging initialized"
    );

    Ok(())
}

/// Trait to add log context to results
pub trait LogExt<T, E> {
    /// Log error with additional context before returning
    fn log_err(self, message: &str) -> Result<T, E>;

    /// Log success with additional context before returning
    fn log_ok(self, message: &str) -> Result<T, E>;
}

impl<T, E: std::fmt::Display> LogExt<T, E> for Result<T, E> {
    fn log_err(self, message: &str) -> Result<T, E> {
        if let Err(ref e) = self {
            tracing::error!("{}: {}", message, e);
        }
        self
    }

    fn log_ok(self, message: &str) -> Result<T, E> {
        if self.is_ok() {
            tracing::info!("{}", message);
        }
        self
    }
}

/// Initializes test tracing for unit tests
#[cfg(test)]
pub fn init_test_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .with_test_writer()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

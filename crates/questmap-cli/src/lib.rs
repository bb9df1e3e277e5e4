//! Questmap command-line front end.
//!
//! The binary in `main.rs` only parses arguments, loads [`config::CliConfig`],
//! initializes logging and prints what [`commands::run`] returns.

pub mod cli;
pub mod commands;
pub mod config;
pub mod loader;

pub use cli::{Cli, Commands};
pub use commands::run;
pub use config::{CliConfig, ConfigError};

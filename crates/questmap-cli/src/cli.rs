//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Validate, lay out and summarize learning roadmaps
#[derive(Parser, Debug)]
#[command(name = "questmap", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./questmap.yaml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse and validate a roadmap
    Validate {
        #[command(flatten)]
        roadmap: RoadmapArgs,
    },

    /// List the directions of a roadmap
    Directions {
        #[command(flatten)]
        roadmap: RoadmapArgs,
    },

    /// Print node coordinates and connectors
    Layout {
        #[command(flatten)]
        view: ViewArgs,

        /// Only lay out children of these nodes (repeatable); all nodes when omitted
        #[arg(long = "expand", value_name = "ID")]
        expand: Vec<i64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = LayoutFormat::Json)]
        format: LayoutFormat,
    },

    /// Summarize progress, experience and badges
    Status {
        #[command(flatten)]
        view: ViewArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = StatusFormat::Text)]
        format: StatusFormat,
    },

    /// Write the roadmap as a canonical YAML document
    Export {
        #[command(flatten)]
        roadmap: RoadmapArgs,

        /// Output file; stdout when omitted
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Where the roadmap comes from
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RoadmapArgs {
    /// Roadmap document (YAML/JSON) or API node list (JSON array); built-in roadmap when omitted
    #[arg(long, value_name = "FILE")]
    pub roadmap: Option<PathBuf>,
}

/// Roadmap, progress and direction selection
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ViewArgs {
    #[command(flatten)]
    pub roadmap: RoadmapArgs,

    /// Progress document (YAML) or API progress list (JSON array)
    #[arg(long, value_name = "FILE")]
    pub progress: Option<PathBuf>,

    /// Restrict to one direction
    #[arg(long, value_name = "DIRECTION")]
    pub direction: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    Json,
    Yaml,
    Outline,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFormat {
    Text,
    Json,
}

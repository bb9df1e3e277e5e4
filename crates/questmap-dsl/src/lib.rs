//! # Questmap DSL
//!
//! Roadmaps are authored as YAML documents: a list of directions, each with
//! nodes that point at their parent by key. This crate parses, validates and
//! resolves those documents into `questmap-core` nodes, reads progress
//! snapshots written against them, and regenerates documents from node
//! snapshots.
//!
//! ## Example
//!
//! ```
//! use questmap_dsl::parse_and_resolve_roadmap;
//!
//! let yaml = r#"
//! format_version: "1.0"
//! directions:
//!   - name: frontend
//!     nodes:
//!       - key: fe_root
//!         title: Frontend Adventurer
//!       - key: fe_html
//!         parent: fe_root
//!         title: HTML & Semantics
//!         checkpoint: true
//! "#;
//!
//! let roadmap = parse_and_resolve_roadmap(yaml).unwrap();
//! assert_eq!(roadmap.nodes().len(), 2);
//! assert_eq!(roadmap.id_of("fe_html").map(|id| id.0), Some(2));
//! ```

mod error;
mod parser;
mod utils;

pub mod api;
pub mod document;
pub mod progress;
pub mod validation;

pub use api::{nodes_to_api_json, parse_api_nodes, parse_api_progress};
pub use document::{DirectionDefinition, NodeDefinition, ResolvedRoadmap, RoadmapDocument};
pub use error::DslError;
pub use parser::{parse_progress_document, parse_roadmap_document, parse_roadmap_document_json};
pub use progress::{ProgressDocument, ProgressEntry};
pub use validation::ValidationError;

use questmap_core::ProgressRecord;

/// The built-in roadmap: frontend, backend, devops and career directions
pub const DEFAULT_ROADMAP_YAML: &str = include_str!("../assets/default_roadmap.yaml");

/// A sample progress snapshot against the built-in roadmap
pub const SAMPLE_PROGRESS_YAML: &str = include_str!("../assets/sample_progress.yaml");

/// Parse, validate and resolve a roadmap YAML string.
///
/// # Errors
///
/// * Invalid YAML syntax
/// * Unsupported format version
/// * Validation errors (all of them, each with a code and path)
///
/// ```
/// use questmap_dsl::parse_and_resolve_roadmap;
///
/// let invalid_yaml = r#"
/// format_version: "1.0"
/// directions:
///   - name: backend
///     nodes:
///       - key: be_api
///         parent: be_missing
///         title: API
/// "#;
///
/// let err = parse_and_resolve_roadmap(invalid_yaml).unwrap_err();
/// assert!(err.error_code().contains("INVALID_REFERENCE"));
/// ```
pub fn parse_and_resolve_roadmap(yaml_str: &str) -> Result<ResolvedRoadmap, DslError> {
    let document = parser::parse_roadmap_document(yaml_str)?;
    document.resolve()
}

/// Parse a progress YAML string and resolve it against a roadmap
pub fn parse_and_resolve_progress(yaml_str: &str, roadmap: &ResolvedRoadmap) -> Result<Vec<ProgressRecord>, DslError> {
    parser::parse_progress_document(yaml_str)?.resolve(roadmap)
}

/// The built-in roadmap, resolved
pub fn default_roadmap() -> Result<ResolvedRoadmap, DslError> {
    parse_and_resolve_roadmap(DEFAULT_ROADMAP_YAML)
}

/// The sample progress snapshot, resolved against the built-in roadmap
pub fn sample_progress(roadmap: &ResolvedRoadmap) -> Result<Vec<ProgressRecord>, DslError> {
    parse_and_resolve_progress(SAMPLE_PROGRESS_YAML, roadmap)
}

/// Returns a version string for the Questmap DSL crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

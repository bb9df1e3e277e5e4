mod export;
mod resolve;

pub use export::UNNAMED_DIRECTION;
pub use resolve::ResolvedRoadmap;

use serde::{Deserialize, Serialize};

/// The only document format version understood
pub const SUPPORTED_FORMAT_VERSION: &str = "1.0";

/// An authored roadmap document.
/// Nodes reference their parent by key; ids are optional and assigned on
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapDocument {
    /// The format version (e.g., "1.0")
    pub format_version: String,

    /// Directions in display order
    #[serde(default)]
    pub directions: Vec<DirectionDefinition>,
}

/// A named learning track and its nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionDefinition {
    /// Direction label shared by all its nodes (e.g. "frontend")
    #[serde(default)]
    pub name: String,

    /// Nodes in document order
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
}

/// One node as authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// Unique key within the document
    #[serde(default)]
    pub key: String,

    /// Explicit id; assigned sequentially when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Key of the parent node, absent for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Display description
    #[serde(default)]
    pub description: String,

    /// Reference links
    #[serde(default)]
    pub resources: Vec<String>,

    /// Milestone marker
    #[serde(default)]
    pub checkpoint: bool,
}

impl RoadmapDocument {
    /// An empty document of the supported version
    pub fn new() -> Self {
        Self {
            format_version: SUPPORTED_FORMAT_VERSION.to_string(),
            directions: Vec::new(),
        }
    }

    /// Every node with its direction index and node index, in document order
    pub fn nodes(&self) -> impl Iterator<Item = (usize, usize, &DirectionDefinition, &NodeDefinition)> + '_ {
        self.directions
            .iter()
            .enumerate()
            .flat_map(|(d, direction)| direction.nodes.iter().enumerate().map(move |(n, node)| (d, n, direction, node)))
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.directions.iter().map(|d| d.nodes.len()).sum()
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> Result<String, crate::DslError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String, crate::DslError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for RoadmapDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Path of a node inside a document, used in validation errors
pub(crate) fn node_path(direction: usize, node: usize) -> String {
    format!("directions[{}].nodes[{}]", direction, node)
}

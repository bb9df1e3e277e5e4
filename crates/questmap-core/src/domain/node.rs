use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a roadmap node, unique within one node set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId(id)
    }
}

/// A learning topic in the roadmap.
///
/// Nodes are read-only to the core. They arrive as an immutable snapshot from
/// the content service and are never edited here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapNode {
    /// Unique identifier
    pub id: NodeId,

    /// Display title
    pub title: String,

    /// Display description
    #[serde(default)]
    pub description: String,

    /// Marks a milestone node
    #[serde(default)]
    pub checkpoint: bool,

    /// Reference links, order preserved
    #[serde(default)]
    pub resources: Vec<String>,

    /// Category label (e.g. "frontend", "backend", "career")
    #[serde(default)]
    pub direction: String,

    /// Parent node; `None` makes this node a root
    #[serde(default)]
    pub parent_id: Option<NodeId>,
}

impl RoadmapNode {
    /// Create a node with the given id and title and empty optional fields
    pub fn new(id: impl Into<NodeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            checkpoint: false,
            resources: Vec::new(),
            direction: String::new(),
            parent_id: None,
        }
    }

    /// Set the parent of this node
    pub fn with_parent(mut self, parent_id: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the direction label of this node
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    /// Mark this node as a checkpoint
    pub fn as_checkpoint(mut self) -> Self {
        self.checkpoint = true;
        self
    }

    /// Whether this node is a root (has no parent reference)
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_decided_by_own_parent() {
        let root = RoadmapNode::new(1, "Root");
        let child = RoadmapNode::new(2, "Child").with_parent(1);

        assert!(root.is_root());
        assert!(!child.is_root());
    }

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"{
            "id": 7,
            "direction": "backend",
            "title": "Databases & SQL",
            "description": "Model data",
            "resources": ["https://www.sqltutorial.org/", "https://sqlbolt.com/"],
            "parent_id": 5,
            "checkpoint": true
        }"#;

        let node: RoadmapNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.id, NodeId(7));
        assert_eq!(node.parent_id, Some(NodeId(5)));
        assert!(node.checkpoint);
        assert_eq!(node.resources[1], "https://sqlbolt.com/");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let node: RoadmapNode = serde_json::from_str(r#"{"id": 1, "title": "Root", "parent_id": null}"#).unwrap();
        assert!(node.is_root());
        assert!(node.resources.is_empty());
        assert!(!node.checkpoint);
    }
}

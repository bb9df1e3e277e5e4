use std::fmt;
use thiserror::Error;

use crate::domain::NodeId;
use crate::layout::LayoutConfigError;

/// Error codes for roadmap construction errors
pub mod error_codes {
    /// Two nodes share an id
    pub const DUPLICATE_ID: &str = "ERR_ROADMAP_DUPLICATE_ID";

    /// A parent id does not resolve to any node
    pub const DANGLING_PARENT: &str = "ERR_ROADMAP_DANGLING_PARENT";

    /// A node is its own ancestor
    pub const CYCLE: &str = "ERR_ROADMAP_CYCLE";

    /// Layout constants out of range
    pub const INVALID_LAYOUT: &str = "ERR_ROADMAP_INVALID_LAYOUT";
}

/// Errors raised while building a forest from a node snapshot.
///
/// The structural variants signal malformed content data and are returned to
/// the caller unchanged; nothing is repaired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoadmapError {
    /// Two nodes in the input share an id
    #[error("Duplicate node ID: {0}")]
    DuplicateNodeId(NodeId),

    /// A node's parent id does not match any node in the input
    #[error("Node {node_id} references non-existent parent {parent_id}")]
    DanglingParentReference {
        /// The node holding the reference
        node_id: NodeId,
        /// The unresolved parent id
        parent_id: NodeId,
    },

    /// Walking up a parent chain returned to a node already on the chain
    #[error("Cycle detected in parent chain: {}", CycleFormat(.cycle))]
    CycleDetected {
        /// Nodes forming the cycle, each followed by its parent
        cycle: Vec<NodeId>,
    },

    /// The layout constants passed with a view are unusable
    #[error(transparent)]
    InvalidLayout(#[from] LayoutConfigError),
}

struct CycleFormat<'a>(&'a [NodeId]);

impl fmt::Display for CycleFormat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.0.first() else {
            return f.write_str("unknown cycle");
        };
        for id in self.0 {
            write!(f, "{} → ", id)?;
        }
        write!(f, "{}", first)
    }
}

impl RoadmapError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RoadmapError::DuplicateNodeId(_) => error_codes::DUPLICATE_ID,
            RoadmapError::DanglingParentReference { .. } => error_codes::DANGLING_PARENT,
            RoadmapError::CycleDetected { .. } => error_codes::CYCLE,
            RoadmapError::InvalidLayout(_) => error_codes::INVALID_LAYOUT,
        }
    }
}

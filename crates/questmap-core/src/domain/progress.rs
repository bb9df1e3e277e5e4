use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::{NodeId, RoadmapNode};

/// Completion state of a node for one user.
///
/// Variants are declared in progression order, so the derived ordering is
/// `NotStarted < InProgress < Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// No work recorded
    #[default]
    NotStarted,
    /// Work started but not finished
    InProgress,
    /// Node finished
    Completed,
}

impl ProgressStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "not_started",
            ProgressStatus::InProgress => "in_progress",
            ProgressStatus::Completed => "completed",
        }
    }

    /// Whether this status is `Completed`
    pub fn is_completed(&self) -> bool {
        matches!(self, ProgressStatus::Completed)
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of one user on one node, as supplied by the progress service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Node the record refers to
    pub node_id: NodeId,

    /// Completion state
    #[serde(default)]
    pub status: ProgressStatus,

    /// Experience points, meaningful for in-progress and completed nodes
    #[serde(default)]
    pub score: u32,
}

impl ProgressRecord {
    /// Create a record
    pub fn new(node_id: impl Into<NodeId>, status: ProgressStatus, score: u32) -> Self {
        Self {
            node_id: node_id.into(),
            status,
            score,
        }
    }
}

/// A roadmap node merged with its progress and derived lock state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedNode {
    /// The underlying content node
    #[serde(flatten)]
    pub node: RoadmapNode,

    /// Completion state, `NotStarted` when no record exists
    pub status: ProgressStatus,

    /// Score, `0` when no record exists
    pub score: u32,

    /// Whether the user may not access the node yet
    pub locked: bool,
}

impl EnrichedNode {
    /// Id of the underlying node
    pub fn id(&self) -> NodeId {
        self.node.id
    }
}

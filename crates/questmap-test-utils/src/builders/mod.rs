//! Fluent builders for node and progress snapshots.

use questmap_core::{Forest, NodeId, ProgressRecord, ProgressStatus, RoadmapError, RoadmapNode};

/// Builds a flat node list one node at a time.
///
/// Nodes take the direction most recently set with [`RoadmapBuilder::direction`].
#[derive(Debug, Clone, Default)]
pub struct RoadmapBuilder {
    nodes: Vec<RoadmapNode>,
    direction: String,
}

impl RoadmapBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction for the nodes added after this call
    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    /// Add a root node
    pub fn root(mut self, id: i64, title: &str) -> Self {
        self.nodes
            .push(RoadmapNode::new(id, title).with_direction(self.direction.clone()));
        self
    }

    /// Add a child of `parent`
    pub fn child(mut self, id: i64, parent: i64, title: &str) -> Self {
        self.nodes.push(
            RoadmapNode::new(id, title)
                .with_direction(self.direction.clone())
                .with_parent(parent),
        );
        self
    }

    /// Add children of `parent`, titled after their ids
    pub fn fan(mut self, parent: i64, children: &[i64]) -> Self {
        for &id in children {
            self = self.child(id, parent, &format!("Node {}", id));
        }
        self
    }

    /// Add a chain where every id is the child of the one before it.
    ///
    /// The first id becomes a root.
    pub fn chain(mut self, ids: &[i64]) -> Self {
        let mut parent = None;
        for &id in ids {
            let title = format!("Node {}", id);
            self = match parent {
                None => self.root(id, &title),
                Some(p) => self.child(id, p, &title),
            };
            parent = Some(id);
        }
        self
    }

    /// Mark an already added node as a checkpoint
    pub fn checkpoint(mut self, id: i64) -> Self {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == NodeId(id)) {
            node.checkpoint = true;
        }
        self
    }

    /// Nodes added so far
    pub fn nodes(&self) -> &[RoadmapNode] {
        &self.nodes
    }

    /// Take the node list
    pub fn build(self) -> Vec<RoadmapNode> {
        self.nodes
    }

    /// Build a forest from the node list
    pub fn forest(self) -> Result<Forest, RoadmapError> {
        Forest::from_nodes(self.nodes)
    }
}

/// Builds a progress snapshot
#[derive(Debug, Clone, Default)]
pub struct ProgressBuilder {
    records: Vec<ProgressRecord>,
}

impl ProgressBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed node
    pub fn completed(mut self, id: i64, score: u32) -> Self {
        self.records.push(ProgressRecord::new(id, ProgressStatus::Completed, score));
        self
    }

    /// Record a node in progress
    pub fn in_progress(mut self, id: i64, score: u32) -> Self {
        self.records.push(ProgressRecord::new(id, ProgressStatus::InProgress, score));
        self
    }

    /// Record an explicit not-started entry
    pub fn not_started(mut self, id: i64) -> Self {
        self.records.push(ProgressRecord::new(id, ProgressStatus::NotStarted, 0));
        self
    }

    /// Complete every id with the same score
    pub fn all_completed(mut self, ids: &[i64], score: u32) -> Self {
        for &id in ids {
            self = self.completed(id, score);
        }
        self
    }

    /// Take the records
    pub fn build(self) -> Vec<ProgressRecord> {
        self.records
    }
}

//! Merging progress records onto a forest.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::domain::{EnrichedNode, NodeId, ProgressRecord, ProgressStatus};
use crate::tree::{AsRoadmapNode, Forest};

/// Lookup of one user's progress records keyed by node id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressLedger {
    records: HashMap<NodeId, ProgressRecord>,
}

impl ProgressLedger {
    /// Build the lookup. When the snapshot holds more than one record for a
    /// node the last one wins.
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ProgressRecord>,
    {
        let mut lookup = HashMap::new();
        for record in records {
            if let Some(previous) = lookup.insert(record.node_id, record) {
                warn!(
                    node_id = %previous.node_id,
                    "Progress snapshot holds more than one record for a node, keeping the last"
                );
            }
        }
        Self { records: lookup }
    }

    /// A ledger with no records; every node reads as not started
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of distinct nodes with a record
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record for a node, if any
    pub fn record_for(&self, id: NodeId) -> Option<&ProgressRecord> {
        self.records.get(&id)
    }

    /// Status of a node, `NotStarted` without a record
    pub fn status_of(&self, id: NodeId) -> ProgressStatus {
        self.records.get(&id).map(|r| r.status).unwrap_or_default()
    }

    /// Score of a node, `0` without a record
    pub fn score_of(&self, id: NodeId) -> u32 {
        self.records.get(&id).map(|r| r.score).unwrap_or(0)
    }

    /// Ids of records that match no node in the forest, sorted
    pub fn unmatched<T: AsRoadmapNode>(&self, forest: &Forest<T>) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .records
            .keys()
            .filter(|id| !forest.contains(**id))
            .copied()
            .collect();
        ids.sort();
        ids
    }

    /// Tag every node of the forest with its status and score.
    ///
    /// The result has the same shape as the input. Lock state is left
    /// `false`; the unlock engine derives it.
    pub fn merge<T: AsRoadmapNode>(&self, forest: &Forest<T>) -> Forest<EnrichedNode> {
        let enriched = forest.map(|entry| {
            let node = entry.roadmap_node();
            EnrichedNode {
                node: node.clone(),
                status: self.status_of(node.id),
                score: self.score_of(node.id),
                locked: false,
            }
        });

        debug!(
            node_count = enriched.len(),
            record_count = self.records.len(),
            "Merged progress onto forest"
        );

        enriched
    }
}

impl FromIterator<ProgressRecord> for ProgressLedger {
    fn from_iter<I: IntoIterator<Item = ProgressRecord>>(iter: I) -> Self {
        Self::new(iter)
    }
}

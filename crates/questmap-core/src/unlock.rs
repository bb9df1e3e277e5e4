//! Lock state derivation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{EnrichedNode, ProgressStatus};
use crate::tree::Forest;

/// Rule deciding which nodes a user may access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockPolicy {
    /// A non-root node is locked while its parent is locked or not completed
    #[default]
    ParentCompletion,
    /// Nothing is ever locked
    Unrestricted,
}

/// Computes lock state for every node of an enriched forest
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlockEngine {
    policy: LockPolicy,
}

impl UnlockEngine {
    /// Create an engine using the given policy
    pub fn new(policy: LockPolicy) -> Self {
        Self { policy }
    }

    /// The policy this engine applies
    pub fn policy(&self) -> LockPolicy {
        self.policy
    }

    /// Return the forest with `locked` set on every node.
    ///
    /// Roots are never locked. Under [`LockPolicy::ParentCompletion`] a child
    /// is locked when its parent is locked or its parent's status is not
    /// `completed`. Nodes are visited breadth-first so each parent is resolved
    /// before its children.
    pub fn apply(&self, mut forest: Forest<EnrichedNode>) -> Forest<EnrichedNode> {
        let order = forest.topology().breadth_first().to_vec();
        let parents: Vec<Option<usize>> = order.iter().map(|&i| forest.topology().parent(i)).collect();

        let nodes = forest.nodes_mut();
        let mut locked_count = 0usize;
        for (&i, parent) in order.iter().zip(parents) {
            let locked = match (self.policy, parent) {
                (_, None) => false,
                (LockPolicy::Unrestricted, Some(_)) => false,
                (LockPolicy::ParentCompletion, Some(p)) => {
                    nodes[p].locked || nodes[p].status != ProgressStatus::Completed
                }
            };
            nodes[i].locked = locked;
            if locked {
                locked_count += 1;
            }
        }

        debug!(policy = ?self.policy, locked_count, "Derived lock state");
        forest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NodeId, ProgressRecord, RoadmapNode};
    use crate::ledger::ProgressLedger;

    fn chain() -> Forest {
        Forest::from_nodes(vec![
            RoadmapNode::new(1, "A"),
            RoadmapNode::new(2, "B").with_parent(1),
            RoadmapNode::new(3, "C").with_parent(2),
        ])
        .unwrap()
    }

    fn locked(forest: &Forest<EnrichedNode>, id: i64) -> bool {
        forest.get(NodeId(id)).unwrap().locked
    }

    fn run(records: Vec<ProgressRecord>) -> Forest<EnrichedNode> {
        let enriched = ProgressLedger::new(records).merge(&chain());
        UnlockEngine::default().apply(enriched)
    }

    #[test]
    fn test_child_locked_until_parent_completed() {
        let forest = run(vec![]);
        assert!(!locked(&forest, 1));
        assert!(locked(&forest, 2));

        let forest = run(vec![ProgressRecord::new(1, ProgressStatus::Completed, 0)]);
        assert!(!locked(&forest, 2));
    }

    #[test]
    fn test_in_progress_parent_still_locks() {
        let forest = run(vec![ProgressRecord::new(1, ProgressStatus::InProgress, 10)]);
        assert!(locked(&forest, 2));
    }

    #[test]
    fn test_lock_propagates_down() {
        // B completed but locked because A is not: C stays locked
        let forest = run(vec![ProgressRecord::new(2, ProgressStatus::Completed, 0)]);
        assert!(locked(&forest, 2));
        assert!(locked(&forest, 3));

        let forest = run(vec![
            ProgressRecord::new(1, ProgressStatus::Completed, 0),
            ProgressRecord::new(2, ProgressStatus::Completed, 0),
        ]);
        assert!(!locked(&forest, 3));
    }

    #[test]
    fn test_roots_never_locked() {
        let forest = Forest::from_nodes(vec![RoadmapNode::new(1, "A"), RoadmapNode::new(2, "B")]).unwrap();
        let enriched = UnlockEngine::default().apply(ProgressLedger::empty().merge(&forest));
        assert!(enriched.iter().all(|n| !n.locked));
    }

    #[test]
    fn test_siblings_share_parent_state() {
        let forest = Forest::from_nodes(vec![
            RoadmapNode::new(1, "A"),
            RoadmapNode::new(2, "B").with_parent(1),
            RoadmapNode::new(3, "C").with_parent(1),
        ])
        .unwrap();
        let ledger = ProgressLedger::new(vec![
            ProgressRecord::new(1, ProgressStatus::Completed, 0),
            ProgressRecord::new(2, ProgressStatus::Completed, 0),
        ]);
        let enriched = UnlockEngine::default().apply(ledger.merge(&forest));

        assert!(!enriched.get(NodeId(2)).unwrap().locked);
        assert!(!enriched.get(NodeId(3)).unwrap().locked);
    }

    #[test]
    fn test_unrestricted_policy() {
        let enriched = ProgressLedger::empty().merge(&chain());
        let forest = UnlockEngine::new(LockPolicy::Unrestricted).apply(enriched);
        assert!(forest.iter().all(|n| !n.locked));
    }

    #[test]
    fn test_policy_wire_names() {
        let policy: LockPolicy = serde_json::from_str("\"unrestricted\"").unwrap();
        assert_eq!(policy, LockPolicy::Unrestricted);
        assert_eq!(LockPolicy::default(), LockPolicy::ParentCompletion);
    }
}

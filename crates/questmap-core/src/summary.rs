use serde::{Deserialize, Serialize};

use crate::domain::{EnrichedNode, ProgressStatus};
use crate::rewards::{Badge, XpRules};
use crate::tree::Forest;

/// Aggregate progress over an enriched forest
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Number of nodes
    pub total: usize,
    /// Nodes completed
    pub completed: usize,
    /// Nodes in progress
    pub in_progress: usize,
    /// Nodes not started
    pub not_started: usize,
    /// Nodes currently locked
    pub locked: usize,
    /// Checkpoint nodes
    pub checkpoints: usize,
    /// Checkpoint nodes completed
    pub checkpoints_completed: usize,
    /// Sum of recorded scores
    pub total_score: u64,
    /// Completed share of all nodes, 0 to 100
    pub completion_percent: f64,
    /// Experience implied by the completed nodes
    pub experience: u32,
    /// Badges held at that experience
    pub badges: Vec<Badge>,
}

impl ProgressSummary {
    /// Count statuses, locks and checkpoints and derive experience
    pub fn from_forest(forest: &Forest<EnrichedNode>, rules: &XpRules) -> Self {
        let mut summary = ProgressSummary {
            total: forest.len(),
            ..Self::default()
        };

        for node in forest {
            match node.status {
                ProgressStatus::Completed => summary.completed += 1,
                ProgressStatus::InProgress => summary.in_progress += 1,
                ProgressStatus::NotStarted => summary.not_started += 1,
            }
            if node.locked {
                summary.locked += 1;
            }
            if node.node.checkpoint {
                summary.checkpoints += 1;
                if node.status.is_completed() {
                    summary.checkpoints_completed += 1;
                }
            }
            summary.total_score += u64::from(node.score);
        }

        if summary.total > 0 {
            summary.completion_percent = summary.completed as f64 * 100.0 / summary.total as f64;
        }
        summary.experience = rules.experience(forest);
        summary.badges = Badge::earned(summary.experience);
        summary
    }
}

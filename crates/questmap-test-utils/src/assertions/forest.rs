//! Assertions over enriched forests.

use questmap_core::{EnrichedNode, Forest, NodeId, ProgressStatus};
use thiserror::Error;

/// Error type for forest validation failures
#[derive(Debug, Error, PartialEq)]
pub enum ForestValidationError {
    #[error("Node {id}: expected locked={expected}, got locked={actual}")]
    LockMismatch { id: NodeId, expected: bool, actual: bool },

    #[error("Node {id}: parent {parent} is missing from the forest")]
    ParentMissing { id: NodeId, parent: NodeId },

    #[error("Node {id}: depth {depth} does not follow parent depth {parent_depth}")]
    DepthMismatch { id: NodeId, depth: usize, parent_depth: usize },
}

/// Asserts that lock state follows the parent-completion rule: roots are
/// open, and a child is locked iff its parent is locked or not completed.
///
/// # Arguments
///
/// * `forest` - Enriched forest after the unlock pass
pub fn assert_lock_rule(forest: &Forest<EnrichedNode>) -> Result<(), ForestValidationError> {
    for node in forest {
        let expected = match forest.parent_of(node.id()) {
            None => false,
            Some(parent) => parent.locked || parent.status != ProgressStatus::Completed,
        };
        if node.locked != expected {
            return Err(ForestValidationError::LockMismatch {
                id: node.id(),
                expected,
                actual: node.locked,
            });
        }
    }
    Ok(())
}

/// Asserts that every parent reference resolves and depths increase by one
/// from parent to child.
pub fn assert_forest_consistent(forest: &Forest<EnrichedNode>) -> Result<(), ForestValidationError> {
    for node in forest {
        let Some(parent_id) = node.node.parent_id else {
            continue;
        };
        if !forest.contains(parent_id) {
            return Err(ForestValidationError::ParentMissing {
                id: node.id(),
                parent: parent_id,
            });
        }
        let depth = forest.depth_of(node.id()).unwrap_or(0);
        let parent_depth = forest.depth_of(parent_id).unwrap_or(0);
        if depth != parent_depth + 1 {
            return Err(ForestValidationError::DepthMismatch {
                id: node.id(),
                depth,
                parent_depth,
            });
        }
    }
    Ok(())
}

//! Seeded random node and progress snapshots.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use questmap_core::{NodeId, ProgressRecord, ProgressStatus, RoadmapNode};

/// Size limits for [`random_nodes`]
#[derive(Debug, Clone)]
pub struct ForestShape {
    /// Number of trees
    pub roots: usize,
    /// Deepest level that may still receive children
    pub max_depth: usize,
    /// Upper bound on children per node
    pub max_children: usize,
    /// Directions assigned to trees in turn; empty leaves directions blank
    pub directions: Vec<String>,
    /// Chance that a node is a checkpoint
    pub checkpoint_ratio: f64,
}

impl Default for ForestShape {
    fn default() -> Self {
        Self {
            roots: 3,
            max_depth: 3,
            max_children: 4,
            directions: ["frontend", "backend", "devops", "career"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            checkpoint_ratio: 0.25,
        }
    }
}

impl ForestShape {
    /// Shape producing single chains of the given length
    pub fn chains(roots: usize, length: usize) -> Self {
        Self {
            roots,
            max_depth: length.saturating_sub(1),
            max_children: 1,
            ..Self::default()
        }
    }
}

/// Generate a valid node snapshot.
///
/// Ids are sequential from 1 in breadth-first order. Each node below
/// `max_depth` gets between zero and `max_children` children, except in
/// chain shapes, where every node above `max_depth` gets exactly one.
pub fn random_nodes(seed: u64, shape: &ForestShape) -> Vec<RoadmapNode> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut nodes = Vec::new();
    let mut queue = VecDeque::new();
    let mut next_id = 1i64;

    for r in 0..shape.roots {
        let direction = if shape.directions.is_empty() {
            String::new()
        } else {
            shape.directions[r % shape.directions.len()].clone()
        };
        let node = RoadmapNode::new(next_id, format!("Root {}", next_id)).with_direction(direction.clone());
        queue.push_back((NodeId(next_id), 0usize, direction));
        nodes.push(node);
        next_id += 1;
    }

    while let Some((parent, depth, direction)) = queue.pop_front() {
        if depth >= shape.max_depth {
            continue;
        }
        let count = if shape.max_children == 1 {
            1
        } else {
            rng.gen_range(0..=shape.max_children)
        };
        for _ in 0..count {
            let mut node = RoadmapNode::new(next_id, format!("Node {}", next_id))
                .with_direction(direction.clone())
                .with_parent(parent);
            node.checkpoint = rng.gen_bool(shape.checkpoint_ratio);
            queue.push_back((NodeId(next_id), depth + 1, direction.clone()));
            nodes.push(node);
            next_id += 1;
        }
    }

    nodes
}

/// The same nodes in a seeded random order
pub fn shuffled(mut nodes: Vec<RoadmapNode>, seed: u64) -> Vec<RoadmapNode> {
    let mut rng = StdRng::seed_from_u64(seed);
    nodes.shuffle(&mut rng);
    nodes
}

/// Generate progress for a node snapshot.
///
/// Each node is completed with probability `completion` (score 0 to 100),
/// otherwise in progress with probability 0.3, otherwise left without a
/// record.
pub fn random_progress(seed: u64, nodes: &[RoadmapNode], completion: f64) -> Vec<ProgressRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();

    for node in nodes {
        if rng.gen_bool(completion) {
            records.push(ProgressRecord::new(node.id, ProgressStatus::Completed, rng.gen_range(0..=100)));
        } else if rng.gen_bool(0.3) {
            records.push(ProgressRecord::new(node.id, ProgressStatus::InProgress, rng.gen_range(0..=50)));
        }
    }

    records
}

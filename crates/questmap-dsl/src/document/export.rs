use std::collections::HashMap;

use questmap_core::{NodeId, RoadmapNode};

use super::{DirectionDefinition, NodeDefinition, RoadmapDocument};
use crate::utils::key::export_key;

/// Direction written for trees whose root has no label
pub const UNNAMED_DIRECTION: &str = "general";

impl RoadmapDocument {
    /// Regenerate a document from a node snapshot.
    ///
    /// Every node is filed under its tree root's direction, the same grouping
    /// [`questmap_core::Forest::for_direction`] uses, and roots without a
    /// label go to [`UNNAMED_DIRECTION`]. Directions appear in first-seen
    /// order and nodes keep their input order. Every node is keyed
    /// `node_<id>` and keeps its id explicitly, so resolving the result
    /// yields the same tree.
    pub fn from_nodes(nodes: &[RoadmapNode]) -> Self {
        let names = tree_directions(nodes);
        let mut directions: Vec<DirectionDefinition> = Vec::new();

        for (node, name) in nodes.iter().zip(names) {
            let position = match directions.iter().position(|d| d.name == name) {
                Some(position) => position,
                None => {
                    directions.push(DirectionDefinition {
                        name: name.to_string(),
                        nodes: Vec::new(),
                    });
                    directions.len() - 1
                }
            };

            directions[position].nodes.push(NodeDefinition {
                key: export_key(node.id),
                id: Some(node.id.0),
                parent: node.parent_id.map(export_key),
                title: node.title.clone(),
                description: node.description.clone(),
                resources: node.resources.clone(),
                checkpoint: node.checkpoint,
            });
        }

        Self {
            directions,
            ..Self::new()
        }
    }
}

/// Direction of each node's tree root, in input order.
///
/// Chains that end in an unknown parent or loop back on themselves keep the
/// label of the node where the walk stopped.
fn tree_directions(nodes: &[RoadmapNode]) -> Vec<&str> {
    let index: HashMap<NodeId, usize> = nodes.iter().enumerate().map(|(i, node)| (node.id, i)).collect();
    let mut roots: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut on_path = vec![false; nodes.len()];

    for start in 0..nodes.len() {
        let mut path = Vec::new();
        let mut current = start;
        let root = loop {
            if let Some(root) = roots[current] {
                break root;
            }
            if on_path[current] {
                break current;
            }
            on_path[current] = true;
            path.push(current);
            match nodes[current].parent_id.and_then(|p| index.get(&p)) {
                Some(&parent) => current = parent,
                None => break current,
            }
        };
        for i in path {
            roots[i] = Some(root);
            on_path[i] = false;
        }
    }

    roots
        .into_iter()
        .enumerate()
        .map(|(i, root)| {
            let name = nodes[root.unwrap_or(i)].direction.as_str();
            if name.trim().is_empty() {
                UNNAMED_DIRECTION
            } else {
                name
            }
        })
        .collect()
}

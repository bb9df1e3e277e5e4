//! Assertions over computed layouts.

use std::collections::{BTreeMap, HashMap};

use questmap_core::{Layout, NodeId};
use thiserror::Error;

const EPSILON: f64 = 1e-6;

/// Error type for layout validation failures
#[derive(Debug, Error, PartialEq)]
pub enum LayoutValidationError {
    #[error("Nodes {a} and {b} at depth {depth} are {distance} apart, minimum is {min_distance}")]
    TooClose {
        depth: usize,
        a: NodeId,
        b: NodeId,
        distance: f64,
        min_distance: f64,
    },

    #[error("Depth {depth} has nodes at different heights ({first} and {other})")]
    UnevenLevel { depth: usize, first: f64, other: f64 },

    #[error("Depth {depth} at y={y} is not below depth {previous} at y={previous_y}")]
    LevelOrder {
        depth: usize,
        y: f64,
        previous: usize,
        previous_y: f64,
    },

    #[error("Only child {child} is at x={child_x}, parent {parent} at x={parent_x}")]
    Misaligned {
        parent: NodeId,
        child: NodeId,
        parent_x: f64,
        child_x: f64,
    },

    #[error("Connector {from} -> {to} references a node that was not placed")]
    DanglingConnector { from: NodeId, to: NodeId },

    #[error("Connector {from} -> {to} does not match node positions")]
    ConnectorMismatch { from: NodeId, to: NodeId },
}

/// Asserts that nodes on the same depth keep at least `min_distance`
/// between them. Pairs involving a node listed in `layout.crowded` are
/// skipped.
///
/// # Arguments
///
/// * `layout` - The layout to check
/// * `min_distance` - Minimum horizontal gap between nodes on a level
pub fn assert_level_spacing(layout: &Layout, min_distance: f64) -> Result<(), LayoutValidationError> {
    let mut levels: BTreeMap<usize, Vec<(f64, NodeId)>> = BTreeMap::new();
    for node in &layout.nodes {
        if !layout.crowded.contains(&node.id()) {
            levels.entry(node.depth).or_default().push((node.x, node.id()));
        }
    }

    for (depth, mut xs) in levels {
        xs.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in xs.windows(2) {
            let distance = pair[1].0 - pair[0].0;
            if distance + EPSILON < min_distance {
                return Err(LayoutValidationError::TooClose {
                    depth,
                    a: pair[0].1,
                    b: pair[1].1,
                    distance,
                    min_distance,
                });
            }
        }
    }
    Ok(())
}

/// Asserts that all nodes of a depth share one y and that y strictly
/// increases with depth.
pub fn assert_levels_descend(layout: &Layout) -> Result<(), LayoutValidationError> {
    let mut level_y: BTreeMap<usize, f64> = BTreeMap::new();
    for node in &layout.nodes {
        match level_y.get(&node.depth) {
            Some(&first) if (first - node.y).abs() > EPSILON => {
                return Err(LayoutValidationError::UnevenLevel {
                    depth: node.depth,
                    first,
                    other: node.y,
                });
            }
            Some(_) => {}
            None => {
                level_y.insert(node.depth, node.y);
            }
        }
    }

    let levels: Vec<(usize, f64)> = level_y.into_iter().collect();
    for pair in levels.windows(2) {
        let ((previous, previous_y), (depth, y)) = (pair[0], pair[1]);
        if y <= previous_y {
            return Err(LayoutValidationError::LevelOrder {
                depth,
                y,
                previous,
                previous_y,
            });
        }
    }
    Ok(())
}

/// Asserts that every node with exactly one placed child has that child
/// directly below it.
///
/// Only holds when nothing else competes for the spot, e.g. for chains.
pub fn assert_only_children_aligned(layout: &Layout) -> Result<(), LayoutValidationError> {
    let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for connector in &layout.connectors {
        children.entry(connector.from).or_default().push(connector.to);
    }

    for (parent, kids) in children {
        if kids.len() != 1 {
            continue;
        }
        let child = kids[0];
        let (Some(p), Some(c)) = (layout.get(parent), layout.get(child)) else {
            return Err(LayoutValidationError::DanglingConnector { from: parent, to: child });
        };
        if (p.x - c.x).abs() > EPSILON {
            return Err(LayoutValidationError::Misaligned {
                parent,
                child,
                parent_x: p.x,
                child_x: c.x,
            });
        }
    }
    Ok(())
}

/// Asserts that connector endpoints sit on the positions of the nodes they join
pub fn assert_connectors_match(layout: &Layout) -> Result<(), LayoutValidationError> {
    for connector in &layout.connectors {
        let (from, to) = (connector.from, connector.to);
        let (Some(a), Some(b)) = (layout.get(from), layout.get(to)) else {
            return Err(LayoutValidationError::DanglingConnector { from, to });
        };
        let matches = (a.x - connector.x1).abs() < EPSILON
            && (a.y - connector.y1).abs() < EPSILON
            && (b.x - connector.x2).abs() < EPSILON
            && (b.y - connector.y2).abs() < EPSILON;
        if !matches {
            return Err(LayoutValidationError::ConnectorMismatch { from, to });
        }
    }
    Ok(())
}

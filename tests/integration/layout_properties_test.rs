//! Structural guarantees of the layout engine over seeded random forests.

use pretty_assertions::assert_eq;
use questmap_core::{LayoutConfig, LockPolicy, NodeId};
use questmap_test_utils::assertions::{
    assert_connectors_match, assert_level_spacing, assert_levels_descend, assert_only_children_aligned,
};
use questmap_test_utils::data_generators::{random_nodes, random_progress};
use questmap_test_utils::ForestShape;
use questmap_tests::{enrich, layout, layout_with, SEEDS};

/// Retry budget that always finds a free slot for the default shape.
///
/// Candidates sit `min_distance` apart, so each placed node rules out at most
/// three of them, rounding included. A default forest has at most 192 nodes
/// on one level.
const ROOMY_ATTEMPTS: usize = 3 * 192 + 1;

#[test]
fn test_spacing_and_levels_hold_for_random_forests() {
    let config = LayoutConfig {
        max_attempts: ROOMY_ATTEMPTS,
        ..LayoutConfig::default()
    };
    let min_distance = config.min_distance;

    for seed in SEEDS {
        let nodes = random_nodes(seed, &ForestShape::default());
        let records = random_progress(seed, &nodes, 0.4);
        let forest = enrich(nodes, records, LockPolicy::ParentCompletion);
        let placed = layout_with(&forest, config.clone());

        assert_eq!(placed.len(), forest.len(), "seed {}", seed);
        // spacing skips crowded nodes, so none may be crowded
        assert_eq!(placed.crowded, Vec::<NodeId>::new(), "seed {}", seed);
        if let Err(e) = assert_level_spacing(&placed, min_distance) {
            panic!("seed {}: {}", seed, e);
        }
        if let Err(e) = assert_levels_descend(&placed) {
            panic!("seed {}: {}", seed, e);
        }
        if let Err(e) = assert_connectors_match(&placed) {
            panic!("seed {}: {}", seed, e);
        }
    }
}

#[test]
fn test_chains_stay_vertical() {
    for seed in SEEDS.take(8) {
        let nodes = random_nodes(seed, &ForestShape::chains(3, 6));
        let placed = layout(&enrich(nodes, Vec::new(), LockPolicy::ParentCompletion));

        assert!(placed.crowded.is_empty());
        if let Err(e) = assert_only_children_aligned(&placed) {
            panic!("seed {}: {}", seed, e);
        }
    }
}

#[test]
fn test_layout_is_deterministic() {
    for seed in SEEDS.take(16) {
        let nodes = random_nodes(seed, &ForestShape::default());
        let records = random_progress(seed, &nodes, 0.5);

        let first = layout(&enrich(nodes.clone(), records.clone(), LockPolicy::ParentCompletion));
        let second = layout(&enrich(nodes, records, LockPolicy::ParentCompletion));
        assert_eq!(first, second, "seed {}", seed);
    }
}

#[test]
fn test_progress_never_moves_nodes() {
    for seed in SEEDS.take(16) {
        let nodes = random_nodes(seed, &ForestShape::default());
        let records = random_progress(seed, &nodes, 0.7);

        let bare = layout(&enrich(nodes.clone(), Vec::new(), LockPolicy::ParentCompletion));
        let progressed = layout(&enrich(nodes, records, LockPolicy::ParentCompletion));

        let positions = |l: &questmap_core::Layout| -> Vec<(NodeId, f64, f64)> {
            l.nodes.iter().map(|n| (n.id(), n.x, n.y)).collect()
        };
        assert_eq!(positions(&bare), positions(&progressed), "seed {}", seed);
    }
}

#[test]
fn test_viewport_contains_every_node() {
    for seed in SEEDS.take(16) {
        let nodes = random_nodes(seed, &ForestShape::default());
        let placed = layout(&enrich(nodes, Vec::new(), LockPolicy::ParentCompletion));
        let viewport = placed.viewport(150.0, 100.0);

        for node in &placed.nodes {
            let x = node.x + viewport.offset_x;
            let y = node.y + viewport.offset_y;
            assert!(x >= 150.0 - 1e-6 && x <= viewport.width - 150.0 + 1e-6, "seed {}: x {}", seed, x);
            assert!(y >= 100.0 - 1e-6 && y <= viewport.height - 100.0 + 1e-6, "seed {}: y {}", seed, y);
        }
    }
}

//! Progress merge and lock invariants over seeded random snapshots.

use pretty_assertions::assert_eq;
use questmap_core::{
    Forest, LockPolicy, NodeId, ProgressLedger, ProgressRecord, ProgressStatus, ProgressSummary, UnlockEngine, XpRules,
};
use questmap_test_utils::assertions::{assert_forest_consistent, assert_lock_rule};
use questmap_test_utils::data_generators::{random_nodes, random_progress, shuffled};
use questmap_test_utils::{ForestShape, ProgressBuilder, RoadmapBuilder};
use questmap_tests::{enrich, SEEDS};

#[test]
fn test_lock_rule_holds_for_random_progress() {
    for seed in SEEDS {
        let nodes = random_nodes(seed, &ForestShape::default());
        let records = random_progress(seed.wrapping_mul(31), &nodes, 0.6);
        let forest = enrich(nodes, records, LockPolicy::ParentCompletion);

        if let Err(e) = assert_lock_rule(&forest) {
            panic!("seed {}: {}", seed, e);
        }
        if let Err(e) = assert_forest_consistent(&forest) {
            panic!("seed {}: {}", seed, e);
        }
    }
}

#[test]
fn test_input_order_does_not_change_lock_state() {
    for seed in SEEDS.take(16) {
        let nodes = random_nodes(seed, &ForestShape::default());
        let records = random_progress(seed, &nodes, 0.5);

        let ordered = enrich(nodes.clone(), records.clone(), LockPolicy::ParentCompletion);
        let mixed = enrich(shuffled(nodes, seed), records, LockPolicy::ParentCompletion);

        for node in &ordered {
            let other = mixed.get(node.id()).map(|n| (n.status, n.locked));
            assert_eq!(other, Some((node.status, node.locked)), "seed {}", seed);
        }
    }
}

#[test]
fn test_merge_is_idempotent() {
    for seed in SEEDS.take(16) {
        let nodes = random_nodes(seed, &ForestShape::default());
        let records = random_progress(seed, &nodes, 0.5);
        let forest = Forest::from_nodes(nodes).unwrap();

        let once = ProgressLedger::new(records.clone()).merge(&forest);
        let twice = ProgressLedger::new(records.iter().chain(records.iter()).cloned()).merge(&forest);
        assert_eq!(once, twice, "seed {}", seed);
    }
}

#[test]
fn test_later_record_wins() {
    let forest = RoadmapBuilder::new().chain(&[1, 2]).forest().unwrap();
    let records = ProgressBuilder::new().in_progress(1, 10).completed(1, 70).build();
    let enriched = UnlockEngine::default().apply(ProgressLedger::new(records).merge(&forest));

    let root = enriched.get(NodeId(1)).unwrap();
    assert_eq!((root.status, root.score), (ProgressStatus::Completed, 70));
    assert!(!enriched.get(NodeId(2)).unwrap().locked);
}

#[test]
fn test_unrestricted_policy_locks_nothing() {
    for seed in SEEDS.take(8) {
        let nodes = random_nodes(seed, &ForestShape::default());
        let forest = enrich(nodes, Vec::new(), LockPolicy::Unrestricted);
        assert!(forest.iter().all(|n| !n.locked), "seed {}", seed);
    }
}

#[test]
fn test_summary_partitions_nodes() {
    let rules = XpRules::default();
    for seed in SEEDS.take(16) {
        let nodes = random_nodes(seed, &ForestShape::default());
        let records = random_progress(seed, &nodes, 0.5);
        let summary = ProgressSummary::from_forest(&enrich(nodes, records, LockPolicy::ParentCompletion), &rules);

        assert_eq!(
            summary.completed + summary.in_progress + summary.not_started,
            summary.total,
            "seed {}",
            seed
        );
        assert!(summary.checkpoints_completed <= summary.checkpoints);
        assert!(summary.locked <= summary.total);
    }
}

#[test]
fn test_completing_more_never_lowers_experience() {
    let rules = XpRules::default();
    for seed in SEEDS.take(16) {
        let nodes = random_nodes(seed, &ForestShape::default());
        let records = random_progress(seed, &nodes, 0.3);

        let before = rules.experience(&enrich(nodes.clone(), records.clone(), LockPolicy::ParentCompletion));

        let mut more = records;
        if let Some(node) = nodes.iter().find(|n| !more.iter().any(|r| r.node_id == n.id)) {
            more.push(ProgressRecord::new(node.id, ProgressStatus::Completed, 50));
        }
        let after = rules.experience(&enrich(nodes, more, LockPolicy::ParentCompletion));

        assert!(after >= before, "seed {}: {} < {}", seed, after, before);
    }
}

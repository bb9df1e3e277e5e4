//! Shared helpers for the Questmap integration tests.

use std::ops::Range;

use questmap_core::{
    EnrichedNode, Forest, Layout, LayoutConfig, LayoutEngine, LockPolicy, ProgressLedger, ProgressRecord, RoadmapNode,
    UnlockEngine,
};

/// Seeds every property test runs through
pub const SEEDS: Range<u64> = 0..64;

/// Build, merge and lock a snapshot
pub fn enrich(nodes: Vec<RoadmapNode>, records: Vec<ProgressRecord>, policy: LockPolicy) -> Forest<EnrichedNode> {
    let forest = Forest::from_nodes(nodes).unwrap_or_else(|e| panic!("generated nodes must form a forest: {}", e));
    UnlockEngine::new(policy).apply(ProgressLedger::new(records).merge(&forest))
}

/// Lay out an enriched forest with default constants
pub fn layout(forest: &Forest<EnrichedNode>) -> Layout {
    LayoutEngine::default().layout(forest)
}

/// Lay out an enriched forest with the given constants
pub fn layout_with(forest: &Forest<EnrichedNode>, config: LayoutConfig) -> Layout {
    LayoutEngine::new(config).layout(forest)
}

//! The full pipeline from raw snapshots to a placed roadmap.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::domain::{EnrichedNode, NodeId, ProgressRecord, RoadmapNode};
use crate::error::RoadmapError;
use crate::layout::{Layout, LayoutConfig, LayoutEngine, Visibility};
use crate::ledger::ProgressLedger;
use crate::rewards::XpRules;
use crate::summary::ProgressSummary;
use crate::tree::{Forest, TreeBuilder};
use crate::unlock::{LockPolicy, UnlockEngine};

/// Caller-supplied view state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Only trees whose root carries this direction
    pub direction: Option<String>,

    /// Which nodes have their children laid out
    pub visibility: Visibility,

    /// Rule for lock state
    pub lock_policy: LockPolicy,

    /// Layout constants
    pub layout: LayoutConfig,
}

impl ViewOptions {
    /// Restrict the view to one direction
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Set which nodes are expanded
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set the lock policy
    pub fn with_lock_policy(mut self, policy: LockPolicy) -> Self {
        self.lock_policy = policy;
        self
    }

    /// Set the layout constants
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// An enriched forest together with its layout
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapView {
    /// Every node in view with status, score and lock state
    pub forest: Forest<EnrichedNode>,

    /// Coordinates and connectors for the visible nodes
    pub layout: Layout,

    /// Progress records whose node id matched nothing, sorted
    pub unmatched: Vec<NodeId>,
}

impl RoadmapView {
    /// Aggregate progress over the nodes in view
    pub fn summary(&self, rules: &XpRules) -> ProgressSummary {
        ProgressSummary::from_forest(&self.forest, rules)
    }
}

/// Build, enrich, lock and lay out a roadmap.
///
/// Runs [`TreeBuilder`], the optional direction filter, [`ProgressLedger`],
/// [`UnlockEngine`] and [`LayoutEngine`] in that order. Any structural error
/// in `nodes` is returned before progress is looked at. Unmatched records are
/// counted against the full forest, before the direction filter.
pub fn compose<N, R>(nodes: N, records: R, options: &ViewOptions) -> Result<RoadmapView, RoadmapError>
where
    N: IntoIterator<Item = RoadmapNode>,
    R: IntoIterator<Item = ProgressRecord>,
{
    let span = info_span!("compose", direction = options.direction.as_deref().unwrap_or("*"));
    let _guard = span.enter();

    options.layout.validate()?;

    let forest = TreeBuilder::new().build(nodes)?;
    let ledger = ProgressLedger::new(records);
    let unmatched = ledger.unmatched(&forest);

    let forest = match &options.direction {
        Some(direction) => forest.for_direction(direction),
        None => forest,
    };

    let enriched = UnlockEngine::new(options.lock_policy).apply(ledger.merge(&forest));
    let layout = LayoutEngine::new(options.layout.clone()).layout_visible(&enriched, &options.visibility);

    debug!(
        nodes = enriched.len(),
        placed = layout.len(),
        unmatched = unmatched.len(),
        "Composed roadmap view"
    );

    Ok(RoadmapView {
        forest: enriched,
        layout,
        unmatched,
    })
}

//! Placement of enriched nodes on a 2D canvas.

mod config;
mod engine;
mod types;

pub use config::{LayoutConfig, LayoutConfigError};
pub use engine::LayoutEngine;
pub use types::{Bounds, Connector, Layout, OpenOutcome, PositionedNode, Viewport};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::NodeId;

/// Which nodes have their children shown
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Every node is expanded
    #[default]
    All,
    /// Only the listed nodes are expanded; roots are always shown
    Expanded(BTreeSet<NodeId>),
}

impl Visibility {
    /// Expand only the given nodes
    pub fn expanded<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Visibility::Expanded(ids.into_iter().collect())
    }

    /// Whether the children of `id` are placed
    pub fn shows_children_of(&self, id: NodeId) -> bool {
        match self {
            Visibility::All => true,
            Visibility::Expanded(ids) => ids.contains(&id),
        }
    }
}

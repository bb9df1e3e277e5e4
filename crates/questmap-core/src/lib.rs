//!
//! Questmap Core - roadmap tree model for the Questmap learning platform
//!
//! This crate turns a flat snapshot of content nodes and a user's progress
//! records into a laid-out, progress-aware roadmap: the forest of nodes, the
//! status and lock state of every node, and 2D coordinates for drawing it.
//! Everything here is synchronous and free of I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain entities - content nodes, progress records, enriched nodes
pub mod domain;

/// Error types
pub mod error;

/// Coordinates, connectors and viewport
pub mod layout;

/// Progress merge
pub mod ledger;

/// Text rendering of layouts
pub mod render;

/// Experience and badges
pub mod rewards;

/// Progress totals
pub mod summary;

/// Forest construction and traversal
pub mod tree;

/// Lock state
pub mod unlock;

/// End-to-end composition
pub mod view;

// Re-export main API types for easy use
pub use domain::{EnrichedNode, NodeId, ProgressRecord, ProgressStatus, RoadmapNode};
pub use error::RoadmapError;
pub use layout::{
    Bounds, Connector, Layout, LayoutConfig, LayoutConfigError, LayoutEngine, OpenOutcome, PositionedNode,
    Viewport, Visibility,
};
pub use ledger::ProgressLedger;
pub use render::{OutlineRenderer, Renderer};
pub use rewards::{Badge, XpRules};
pub use summary::ProgressSummary;
pub use tree::{AsRoadmapNode, Forest, TreeBuilder};
pub use unlock::{LockPolicy, UnlockEngine};
pub use view::{compose, RoadmapView, ViewOptions};

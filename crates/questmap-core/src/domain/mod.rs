//! Domain entities: content nodes, progress records and their merged form.

/// Content nodes and identifiers
pub mod node;

/// Progress status, records and enriched nodes
pub mod progress;

pub use node::{NodeId, RoadmapNode};
pub use progress::{EnrichedNode, ProgressRecord, ProgressStatus};

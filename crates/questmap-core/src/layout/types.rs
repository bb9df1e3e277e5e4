use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{EnrichedNode, NodeId};

/// An enriched node with display coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    /// The node with progress and lock state
    #[serde(flatten)]
    pub node: EnrichedNode,

    /// Horizontal logical coordinate
    pub x: f64,

    /// Vertical logical coordinate
    pub y: f64,

    /// Tree level, `0` for roots
    pub depth: usize,
}

impl PositionedNode {
    /// Id of the underlying node
    pub fn id(&self) -> NodeId {
        self.node.node.id
    }
}

/// A parent → child segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// Parent node
    pub from: NodeId,
    /// Child node
    pub to: NodeId,
    /// Parent x
    pub x1: f64,
    /// Parent y
    pub y1: f64,
    /// Child x
    pub x2: f64,
    /// Child y
    pub y2: f64,
    /// Parent completed and child unlocked: an open path
    pub emphasized: bool,
}

/// Extent of the placed nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest x
    pub min_x: f64,
    /// Largest x
    pub max_x: f64,
    /// Smallest y
    pub min_y: f64,
    /// Largest y
    pub max_y: f64,
}

impl Bounds {
    /// Horizontal extent
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Canvas size and offset that fit a layout with padding on every side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Added to every x to move the layout into the canvas
    pub offset_x: f64,
    /// Added to every y to move the layout into the canvas
    pub offset_y: f64,
}

impl Viewport {
    /// Default horizontal padding
    pub const PADDING_X: f64 = 150.0;
    /// Default vertical padding
    pub const PADDING_Y: f64 = 100.0;
    /// Canvas used when there is nothing to place
    pub const EMPTY: Viewport = Viewport {
        width: 1200.0,
        height: 800.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };
}

/// Result of a node-open event from the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpenOutcome<'a> {
    /// The node is accessible
    Opened(&'a PositionedNode),
    /// The node is placed but locked; the event is ignored
    Locked(NodeId),
    /// The node is not part of this layout
    NotFound(NodeId),
}

/// Output of the layout engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Placed nodes, level by level
    pub nodes: Vec<PositionedNode>,

    /// Segments between every placed parent and child
    pub connectors: Vec<Connector>,

    /// Nodes accepted within `min_distance` of a neighbour after the retry
    /// budget ran out
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub crowded: Vec<NodeId>,

    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

// The id index is derived from `nodes` and absent after deserializing
impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.connectors == other.connectors && self.crowded == other.crowded
    }
}

impl Layout {
    pub(crate) fn new(nodes: Vec<PositionedNode>, connectors: Vec<Connector>, crowded: Vec<NodeId>) -> Self {
        let index = nodes.iter().enumerate().map(|(i, n)| (n.id(), i)).collect();
        Self {
            nodes,
            connectors,
            crowded,
            index,
        }
    }

    /// An empty layout
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// Number of placed nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing was placed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The placed node with the given id
    pub fn get(&self, id: NodeId) -> Option<&PositionedNode> {
        match self.index.get(&id) {
            Some(&i) => self.nodes.get(i),
            // deserialized layouts carry no index
            None if self.index.is_empty() => self.nodes.iter().find(|n| n.id() == id),
            None => None,
        }
    }

    /// Coordinates of a placed node
    pub fn position_of(&self, id: NodeId) -> Option<(f64, f64)> {
        self.get(id).map(|n| (n.x, n.y))
    }

    /// Nodes placed on the given level
    pub fn level(&self, depth: usize) -> impl Iterator<Item = &PositionedNode> + '_ {
        self.nodes.iter().filter(move |n| n.depth == depth)
    }

    /// Extent of the placed nodes, `None` when empty
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.nodes.first()?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(self.nodes.iter().fold(init, |b, n| Bounds {
            min_x: b.min_x.min(n.x),
            max_x: b.max_x.max(n.x),
            min_y: b.min_y.min(n.y),
            max_y: b.max_y.max(n.y),
        }))
    }

    /// Canvas that fits the layout with the given padding on every side
    pub fn viewport(&self, padding_x: f64, padding_y: f64) -> Viewport {
        match self.bounds() {
            None => Viewport::EMPTY,
            Some(b) => Viewport {
                width: b.width() + 2.0 * padding_x,
                height: b.height() + 2.0 * padding_y,
                offset_x: padding_x - b.min_x,
                offset_y: padding_y - b.min_y,
            },
        }
    }

    /// Resolve a node-open event. Locked nodes do not open.
    pub fn open(&self, id: NodeId) -> OpenOutcome<'_> {
        match self.get(id) {
            None => OpenOutcome::NotFound(id),
            Some(n) if n.node.locked => OpenOutcome::Locked(id),
            Some(n) => OpenOutcome::Opened(n),
        }
    }
}

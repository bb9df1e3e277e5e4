use std::collections::VecDeque;
use tracing::{debug, warn};

use super::config::LayoutConfig;
use super::types::{Connector, Layout, PositionedNode};
use super::Visibility;
use crate::domain::{EnrichedNode, NodeId};
use crate::tree::Forest;

/// Assigns 2D coordinates to the nodes of an enriched forest.
///
/// Placement is level by level. Roots spread evenly around `x = 0`, children
/// are centred under their parent, and any node landing closer than
/// `min_distance` to a node already placed on its level is shifted left and
/// right in growing steps until it fits. The output depends only on the input
/// order and the configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine with the given constants
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The engine's constants
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Horizontal distance between adjacent roots
    pub fn root_spacing(&self, root_count: usize) -> f64 {
        let gaps = root_count.saturating_sub(1).max(1) as f64;
        self.config.min_spacing.max(self.config.root_budget / gaps)
    }

    /// Horizontal distance between adjacent children of one parent
    pub fn sibling_spacing(&self, sibling_count: usize) -> f64 {
        let count = sibling_count.max(1) as f64;
        self.config.min_distance.max(self.config.sibling_spread / count)
    }

    /// Vertical step from level `depth - 1` to level `depth`
    pub fn level_step(&self, depth: usize) -> f64 {
        if depth == 0 {
            return 0.0;
        }
        let decayed = self.config.vertical_spacing * self.config.vertical_decay.powi(depth as i32 - 1);
        decayed.max(self.config.min_vertical_spacing)
    }

    /// y coordinate of a level. Strictly increasing in `depth`.
    pub fn level_y(&self, depth: usize) -> f64 {
        let mut ys = vec![0.0];
        self.extend_levels(&mut ys, depth)
    }

    /// Grow the table of level ys up to `depth` and return that level's y.
    /// `ys` must start with the root level.
    fn extend_levels(&self, ys: &mut Vec<f64>, depth: usize) -> f64 {
        while ys.len() <= depth {
            let next = ys.len();
            let y = ys[next - 1] + self.level_step(next);
            ys.push(y);
        }
        ys[depth]
    }

    /// Lay out every node of the forest
    pub fn layout(&self, forest: &Forest<EnrichedNode>) -> Layout {
        self.layout_visible(forest, &Visibility::All)
    }

    /// Lay out the visible part of the forest.
    ///
    /// Roots are always placed. Children are placed only under a placed
    /// parent whose children the visibility shows.
    pub fn layout_visible(&self, forest: &Forest<EnrichedNode>, visibility: &Visibility) -> Layout {
        let topology = forest.topology();
        let mut placed: Vec<Option<(f64, f64)>> = vec![None; forest.len()];
        let mut levels: Vec<Vec<f64>> = Vec::new();
        let mut level_ys: Vec<f64> = vec![0.0];
        let mut nodes = Vec::with_capacity(forest.len());
        let mut connectors = Vec::new();
        let mut crowded = Vec::new();
        let mut queue = VecDeque::new();

        let roots = topology.roots();
        let spacing = self.root_spacing(roots.len());
        let center = (roots.len() as f64 - 1.0) / 2.0;
        for (slot, &index) in roots.iter().enumerate() {
            let proposed = (slot as f64 - center) * spacing;
            let (x, fits) = self.find_free_x(occupied(&mut levels, 0), proposed);
            self.place(forest, index, x, 0.0, fits, &mut levels, &mut nodes, &mut crowded);
            placed[index] = Some((x, 0.0));
            queue.push_back(index);
        }

        while let Some(parent) = queue.pop_front() {
            let parent_node = forest.node_at(parent);
            if !visibility.shows_children_of(parent_node.id()) {
                continue;
            }
            let children = topology.children(parent);
            if children.is_empty() {
                continue;
            }
            let Some((parent_x, parent_y)) = placed[parent] else {
                continue;
            };

            let depth = topology.depth(parent) + 1;
            let y = self.extend_levels(&mut level_ys, depth);
            let spacing = self.sibling_spacing(children.len());
            let center = (children.len() as f64 - 1.0) / 2.0;

            for (slot, &child) in children.iter().enumerate() {
                let proposed = parent_x + (slot as f64 - center) * spacing;
                let (x, fits) = self.find_free_x(occupied(&mut levels, depth), proposed);
                self.place(forest, child, x, y, fits, &mut levels, &mut nodes, &mut crowded);
                placed[child] = Some((x, y));
                queue.push_back(child);

                let child_node = forest.node_at(child);
                connectors.push(Connector {
                    from: parent_node.id(),
                    to: child_node.id(),
                    x1: parent_x,
                    y1: parent_y,
                    x2: x,
                    y2: y,
                    emphasized: parent_node.status.is_completed() && !child_node.locked,
                });
            }
        }

        debug!(
            placed = nodes.len(),
            total = forest.len(),
            connectors = connectors.len(),
            crowded = crowded.len(),
            "Computed layout"
        );

        Layout::new(nodes, connectors, crowded)
    }

    /// Find a free x near `proposed`. Tries `proposed`, then `+d`, `-d`,
    /// `+2d`, `-2d` and so on. Returns the last candidate and `false` when no
    /// free slot was found within the retry budget.
    fn find_free_x(&self, occupied: &[f64], proposed: f64) -> (f64, bool) {
        let distance = self.config.min_distance;
        let is_free = |x: f64| occupied.iter().all(|&other| (other - x).abs() >= distance);

        let mut candidate = proposed;
        for attempt in 0..self.config.max_attempts {
            if is_free(candidate) {
                return (candidate, true);
            }
            let step = (attempt / 2 + 1) as f64 * distance;
            candidate = if attempt % 2 == 0 { proposed + step } else { proposed - step };
        }
        (candidate, is_free(candidate))
    }

    #[allow(clippy::too_many_arguments)]
    fn place(
        &self,
        forest: &Forest<EnrichedNode>,
        index: usize,
        x: f64,
        y: f64,
        fits: bool,
        levels: &mut Vec<Vec<f64>>,
        nodes: &mut Vec<PositionedNode>,
        crowded: &mut Vec<NodeId>,
    ) {
        let node = forest.node_at(index);
        let depth = forest.topology().depth(index);
        if !fits {
            warn!(
                node_id = %node.id(),
                depth,
                x,
                attempts = self.config.max_attempts,
                "No free slot within retry budget, accepting crowded position"
            );
            crowded.push(node.id());
        }
        occupied(levels, depth).push(x);
        nodes.push(PositionedNode {
            node: node.clone(),
            x,
            y,
            depth,
        });
    }
}

fn occupied(levels: &mut Vec<Vec<f64>>, depth: usize) -> &mut Vec<f64> {
    if levels.len() <= depth {
        levels.resize_with(depth + 1, Vec::new);
    }
    &mut levels[depth]
}

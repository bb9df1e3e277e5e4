//! Forest construction and traversal.
//!
//! [`TreeBuilder`] validates a flat node snapshot and turns it into a
//! [`Forest`]: the root list plus, for every node, its ordered children. The
//! same shape is reused for enriched nodes, so a forest can be mapped from one
//! node type to another without re-validating.

use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::{debug, trace};

use crate::domain::{EnrichedNode, NodeId, RoadmapNode};
use crate::error::RoadmapError;

/// Access to the content node carried by a forest entry
pub trait AsRoadmapNode {
    /// The underlying content node
    fn roadmap_node(&self) -> &RoadmapNode;
}

impl AsRoadmapNode for RoadmapNode {
    fn roadmap_node(&self) -> &RoadmapNode {
        self
    }
}

impl AsRoadmapNode for EnrichedNode {
    fn roadmap_node(&self) -> &RoadmapNode {
        &self.node
    }
}

/// Parent/child structure of a validated node set, by input index
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Topology {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    depths: Vec<usize>,
    breadth_first: Vec<usize>,
}

impl Topology {
    pub(crate) fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub(crate) fn parent(&self, index: usize) -> Option<usize> {
        self.parents[index]
    }

    pub(crate) fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    pub(crate) fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub(crate) fn depth(&self, index: usize) -> usize {
        self.depths[index]
    }

    /// Indices ordered level by level, roots first, siblings in input order
    pub(crate) fn breadth_first(&self) -> &[usize] {
        &self.breadth_first
    }

    /// Fill in roots, children, depths and the breadth-first order from the
    /// parent links. The links must already be known to be acyclic.
    fn from_parents(ids: Vec<NodeId>, parents: Vec<Option<usize>>) -> Self {
        let index = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let mut children = vec![Vec::new(); ids.len()];
        let mut roots = Vec::new();

        for (i, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) => children[*p].push(i),
                None => roots.push(i),
            }
        }

        let mut depths = vec![0; ids.len()];
        let mut breadth_first = Vec::with_capacity(ids.len());
        let mut queue: VecDeque<usize> = roots.iter().copied().collect();
        while let Some(i) = queue.pop_front() {
            breadth_first.push(i);
            for &c in &children[i] {
                depths[c] = depths[i] + 1;
                queue.push_back(c);
            }
        }

        Topology {
            ids,
            index,
            parents,
            children,
            roots,
            depths,
            breadth_first,
        }
    }
}

/// Validates node snapshots and builds forests from them
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    /// Create a new tree builder
    pub fn new() -> Self {
        TreeBuilder
    }

    /// Build a forest from a flat node list.
    ///
    /// A node is a root iff its own `parent_id` is absent. Children keep the
    /// order in which they appear in the input.
    ///
    /// # Errors
    ///
    /// * [`RoadmapError::DuplicateNodeId`] when two nodes share an id
    /// * [`RoadmapError::DanglingParentReference`] when a `parent_id` does not
    ///   resolve within the input
    /// * [`RoadmapError::CycleDetected`] when a node is its own ancestor
    pub fn build<I>(&self, nodes: I) -> Result<Forest, RoadmapError>
    where
        I: IntoIterator<Item = RoadmapNode>,
    {
        let nodes: Vec<RoadmapNode> = nodes.into_iter().collect();

        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id, i).is_some() {
                return Err(RoadmapError::DuplicateNodeId(node.id));
            }
        }

        let mut parents = Vec::with_capacity(nodes.len());
        for node in &nodes {
            let parent = match node.parent_id {
                None => None,
                Some(parent_id) => match index.get(&parent_id) {
                    Some(&p) => Some(p),
                    None => {
                        return Err(RoadmapError::DanglingParentReference {
                            node_id: node.id,
                            parent_id,
                        })
                    }
                },
            };
            parents.push(parent);
        }

        Self::check_for_cycles(&nodes, &parents)?;

        let ids: Vec<NodeId> = nodes.iter().map(|n| n.id).collect();
        let topology = Topology::from_parents(ids, parents);

        debug!(
            node_count = nodes.len(),
            root_count = topology.roots.len(),
            "Built roadmap forest"
        );

        Ok(Forest { nodes, topology })
    }

    /// Walk up the parent chain of every node, remembering nodes already
    /// proven to reach a root so each node is walked at most once.
    fn check_for_cycles(nodes: &[RoadmapNode], parents: &[Option<usize>]) -> Result<(), RoadmapError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            OnChain,
            ReachesRoot,
        }

        let mut marks = vec![Mark::Unvisited; nodes.len()];
        let mut chain: Vec<usize> = Vec::new();

        for start in 0..nodes.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }

            chain.clear();
            let mut current = Some(start);
            while let Some(i) = current {
                match marks[i] {
                    Mark::ReachesRoot => break,
                    Mark::OnChain => {
                        let cycle_start = chain.iter().position(|&c| c == i).unwrap_or(0);
                        let cycle = chain[cycle_start..].iter().map(|&c| nodes[c].id).collect();
                        return Err(RoadmapError::CycleDetected { cycle });
                    }
                    Mark::Unvisited => {
                        marks[i] = Mark::OnChain;
                        chain.push(i);
                        current = parents[i];
                    }
                }
            }

            trace!(start = %nodes[start].id, chain_len = chain.len(), "Parent chain reaches a root");
            for &i in &chain {
                marks[i] = Mark::ReachesRoot;
            }
        }

        Ok(())
    }
}

/// A validated collection of trees.
///
/// Entries are stored in input order. The structure is shared by every node
/// type the pipeline produces: `Forest<RoadmapNode>` from the builder,
/// `Forest<EnrichedNode>` after the progress merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest<T = RoadmapNode> {
    nodes: Vec<T>,
    topology: Topology,
}

impl Forest<RoadmapNode> {
    /// Build a forest with the default [`TreeBuilder`]
    pub fn from_nodes<I>(nodes: I) -> Result<Self, RoadmapError>
    where
        I: IntoIterator<Item = RoadmapNode>,
    {
        TreeBuilder::new().build(nodes)
    }
}

impl<T> Forest<T> {
    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node with the given id exists
    pub fn contains(&self, id: NodeId) -> bool {
        self.topology.index_of(id).is_some()
    }

    /// Look up a node by id
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.topology.index_of(id).map(|i| &self.nodes[i])
    }

    /// All nodes in input order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.nodes.iter()
    }

    /// Root nodes in input order
    pub fn roots(&self) -> impl Iterator<Item = &T> + '_ {
        self.topology.roots().iter().map(move |&i| &self.nodes[i])
    }

    /// Direct children of a node in input order; empty for unknown ids
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &T> + '_ {
        self.topology
            .index_of(id)
            .into_iter()
            .flat_map(move |i| self.topology.children(i).iter())
            .map(move |&c| &self.nodes[c])
    }

    /// Parent of a node, `None` for roots and unknown ids
    pub fn parent_of(&self, id: NodeId) -> Option<&T> {
        let i = self.topology.index_of(id)?;
        self.topology.parent(i).map(|p| &self.nodes[p])
    }

    /// Depth of a node, `0` for roots
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        self.topology.index_of(id).map(|i| self.topology.depth(i))
    }

    /// Nodes level by level, roots first
    pub fn breadth_first(&self) -> impl Iterator<Item = &T> + '_ {
        self.topology.breadth_first().iter().map(move |&i| &self.nodes[i])
    }

    /// Nodes in depth-first pre-order, each tree in root order
    pub fn walk(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.topology.roots().iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            out.push(&self.nodes[i]);
            stack.extend(self.topology.children(i).iter().rev());
        }
        out
    }

    /// Convert every entry while keeping the shape
    pub fn map<U, F>(&self, f: F) -> Forest<U>
    where
        F: FnMut(&T) -> U,
    {
        Forest {
            nodes: self.nodes.iter().map(f).collect(),
            topology: self.topology.clone(),
        }
    }

    /// Keep only the trees whose root satisfies the predicate
    pub fn retain_trees<P>(&self, keep_root: P) -> Forest<T>
    where
        T: Clone,
        P: Fn(&T) -> bool,
    {
        let mut kept = vec![false; self.nodes.len()];
        for &i in self.topology.breadth_first() {
            kept[i] = match self.topology.parent(i) {
                Some(p) => kept[p],
                None => keep_root(&self.nodes[i]),
            };
        }

        let mut remap = vec![usize::MAX; self.nodes.len()];
        let mut nodes = Vec::new();
        let mut node_ids = Vec::new();
        let mut parents = Vec::new();
        for (old, keep) in kept.iter().enumerate() {
            if *keep {
                remap[old] = nodes.len();
                nodes.push(self.nodes[old].clone());
                node_ids.push(self.topology.ids[old]);
                // a parent may come later in input order, remap after the loop
                parents.push(self.topology.parent(old));
            }
        }
        let parents = parents.into_iter().map(|p| p.map(|p| remap[p])).collect();

        Forest {
            nodes,
            topology: Topology::from_parents(node_ids, parents),
        }
    }

    /// Ids of all nodes in input order
    pub fn ids(&self) -> &[NodeId] {
        &self.topology.ids
    }

    pub(crate) fn topology(&self) -> &Topology {
        &self.topology
    }

    pub(crate) fn node_at(&self, index: usize) -> &T {
        &self.nodes[index]
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [T] {
        &mut self.nodes
    }
}

impl<T: AsRoadmapNode> Forest<T> {
    /// Distinct direction labels of the roots, sorted.
    ///
    /// A tree belongs to its root's direction, so every label listed here
    /// selects at least one tree through [`Forest::for_direction`].
    pub fn directions(&self) -> Vec<String> {
        self.topology
            .roots()
            .iter()
            .map(|&i| self.nodes[i].roadmap_node().direction.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Trees whose root carries the given direction
    pub fn for_direction(&self, direction: &str) -> Forest<T>
    where
        T: Clone,
    {
        self.retain_trees(|n| n.roadmap_node().direction == direction)
    }
}

impl<'a, T> IntoIterator for &'a Forest<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: i64, parent: Option<i64>) -> RoadmapNode {
        let n = RoadmapNode::new(id, format!("Node {}", id));
        match parent {
            Some(p) => n.with_parent(p),
            None => n,
        }
    }

    fn ids<'a>(nodes: impl IntoIterator<Item = &'a RoadmapNode>) -> Vec<i64> {
        nodes.into_iter().map(|n| n.id.0).collect()
    }

    #[test]
    fn test_single_root_with_child() {
        let forest = Forest::from_nodes(vec![node(1, None), node(2, Some(1))]).unwrap();

        assert_eq!(ids(forest.roots()), vec![1]);
        assert_eq!(ids(forest.children_of(NodeId(1))), vec![2]);
        assert_eq!(forest.depth_of(NodeId(2)), Some(1));
    }

    #[test]
    fn test_multiple_roots_keep_input_order() {
        let forest = Forest::from_nodes(vec![
            node(5, None),
            node(3, None),
            node(4, Some(3)),
            node(9, None),
        ])
        .unwrap();

        assert_eq!(ids(forest.roots()), vec![5, 3, 9]);
    }

    #[test]
    fn test_children_keep_input_order_even_when_parent_comes_later() {
        let forest = Forest::from_nodes(vec![
            node(12, Some(10)),
            node(11, Some(10)),
            node(10, None),
            node(13, Some(10)),
        ])
        .unwrap();

        assert_eq!(ids(forest.children_of(NodeId(10))), vec![12, 11, 13]);
        assert_eq!(forest.parent_of(NodeId(13)).map(|n| n.id), Some(NodeId(10)));
    }

    #[test]
    fn test_children_of_unknown_id_is_empty() {
        let forest = Forest::from_nodes(vec![node(1, None)]).unwrap();
        assert_eq!(forest.children_of(NodeId(42)).count(), 0);
        assert!(forest.get(NodeId(42)).is_none());
    }

    #[test]
    fn test_duplicate_id() {
        let err = Forest::from_nodes(vec![node(1, None), node(2, Some(1)), node(1, None)]).unwrap_err();
        assert_eq!(err, RoadmapError::DuplicateNodeId(NodeId(1)));
    }

    #[test]
    fn test_dangling_parent() {
        let err = Forest::from_nodes(vec![node(1, None), node(2, Some(99))]).unwrap_err();
        assert_eq!(
            err,
            RoadmapError::DanglingParentReference {
                node_id: NodeId(2),
                parent_id: NodeId(99),
            }
        );
    }

    #[test]
    fn test_two_node_cycle() {
        let err = Forest::from_nodes(vec![node(1, Some(2)), node(2, Some(1))]).unwrap_err();
        assert_eq!(
            err,
            RoadmapError::CycleDetected {
                cycle: vec![NodeId(1), NodeId(2)],
            }
        );
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let err = Forest::from_nodes(vec![node(1, None), node(2, Some(2))]).unwrap_err();
        assert_eq!(err, RoadmapError::CycleDetected { cycle: vec![NodeId(2)] });
    }

    #[test]
    fn test_cycle_reached_from_a_tail_reports_only_the_loop() {
        // 4 hangs off the 1 → 2 → 3 → 1 loop
        let err = Forest::from_nodes(vec![
            node(4, Some(1)),
            node(1, Some(2)),
            node(2, Some(3)),
            node(3, Some(1)),
        ])
        .unwrap_err();

        match err {
            RoadmapError::CycleDetected { cycle } => {
                assert_eq!(cycle, vec![NodeId(1), NodeId(2), NodeId(3)]);
            }
            other => panic!("Expected CycleDetected, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        let forest = Forest::from_nodes(Vec::new()).unwrap();
        assert!(forest.is_empty());
        assert_eq!(forest.roots().count(), 0);
    }

    #[test]
    fn test_walk_and_breadth_first_orders() {
        let forest = Forest::from_nodes(vec![
            node(1, None),
            node(2, Some(1)),
            node(3, Some(1)),
            node(4, Some(2)),
            node(5, None),
        ])
        .unwrap();

        assert_eq!(ids(forest.walk()), vec![1, 2, 4, 3, 5]);
        assert_eq!(ids(forest.breadth_first()), vec![1, 5, 2, 3, 4]);
    }

    #[test]
    fn test_directions_and_filter() {
        let forest = Forest::from_nodes(vec![
            node(1, None).with_direction("frontend"),
            node(2, Some(1)).with_direction("frontend"),
            node(3, None).with_direction("backend"),
            node(4, Some(3)).with_direction("backend"),
            node(5, Some(4)).with_direction("backend"),
        ])
        .unwrap();

        assert_eq!(forest.directions(), vec!["backend".to_string(), "frontend".to_string()]);

        let backend = forest.for_direction("backend");
        assert_eq!(ids(backend.iter()), vec![3, 4, 5]);
        assert_eq!(ids(backend.roots()), vec![3]);
        assert_eq!(ids(backend.children_of(NodeId(4))), vec![5]);
        assert_eq!(backend.depth_of(NodeId(5)), Some(2));

        assert!(forest.for_direction("devops").is_empty());
    }

    #[test]
    fn test_directions_follow_root_labels() {
        // children carry labels of their own, the tree still belongs to its root
        let forest = Forest::from_nodes(vec![
            node(10, None).with_direction("devops"),
            node(11, Some(10)),
            node(12, Some(10)).with_direction("backend"),
        ])
        .unwrap();

        assert_eq!(forest.directions(), vec!["devops".to_string()]);
        for direction in forest.directions() {
            assert!(!forest.for_direction(&direction).is_empty(), "{} selects nothing", direction);
        }
        assert_eq!(forest.for_direction("devops").len(), 3);
        assert!(forest.for_direction("backend").is_empty());
    }

    #[test]
    fn test_map_keeps_shape() {
        let forest = Forest::from_nodes(vec![node(1, None), node(2, Some(1))]).unwrap();
        let titles = forest.map(|n| n.title.len());

        assert_eq!(titles.len(), 2);
        assert_eq!(titles.children_of(NodeId(1)).copied().collect::<Vec<_>>(), vec![6]);
    }
}

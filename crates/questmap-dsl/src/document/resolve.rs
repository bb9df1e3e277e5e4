use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use questmap_core::{Forest, NodeId, RoadmapNode, TreeBuilder};

use super::RoadmapDocument;
use crate::error::DslError;
use crate::utils::key::export_key;
use crate::validation::validate_document;

/// A validated document turned into core nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoadmap {
    nodes: Vec<RoadmapNode>,
    keys: BTreeMap<String, NodeId>,
}

impl ResolvedRoadmap {
    /// Wrap a flat node snapshot, checking that it forms a forest.
    ///
    /// Every node is keyed `node_<id>`, as on export.
    pub fn from_nodes(nodes: Vec<RoadmapNode>) -> Result<Self, DslError> {
        TreeBuilder::new().build(nodes.iter().cloned())?;
        let keys = nodes.iter().map(|node| (export_key(node.id), node.id)).collect();
        Ok(ResolvedRoadmap { nodes, keys })
    }

    /// Nodes in document order
    pub fn nodes(&self) -> &[RoadmapNode] {
        &self.nodes
    }

    /// Consume into the node list
    pub fn into_nodes(self) -> Vec<RoadmapNode> {
        self.nodes
    }

    /// The id assigned to a key
    pub fn id_of(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    /// Key to id mapping, sorted by key
    pub fn keys(&self) -> &BTreeMap<String, NodeId> {
        &self.keys
    }

    /// Build the forest
    pub fn forest(&self) -> Result<Forest, DslError> {
        Ok(TreeBuilder::new().build(self.nodes.iter().cloned())?)
    }
}

impl RoadmapDocument {
    /// Validate the document and assign ids.
    ///
    /// Nodes without an explicit id are numbered from 1 in document order,
    /// skipping every id claimed explicitly anywhere in the document.
    pub fn resolve(&self) -> Result<ResolvedRoadmap, DslError> {
        validate_document(self)?;

        let explicit: HashSet<i64> = self.nodes().filter_map(|(_, _, _, node)| node.id).collect();
        let mut next = 1i64;
        let mut keys = BTreeMap::new();
        for (_, _, _, node) in self.nodes() {
            let id = match node.id {
                Some(id) => id,
                None => {
                    while explicit.contains(&next) {
                        next += 1;
                    }
                    let id = next;
                    next += 1;
                    id
                }
            };
            keys.insert(node.key.clone(), NodeId(id));
        }

        let mut nodes = Vec::with_capacity(keys.len());
        for (_, _, direction, node) in self.nodes() {
            let id = keys
                .get(&node.key)
                .copied()
                .ok_or_else(|| DslError::InternalError(format!("No id assigned to key '{}'", node.key)))?;
            let parent_id = match &node.parent {
                Some(parent) => Some(keys.get(parent).copied().ok_or_else(|| {
                    DslError::InternalError(format!("Parent key '{}' lost after validation", parent))
                })?),
                None => None,
            };
            nodes.push(RoadmapNode {
                id,
                title: node.title.clone(),
                description: node.description.clone(),
                checkpoint: node.checkpoint,
                resources: node.resources.clone(),
                direction: direction.name.clone(),
                parent_id,
            });
        }

        debug!(
            node_count = nodes.len(),
            direction_count = self.directions.len(),
            "Resolved roadmap document"
        );

        Ok(ResolvedRoadmap { nodes, keys })
    }
}

use std::collections::{HashMap, HashSet};

use crate::document::{node_path, RoadmapDocument};
use crate::validation::{error_codes, ValidationError, Validator};

/// Validates parent references and detects loops in parent chains
#[derive(Debug, Default)]
pub struct ReferenceValidator {}

struct KeyEntry<'a> {
    direction: &'a str,
}

impl ReferenceValidator {
    /// Create a new reference validator
    pub fn new() -> Self {
        ReferenceValidator {}
    }

    fn validate_parents<'a>(
        &self,
        document: &'a RoadmapDocument,
        entries: &HashMap<&'a str, KeyEntry<'a>>,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (d, n, direction, node) in document.nodes() {
            let Some(parent) = node.parent.as_deref() else {
                continue;
            };
            let path = format!("{}.parent", node_path(d, n));

            match entries.get(parent) {
                None => errors.push(ValidationError::at(
                    error_codes::INVALID_REFERENCE,
                    format!("Node '{}' references non-existent parent '{}'", node.key, parent),
                    path,
                )),
                Some(entry) if entry.direction != direction.name => errors.push(ValidationError::at(
                    error_codes::CROSS_DIRECTION_PARENT,
                    format!(
                        "Node '{}' in direction '{}' has parent '{}' from direction '{}'",
                        node.key, direction.name, parent, entry.direction
                    ),
                    path,
                )),
                Some(_) => {}
            }
        }

        errors
    }

    /// Detects loops in the key → parent graph.
    ///
    /// Uses depth-first search from every node in document order.
    fn detect_circular_dependencies<'a>(
        &self,
        document: &'a RoadmapDocument,
        entries: &HashMap<&'a str, KeyEntry<'a>>,
    ) -> Vec<ValidationError> {
        let mut graph: HashMap<&str, &str> = HashMap::new();
        let mut order = Vec::new();
        for (_, _, _, node) in document.nodes() {
            if let Some(parent) = node.parent.as_deref() {
                if entries.contains_key(parent) && !graph.contains_key(node.key.as_str()) {
                    graph.insert(node.key.as_str(), parent);
                    order.push(node.key.as_str());
                }
            }
        }

        let mut visited = HashSet::with_capacity(graph.len());
        let mut path_set = HashSet::new();
        let mut cycles = Vec::new();
        for start in order {
            if !visited.contains(start) {
                Self::find_cycles(start, &graph, &mut visited, &mut path_set, &mut Vec::new(), &mut cycles);
            }
        }

        cycles
            .into_iter()
            .map(|cycle| {
                // Format the cycle as a → b → a
                let mut formatted = cycle.join(" → ");
                formatted.push_str(" → ");
                formatted.push_str(cycle[0]);
                ValidationError {
                    code: error_codes::CIRCULAR_DEPENDENCY,
                    message: format!("Circular dependency detected in parent chain: {}", formatted),
                    path: Some("directions".to_string()),
                }
            })
            .collect()
    }

    fn find_cycles<'a>(
        node: &'a str,
        graph: &HashMap<&'a str, &'a str>,
        visited: &mut HashSet<&'a str>,
        path_set: &mut HashSet<&'a str>,
        current_path: &mut Vec<&'a str>,
        cycles: &mut Vec<Vec<&'a str>>,
    ) {
        if visited.contains(node) {
            return;
        }

        if path_set.contains(node) {
            if let Some(cycle_start) = current_path.iter().position(|&n| n == node) {
                cycles.push(current_path[cycle_start..].to_vec());
            }
            return;
        }

        path_set.insert(node);
        current_path.push(node);

        if let Some(&parent) = graph.get(node) {
            Self::find_cycles(parent, graph, visited, path_set, current_path, cycles);
        }

        path_set.remove(node);
        current_path.pop();
        visited.insert(node);
    }
}

impl Validator for ReferenceValidator {
    fn validate(&self, document: &RoadmapDocument) -> Vec<ValidationError> {
        // First definition wins; duplicates are reported by the structure validator
        let mut entries: HashMap<&str, KeyEntry<'_>> = HashMap::new();
        for (_, _, direction, node) in document.nodes() {
            entries.entry(node.key.as_str()).or_insert(KeyEntry {
                direction: direction.name.as_str(),
            });
        }

        let mut errors = self.validate_parents(document, &entries);
        errors.extend(self.detect_circular_dependencies(document, &entries));
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DirectionDefinition, NodeDefinition};
    use pretty_assertions::assert_eq;

    fn node(key: &str, parent: Option<&str>) -> NodeDefinition {
        NodeDefinition {
            key: key.to_string(),
            id: None,
            parent: parent.map(str::to_string),
            title: "Title".to_string(),
            description: String::new(),
            resources: Vec::new(),
            checkpoint: false,
        }
    }

    fn document(directions: Vec<(&str, Vec<NodeDefinition>)>) -> RoadmapDocument {
        RoadmapDocument {
            directions: directions
                .into_iter()
                .map(|(name, nodes)| DirectionDefinition {
                    name: name.to_string(),
                    nodes,
                })
                .collect(),
            ..RoadmapDocument::new()
        }
    }

    #[test]
    fn test_valid_references() {
        let doc = document(vec![(
            "backend",
            vec![node("root", None), node("python", Some("root")), node("fastapi", Some("python"))],
        )]);
        assert!(ReferenceValidator::new().validate(&doc).is_empty());
    }

    #[test]
    fn test_invalid_reference() {
        let doc = document(vec![("backend", vec![node("a", Some("ghost"))])]);
        let errors = ReferenceValidator::new().validate(&doc);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, error_codes::INVALID_REFERENCE);
        assert_eq!(errors[0].path.as_deref(), Some("directions[0].nodes[0].parent"));
    }

    #[test]
    fn test_cross_direction_parent() {
        let doc = document(vec![
            ("frontend", vec![node("fe_root", None)]),
            ("backend", vec![node("be_api", Some("fe_root"))]),
        ]);
        let errors = ReferenceValidator::new().validate(&doc);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, error_codes::CROSS_DIRECTION_PARENT);
    }

    #[test]
    fn test_cycle_reported_once() {
        let doc = document(vec![(
            "career",
            vec![node("a", Some("c")), node("b", Some("a")), node("c", Some("b"))],
        )]);
        let errors = ReferenceValidator::new().validate(&doc);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, error_codes::CIRCULAR_DEPENDENCY);
        assert_eq!(
            errors[0].message,
            "Circular dependency detected in parent chain: a → c → b → a"
        );
    }

    #[test]
    fn test_self_parent() {
        let doc = document(vec![("devops", vec![node("loop", Some("loop"))])]);
        let errors = ReferenceValidator::new().validate(&doc);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.ends_with("loop → loop"));
    }
}

use std::collections::{HashMap, HashSet};

use crate::document::{node_path, RoadmapDocument};
use crate::utils::key::is_valid_key;
use crate::validation::{error_codes, ValidationError, Validator};

/// Validates required fields, key format and uniqueness of keys and ids
#[derive(Debug, Default)]
pub struct StructureValidator {}

impl StructureValidator {
    /// Create a new structure validator
    pub fn new() -> Self {
        StructureValidator {}
    }

    fn validate_directions(&self, document: &RoadmapDocument) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (index, direction) in document.directions.iter().enumerate() {
            let path = format!("directions[{}]", index);
            if direction.name.trim().is_empty() {
                errors.push(ValidationError::at(
                    error_codes::MISSING_REQUIRED_FIELD,
                    "Direction name cannot be empty".to_string(),
                    format!("{}.name", path),
                ));
            } else if !seen.insert(direction.name.as_str()) {
                errors.push(ValidationError::at(
                    error_codes::DUPLICATE_KEY,
                    format!("Duplicate direction: '{}' - merge its nodes into one entry", direction.name),
                    path,
                ));
            }
        }

        errors
    }

    fn validate_nodes(&self, document: &RoadmapDocument) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut keys: HashMap<&str, String> = HashMap::new();
        let mut ids: HashMap<i64, String> = HashMap::new();

        for (d, n, _, node) in document.nodes() {
            let path = node_path(d, n);

            if node.key.is_empty() {
                errors.push(ValidationError::at(
                    error_codes::MISSING_REQUIRED_FIELD,
                    "Node key cannot be empty".to_string(),
                    format!("{}.key", path),
                ));
            } else if !is_valid_key(&node.key) {
                errors.push(ValidationError::at(
                    error_codes::INVALID_KEY,
                    format!(
                        "Invalid node key: '{}' - use lower-case letters, digits, '_' and '-'",
                        node.key
                    ),
                    format!("{}.key", path),
                ));
            } else if let Some(first) = keys.get(node.key.as_str()) {
                errors.push(ValidationError::at(
                    error_codes::DUPLICATE_KEY,
                    format!("Duplicate node key: '{}' - first defined at {}", node.key, first),
                    format!("{}.key", path),
                ));
            } else {
                keys.insert(node.key.as_str(), path.clone());
            }

            if node.title.trim().is_empty() {
                errors.push(ValidationError::at(
                    error_codes::MISSING_REQUIRED_FIELD,
                    format!("Node '{}' has no title", node.key),
                    format!("{}.title", path),
                ));
            }

            if let Some(id) = node.id {
                if id < 1 {
                    errors.push(ValidationError::at(
                        error_codes::INVALID_ID,
                        format!("Node id must be positive, got {}", id),
                        format!("{}.id", path),
                    ));
                } else if let Some(first) = ids.get(&id) {
                    errors.push(ValidationError::at(
                        error_codes::DUPLICATE_ID,
                        format!("Duplicate node id: {} - first used at {}", id, first),
                        format!("{}.id", path),
                    ));
                } else {
                    ids.insert(id, path.clone());
                }
            }
        }

        errors
    }
}

impl Validator for StructureValidator {
    fn validate(&self, document: &RoadmapDocument) -> Vec<ValidationError> {
        let mut errors = self.validate_directions(document);
        errors.extend(self.validate_nodes(document));
        errors
    }
}

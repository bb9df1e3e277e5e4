//! Progress snapshot documents.

use serde::{Deserialize, Serialize};

use questmap_core::{NodeId, ProgressRecord, ProgressStatus};

use crate::document::ResolvedRoadmap;
use crate::error::DslError;
use crate::validation::{error_codes, ValidationError};

/// A user's progress written against a roadmap document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressDocument {
    /// One entry per node the user has touched
    #[serde(default)]
    pub records: Vec<ProgressEntry>,
}

/// A progress entry naming its node by key or by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Key of the node in the roadmap document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,

    /// Id of the node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<i64>,

    /// Completion state
    #[serde(default)]
    pub status: ProgressStatus,

    /// Score
    #[serde(default)]
    pub score: u32,
}

impl ProgressDocument {
    /// Turn entries into core records.
    ///
    /// Keys are looked up in the resolved roadmap. An entry naming both a key
    /// and an id must name the same node. Entries with an id are passed through
    /// unchecked; the ledger reports ids that match no node.
    pub fn resolve(&self, roadmap: &ResolvedRoadmap) -> Result<Vec<ProgressRecord>, DslError> {
        let mut records = Vec::with_capacity(self.records.len());
        let mut errors = Vec::new();

        for (index, entry) in self.records.iter().enumerate() {
            let path = format!("records[{}]", index);
            let by_key = entry.node.as_deref().map(|key| (key, roadmap.id_of(key)));

            let node_id = match (by_key, entry.node_id) {
                (None, None) => {
                    errors.push(ValidationError::at(
                        error_codes::MISSING_REQUIRED_FIELD,
                        "Progress entry names no node: set 'node' or 'node_id'".to_string(),
                        path,
                    ));
                    continue;
                }
                (Some((key, None)), _) => {
                    errors.push(ValidationError::at(
                        error_codes::INVALID_REFERENCE,
                        format!("Progress entry references unknown node key '{}'", key),
                        format!("{}.node", path),
                    ));
                    continue;
                }
                (Some((key, Some(id))), Some(explicit)) if id.0 != explicit => {
                    errors.push(ValidationError::at(
                        error_codes::INVALID_REFERENCE,
                        format!("Node key '{}' resolves to id {}, entry says {}", key, id, explicit),
                        path,
                    ));
                    continue;
                }
                (Some((_, Some(id))), _) => id,
                (None, Some(id)) => NodeId(id),
            };

            records.push(ProgressRecord::new(node_id, entry.status, entry.score));
        }

        if errors.is_empty() {
            Ok(records)
        } else {
            Err(DslError::from_validation_errors(errors))
        }
    }
}

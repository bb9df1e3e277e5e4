//! JSON shapes exchanged with the content and progress services.
//!
//! Nodes arrive as a flat list with `parent_id`; progress as a list of
//! `{node_id, status, score}` objects. Extra fields such as a record's own
//! `id` or `user_id` are ignored.

use questmap_core::{ProgressRecord, RoadmapNode};

use crate::error::DslError;

/// Parse a flat node list
pub fn parse_api_nodes(json: &str) -> Result<Vec<RoadmapNode>, DslError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a progress list
pub fn parse_api_progress(json: &str) -> Result<Vec<ProgressRecord>, DslError> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize nodes in the flat list shape
pub fn nodes_to_api_json(nodes: &[RoadmapNode]) -> Result<String, DslError> {
    Ok(serde_json::to_string_pretty(nodes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use questmap_core::{NodeId, ProgressStatus};

    #[test]
    fn test_parse_nodes() {
        let json = r#"[
            {"id": 1, "title": "Frontend Adventurer", "description": "Start here", "checkpoint": false,
             "resources": ["https://developer.mozilla.org"], "direction": "frontend", "parent_id": null},
            {"id": 2, "title": "HTML & Semantics", "direction": "frontend", "parent_id": 1, "checkpoint": true}
        ]"#;
        let nodes = parse_api_nodes(json).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].resources, vec!["https://developer.mozilla.org".to_string()]);
        assert_eq!(nodes[1].parent_id, Some(NodeId(1)));
        assert!(nodes[1].resources.is_empty());
    }

    #[test]
    fn test_parse_progress_ignores_extra_fields() {
        let json = r#"[{"id": 5, "user_id": 3, "node_id": 2, "status": "in_progress", "score": 40}]"#;
        let records = parse_api_progress(json).unwrap();
        assert_eq!(records, vec![ProgressRecord::new(2, ProgressStatus::InProgress, 40)]);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = r#"[{"node_id": 2, "status": "skipped", "score": 0}]"#;
        let err = parse_api_progress(json).unwrap_err();
        assert_eq!(err.error_code(), "ERR_DSL_JSON_PARSE");
    }

    #[test]
    fn test_nodes_roundtrip_shape() {
        let nodes = vec![RoadmapNode::new(1, "Root").with_direction("devops")];
        let json = nodes_to_api_json(&nodes).unwrap();
        assert!(json.contains("\"parent_id\": null"));
        assert_eq!(parse_api_nodes(&json).unwrap(), nodes);
    }
}

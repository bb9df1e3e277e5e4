//! Reading roadmap and progress files.
//!
//! A file whose content starts with `[` is taken as the API JSON shape (a flat
//! node list or a progress list). Anything else is an authored document.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

use questmap_core::ProgressRecord;
use questmap_dsl::{
    default_roadmap, parse_and_resolve_progress, parse_and_resolve_roadmap, parse_api_nodes, parse_api_progress,
    parse_roadmap_document_json, DslError, ResolvedRoadmap,
};
use questmap_monitoring::metrics::DocumentMetrics;
use questmap_monitoring::LogExt;

/// Source label used in logs when no roadmap file is given
pub const BUILTIN_SOURCE: &str = "builtin";

fn is_api_list(content: &str) -> bool {
    content.trim_start().starts_with('[')
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse roadmap content of any supported shape
pub fn parse_roadmap(content: &str) -> Result<ResolvedRoadmap, DslError> {
    if is_api_list(content) {
        ResolvedRoadmap::from_nodes(parse_api_nodes(content)?)
    } else if content.trim_start().starts_with('{') {
        parse_roadmap_document_json(content)?.resolve()
    } else {
        parse_and_resolve_roadmap(content)
    }
}

/// Load a roadmap file, or the built-in roadmap when `path` is `None`
pub fn load_roadmap(path: Option<&Path>) -> Result<ResolvedRoadmap> {
    let start = Instant::now();
    let (source, result) = match path {
        Some(path) => (path.display().to_string(), parse_roadmap(&read(path)?)),
        None => (BUILTIN_SOURCE.to_string(), default_roadmap()),
    };
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    let node_count = result.as_ref().map(|r| r.nodes().len()).unwrap_or(0);
    DocumentMetrics::record_roadmap_load(&source, node_count, duration_ms, result.is_ok());

    let roadmap = result
        .log_err("Roadmap rejected")
        .with_context(|| format!("Invalid roadmap {}", source))?;
    debug!(source = %source, nodes = roadmap.nodes().len(), "Roadmap loaded");
    Ok(roadmap)
}

/// Parse progress content against a roadmap
pub fn parse_progress(content: &str, roadmap: &ResolvedRoadmap) -> Result<Vec<ProgressRecord>, DslError> {
    if is_api_list(content) {
        parse_api_progress(content)
    } else {
        parse_and_resolve_progress(content, roadmap)
    }
}

/// Load a progress file; no file means no progress
pub fn load_progress(path: Option<&Path>, roadmap: &ResolvedRoadmap) -> Result<Vec<ProgressRecord>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let records = parse_progress(&read(path)?, roadmap)
        .log_err("Progress rejected")
        .with_context(|| format!("Invalid progress {}", path.display()))?;
    debug!(source = %path.display(), records = records.len(), "Progress loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use questmap_core::{NodeId, ProgressStatus};

    #[test]
    fn test_builtin_roadmap() {
        let roadmap = load_roadmap(None).unwrap();
        assert_eq!(roadmap.nodes().len(), 17);
    }

    #[test]
    fn test_api_node_list() {
        let json = r#"[
            {"id": 10, "title": "Root", "direction": "devops", "parent_id": null},
            {"id": 11, "title": "Docker", "parent_id": 10}
        ]"#;
        let roadmap = parse_roadmap(json).unwrap();
        assert_eq!(roadmap.nodes().len(), 2);
        assert_eq!(roadmap.id_of("node_11"), Some(NodeId(11)));
        assert_eq!(roadmap.nodes()[1].parent_id, Some(NodeId(10)));
    }

    #[test]
    fn test_api_list_with_dangling_parent() {
        let json = r#"[{"id": 2, "title": "Orphan", "parent_id": 1}]"#;
        assert!(parse_roadmap(json).is_err());
    }

    #[test]
    fn test_json_document() {
        let json = r#"{"format_version": "1.0", "directions": [{"name": "career", "nodes": [{"key": "start", "title": "Start"}]}]}"#;
        let roadmap = parse_roadmap(json).unwrap();
        assert_eq!(roadmap.id_of("start"), Some(NodeId(1)));
    }

    #[test]
    fn test_progress_shapes() {
        let roadmap = load_roadmap(None).unwrap();

        let api = parse_progress(r#"[{"id": 99, "user_id": 4, "node_id": 2, "status": "completed", "score": 80}]"#, &roadmap)
            .unwrap();
        assert_eq!(api, vec![ProgressRecord::new(2, ProgressStatus::Completed, 80)]);

        let document = parse_progress("records:\n  - node: fe_root\n    status: in_progress\n", &roadmap).unwrap();
        assert_eq!(document, vec![ProgressRecord::new(1, ProgressStatus::InProgress, 0)]);
    }

    #[test]
    fn test_missing_progress_file_is_empty() {
        let roadmap = load_roadmap(None).unwrap();
        assert!(load_progress(None, &roadmap).unwrap().is_empty());
    }
}

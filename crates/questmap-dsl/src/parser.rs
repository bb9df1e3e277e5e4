use crate::document::{RoadmapDocument, SUPPORTED_FORMAT_VERSION};
use crate::error::DslError;
use crate::progress::ProgressDocument;

/// Parse a YAML string into a RoadmapDocument.
///
/// Only the syntax and the format version are checked here; structure and
/// references are left to the validation module. JSON input is accepted too,
/// being a subset of YAML.
pub fn parse_roadmap_document(yaml_str: &str) -> Result<RoadmapDocument, DslError> {
    let document: RoadmapDocument = serde_yaml::from_str(yaml_str)?;
    check_version(document)
}

/// Parse a JSON string into a RoadmapDocument
pub fn parse_roadmap_document_json(json_str: &str) -> Result<RoadmapDocument, DslError> {
    let document: RoadmapDocument = serde_json::from_str(json_str)?;
    check_version(document)
}

/// Parse a YAML (or JSON) progress document
pub fn parse_progress_document(yaml_str: &str) -> Result<ProgressDocument, DslError> {
    Ok(serde_yaml::from_str(yaml_str)?)
}

fn check_version(document: RoadmapDocument) -> Result<RoadmapDocument, DslError> {
    if document.format_version != SUPPORTED_FORMAT_VERSION {
        return Err(DslError::UnsupportedVersion(document.format_version));
    }
    Ok(document)
}

use questmap_core::RoadmapError;
use std::fmt;
use thiserror::Error;

use crate::validation::{error_codes, ValidationError};

/// All possible errors that can occur while handling documents
#[derive(Error, Debug)]
pub enum DslError {
    /// Errors that occur during YAML parsing or emitting
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Errors that occur during JSON processing
    #[error("JSON processing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A single validation error
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    /// Multiple validation errors
    #[error("{}", MultipleErrorsFormat(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Unsupported document format version
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(String),

    /// The resolved nodes do not form a forest
    #[error("Roadmap error: {0}")]
    Roadmap(#[from] RoadmapError),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

// Helper struct to format multiple errors
struct MultipleErrorsFormat<'a>(&'a [ValidationError]);

impl fmt::Display for MultipleErrorsFormat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multiple validation errors ({} issues):", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, err)?;
        }
        Ok(())
    }
}

impl DslError {
    /// Create a DslError from a vector of validation errors
    pub fn from_validation_errors(mut errors: Vec<ValidationError>) -> Self {
        match errors.len() {
            0 => DslError::InternalError("Called from_validation_errors with empty vector".to_string()),
            1 => match errors.pop() {
                Some(err) => DslError::ValidationError(err),
                None => DslError::InternalError("Validation error vanished".to_string()),
            },
            _ => DslError::MultipleValidationErrors(errors),
        }
    }

    /// The validation errors carried by this error, if any
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            DslError::ValidationError(err) => std::slice::from_ref(err),
            DslError::MultipleValidationErrors(errors) => errors,
            _ => &[],
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DslError::YamlError(_) => "ERR_DSL_YAML_PARSE",
            DslError::JsonError(_) => "ERR_DSL_JSON_PARSE",
            DslError::ValidationError(err) => err.code,
            DslError::MultipleValidationErrors(_) => "ERR_DSL_VALIDATION_MULTIPLE",
            DslError::UnsupportedVersion(_) => error_codes::UNSUPPORTED_VERSION,
            DslError::Roadmap(err) => err.error_code(),
            DslError::InternalError(_) => "ERR_DSL_INTERNAL",
        }
    }
}

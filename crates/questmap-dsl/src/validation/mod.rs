use std::error::Error;
use std::fmt;

use crate::document::RoadmapDocument;
use crate::error::DslError;

mod reference;
mod structure;

pub use reference::ReferenceValidator;
pub use structure::StructureValidator;

/// Represents a validation error found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code (should be a constant identifier)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Optional path to the location of the error (e.g., "directions[0].nodes[2]")
    pub path: Option<String>,
}

impl ValidationError {
    pub(crate) fn at(code: &'static str, message: String, path: String) -> Self {
        Self {
            code,
            message,
            path: Some(path),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl Error for ValidationError {}

/// Validation error codes
pub mod error_codes {
    /// Two nodes share a key
    pub const DUPLICATE_KEY: &str = "ERR_DSL_VALIDATION_DUPLICATE_KEY";

    /// Two nodes share an explicit id
    pub const DUPLICATE_ID: &str = "ERR_DSL_VALIDATION_DUPLICATE_ID";

    /// An explicit id is zero or negative
    pub const INVALID_ID: &str = "ERR_DSL_VALIDATION_INVALID_ID";

    /// A key does not match the key pattern
    pub const INVALID_KEY: &str = "ERR_DSL_VALIDATION_INVALID_KEY";

    /// A parent or progress entry names a node that does not exist
    pub const INVALID_REFERENCE: &str = "ERR_DSL_VALIDATION_INVALID_REFERENCE";

    /// A parent lives in another direction
    pub const CROSS_DIRECTION_PARENT: &str = "ERR_DSL_VALIDATION_CROSS_DIRECTION_PARENT";

    /// A parent chain loops
    pub const CIRCULAR_DEPENDENCY: &str = "ERR_DSL_VALIDATION_CIRCULAR_DEPENDENCY";

    /// Missing required field
    pub const MISSING_REQUIRED_FIELD: &str = "ERR_DSL_VALIDATION_MISSING_REQUIRED_FIELD";

    /// Unknown format version
    pub const UNSUPPORTED_VERSION: &str = "ERR_DSL_VALIDATION_UNSUPPORTED_VERSION";
}

/// A trait for validators that check specific aspects of a roadmap document
pub trait Validator {
    /// Validate the document and return a list of validation errors (if any)
    fn validate(&self, document: &RoadmapDocument) -> Vec<ValidationError>;
}

/// Run every validator and collect all errors
pub fn validate_document(document: &RoadmapDocument) -> Result<(), DslError> {
    let validators: Vec<Box<dyn Validator>> = vec![
        Box::new(StructureValidator::new()),
        Box::new(ReferenceValidator::new()),
    ];

    let mut errors = Vec::new();
    for validator in validators {
        errors.extend(validator.validate(document));
    }

    if !errors.is_empty() {
        tracing::debug!(error_count = errors.len(), "Roadmap document failed validation");
        return Err(DslError::from_validation_errors(errors));
    }

    Ok(())
}

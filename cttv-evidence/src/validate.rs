use std::fmt::{self, Display};
use std::path::Path;

use serde_json::Value;

use cttv_core::utils::get_dynamic_reader;

use crate::errors::{EvidenceError, Result};

///
/// Where and why an evidence string failed validation.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// JSON pointer to the offending value, `""` for the root.
    pub path: String,
    pub message: String,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{} at {}", self.message, path)
    }
}

impl std::error::Error for ValidationError {}

pub trait EvidenceValidator {
    fn validate(&self, evidence: &Value) -> std::result::Result<(), ValidationError>;
}

///
/// Validator used when no schema is configured.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl EvidenceValidator for AcceptAll {
    fn validate(&self, _evidence: &Value) -> std::result::Result<(), ValidationError> {
        Ok(())
    }
}

///
/// JSON Schema validator backed by `jsonschema`. The draft is taken from the
/// schema's `$schema` keyword; local `$ref`s are resolved. The schema is
/// compiled when loaded, so a malformed schema fails before any record is
/// processed.
///
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    pub fn new(schema: Value) -> Result<Self> {
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| EvidenceError::InvalidSchema(e.to_string()))?;
        Ok(SchemaValidator { validator })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path)
            .map_err(|e| EvidenceError::MappingFileReadError(format!("{:#}", e)))?;
        let schema: Value = serde_json::from_reader(reader)?;
        SchemaValidator::new(schema)
    }
}

impl EvidenceValidator for SchemaValidator {
    /// Reports the first violation only.
    fn validate(&self, evidence: &Value) -> std::result::Result<(), ValidationError> {
        match self.validator.iter_errors(evidence).next() {
            Some(error) => Err(ValidationError {
                path: error.instance_path.to_string(),
                message: error.to_string(),
            }),
            None => Ok(()),
        }
    }
}

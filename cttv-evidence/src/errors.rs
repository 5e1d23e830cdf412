use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Error, Debug)]
pub enum EvidenceError {
    #[error("Can't read mapping file: {0}")]
    MappingFileReadError(String),

    #[error("No mapping provided for trait: {name} (line {line})")]
    MissingOntologyMapping { name: String, line: usize },

    #[error("Invalid evidence string schema: {0}")]
    InvalidSchema(String),

    #[error(
        "Evidence string does not validate against schema: {error}\n\
         ClinVar record: {record}\n\
         trait: {trait_name} ({ontology_id})\n\
         ensembl gene id: {gene_id}"
    )]
    Validation {
        error: ValidationError,
        record: String,
        trait_name: String,
        ontology_id: String,
        gene_id: String,
    },

    #[error("Invalid run configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EvidenceError>;

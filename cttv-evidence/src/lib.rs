//! # cttv-evidence
//!
//! Joins ClinVar variant records against a variant -> gene/consequence table
//! and a trait -> ontology mapping, expanding every surviving combination into
//! an evidence string.
//!
//! ## Main Components
//!
//! - **`ConsequenceTypeTable`**: variant id -> gene consequences, with a fixed
//!   key fallback order (rs id, nsv id, coordinates, accession)
//! - **`TraitMapper`**: trait name -> ontology terms, tracking which mappings
//!   were used
//! - **`RecordJoinEngine`**: filters and expands records, returning the report
//!   effects of each one
//! - **`RunReport`**: counters for every way a record can be dropped, plus the
//!   emitted evidence
//! - **`EvidenceString`**: the serialised germline/somatic output shapes
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use cttv_core::models::VariantRecord;
//! use cttv_evidence::{
//!     AllowedSignificance, ConsequenceTypeTable, RecordJoinEngine, RunReport, TraitMapper,
//! };
//!
//! let genes = ConsequenceTypeTable::from_reader(Cursor::new(
//!     "rs1\tX\tENSG01\tY\tmissense_variant\tZ\n",
//! ))
//! .unwrap();
//! let mut traits =
//!     TraitMapper::from_reader(Cursor::new("long qt syndrome\tEFO:0000768\n")).unwrap();
//!
//! let record = VariantRecord {
//!     rs_id: Some("rs1".to_string()),
//!     accession: "RCV000000001".to_string(),
//!     clinical_significance: "pathogenic".to_string(),
//!     allele_origins: vec!["germline".to_string()],
//!     traits: vec![vec!["Long QT syndrome".to_string()]],
//!     ..Default::default()
//! };
//!
//! let mut report = RunReport::new();
//! let mut engine = RecordJoinEngine::new(&genes, &mut traits, AllowedSignificance::default());
//! let n_emitted = engine.process(&record, &mut report).unwrap();
//! assert_eq!(n_emitted, 1);
//! ```
//!
pub mod allele_origin;
pub mod config;
pub mod consequence;
pub mod consts;
pub mod engine;
pub mod errors;
pub mod evidence;
pub mod report;
pub mod significance;
pub mod so_term;
pub mod trait_mapping;
pub mod validate;

// re-export things
pub use allele_origin::*;
pub use config::*;
pub use consequence::*;
pub use engine::*;
pub use errors::*;
pub use evidence::*;
pub use report::*;
pub use significance::*;
pub use so_term::*;
pub use trait_mapping::*;
pub use validate::*;

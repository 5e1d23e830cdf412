use std::fmt::{self, Display};

use chrono::{DateTime, Utc};

use cttv_evidence::{ProvenanceRow, TraitMapper};

use crate::consts::{ZOOMA_ANNOTATOR, ZOOMA_DATE_FORMAT, ZOOMA_PROPERTY_TYPE};

///
/// One line of the zooma provenance file: which study and variant a trait
/// name was annotated with which ontology term.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomaRow {
    pub study: String,
    pub bioentity: String,
    pub property_value: String,
    pub semantic_tag: String,
    pub annotation_date: String,
}

impl ZoomaRow {
    pub fn from_provenance(row: &ProvenanceRow, annotation_date: &str) -> Self {
        ZoomaRow {
            study: row.accession.clone(),
            bioentity: row.rs_id.clone().unwrap_or_default(),
            property_value: row.trait_name.clone(),
            semantic_tag: row.ontology_id.clone(),
            annotation_date: annotation_date.to_string(),
        }
    }

    /// A mapping that was never used: no study, no variant.
    pub fn from_unused_mapping(trait_name: &str, ontology_id: &str, annotation_date: &str) -> Self {
        ZoomaRow {
            study: String::new(),
            bioentity: String::new(),
            property_value: trait_name.to_string(),
            semantic_tag: ontology_id.to_string(),
            annotation_date: annotation_date.to_string(),
        }
    }
}

impl Display for ZoomaRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.study,
            self.bioentity,
            ZOOMA_PROPERTY_TYPE,
            self.property_value,
            self.semantic_tag,
            ZOOMA_ANNOTATOR,
            self.annotation_date
        )
    }
}

pub fn zooma_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(ZOOMA_DATE_FORMAT).to_string()
}

///
/// All zooma rows of a run: one per emitted evidence record, in emission
/// order, followed by one per ontology term of every mapping that never
/// produced evidence, in mapping file order.
///
pub fn zooma_rows(
    provenance: &[ProvenanceRow],
    mapper: &TraitMapper,
    timestamp: &DateTime<Utc>,
) -> Vec<ZoomaRow> {
    let date = zooma_date(timestamp);

    let used = provenance
        .iter()
        .map(|row| ZoomaRow::from_provenance(row, &date));

    let unused = mapper.unused_mappings().flat_map(|(name, mappings)| {
        mappings
            .iter()
            .map(|mapping| ZoomaRow::from_unused_mapping(name, &mapping.ontology_id, &date))
            .collect::<Vec<_>>()
    });

    used.chain(unused).collect()
}

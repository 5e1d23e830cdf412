use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};

use serde_json::Value;

use crate::evidence::EvidenceRecord;

///
/// Named run counters. Every drop category has its own counter so no record
/// disappears silently.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Counter {
    /// ClinVar records read from the input.
    ClinvarRecords,
    /// Variant records (one per ClinVar measure) processed.
    VariantRecords,
    /// Variant records that produced at least one evidence string.
    RecordsWithEvidence,
    EvidenceStrings,
    /// Variant records that produced more than one evidence string.
    MultipleEvidenceStrings,
    AllowedSignificanceNoRs,
    MultipleAlleleOrigin,
    GermlineSomatic,
    NoRecognisedAlleleOrigin,
    NoVariantToGeneMapping,
    UnmappedTraitGroups,
    MoreThanOneOntologyTerm,
    EvidenceFromNsvRecords,
    Nsvs,
    NsvSkippedClinicalSignificance,
    /// Tuples skipped because of a clinical significance outside the allowed set.
    SkippedClinicalSignificance,
}

const N_COUNTERS: usize = 16;

impl Counter {
    pub const ALL: [Counter; N_COUNTERS] = [
        Counter::ClinvarRecords,
        Counter::VariantRecords,
        Counter::RecordsWithEvidence,
        Counter::EvidenceStrings,
        Counter::MultipleEvidenceStrings,
        Counter::AllowedSignificanceNoRs,
        Counter::MultipleAlleleOrigin,
        Counter::GermlineSomatic,
        Counter::NoRecognisedAlleleOrigin,
        Counter::NoVariantToGeneMapping,
        Counter::UnmappedTraitGroups,
        Counter::MoreThanOneOntologyTerm,
        Counter::EvidenceFromNsvRecords,
        Counter::Nsvs,
        Counter::NsvSkippedClinicalSignificance,
        Counter::SkippedClinicalSignificance,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

///
/// One row of the zooma provenance file.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceRow {
    pub accession: String,
    pub rs_id: Option<String>,
    pub trait_name: String,
    pub ontology_id: String,
}

///
/// A single change to the report. The join engine returns these instead of
/// mutating the report itself, so each increment site can be tested alone.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Increment(Counter),
    UnrecognisedAlleleOrigin(String),
    UnmappedTrait(String),
    UnrecognisedSignificance(String),
    Nsv(String),
    Emitted {
        record: Box<EvidenceRecord>,
        evidence: Value,
    },
}

///
/// Counters, sets and the emitted records of one pipeline run.
///
#[derive(Debug, Default)]
pub struct RunReport {
    counters: [u64; N_COUNTERS],

    unrecognised_significances: BTreeSet<String>,
    ontology_ids: BTreeSet<String>,
    gene_uris: BTreeSet<String>,

    unrecognised_allele_origins: BTreeMap<String, u64>,
    unmapped_traits: BTreeMap<String, u64>,

    nsvs: Vec<String>,
    evidence_records: Vec<EvidenceRecord>,
    evidence_strings: Vec<Value>,
    provenance: Vec<ProvenanceRow>,
}

impl RunReport {
    pub fn new() -> Self {
        RunReport::default()
    }

    pub fn counter(&self, counter: Counter) -> u64 {
        self.counters[counter.index()]
    }

    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Increment(counter) => self.counters[counter.index()] += 1,
            Effect::UnrecognisedAlleleOrigin(origin) => {
                *self.unrecognised_allele_origins.entry(origin).or_insert(0) += 1;
            }
            Effect::UnmappedTrait(name) => {
                *self.unmapped_traits.entry(name).or_insert(0) += 1;
            }
            Effect::UnrecognisedSignificance(significance) => {
                self.unrecognised_significances.insert(significance);
            }
            Effect::Nsv(nsv_id) => self.nsvs.push(nsv_id),
            Effect::Emitted { record, evidence } => {
                self.counters[Counter::EvidenceStrings.index()] += 1;
                self.ontology_ids
                    .insert(record.resolved_trait.ontology_id.clone());
                self.gene_uris.insert(record.gene_uri());
                self.provenance.push(ProvenanceRow {
                    accession: record.variant.accession.clone(),
                    rs_id: record.variant.rs_id.clone(),
                    trait_name: record.resolved_trait.name.clone(),
                    ontology_id: record.resolved_trait.ontology_id.clone(),
                });
                self.evidence_strings.push(evidence);
                self.evidence_records.push(*record);
            }
        }
    }

    pub fn apply_all<I: IntoIterator<Item = Effect>>(&mut self, effects: I) {
        for effect in effects {
            self.apply(effect);
        }
    }

    pub fn unrecognised_significances(&self) -> &BTreeSet<String> {
        &self.unrecognised_significances
    }

    pub fn ontology_ids(&self) -> &BTreeSet<String> {
        &self.ontology_ids
    }

    pub fn gene_uris(&self) -> &BTreeSet<String> {
        &self.gene_uris
    }

    pub fn unrecognised_allele_origins(&self) -> &BTreeMap<String, u64> {
        &self.unrecognised_allele_origins
    }

    pub fn unmapped_traits(&self) -> &BTreeMap<String, u64> {
        &self.unmapped_traits
    }

    pub fn nsvs(&self) -> &[String] {
        &self.nsvs
    }

    pub fn evidence_records(&self) -> &[EvidenceRecord] {
        &self.evidence_records
    }

    pub fn evidence_strings(&self) -> &[Value] {
        &self.evidence_strings
    }

    pub fn provenance(&self) -> &[ProvenanceRow] {
        &self.provenance
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = |counter| self.counter(counter);

        writeln!(f, "{} ClinVar records in total", c(Counter::ClinvarRecords))?;
        writeln!(f, "{} variant records (ClinVar measures) processed", c(Counter::VariantRecords))?;
        writeln!(f, "{} evidence string jsons generated", c(Counter::EvidenceStrings))?;
        writeln!(
            f,
            "{} variant records generated at least one evidence string",
            c(Counter::RecordsWithEvidence)
        )?;
        writeln!(
            f,
            "{} clinical significance string(s) not found among those described in ClinVar documentation: {:?}",
            self.unrecognised_significances.len(),
            self.unrecognised_significances
        )?;
        writeln!(
            f,
            "{} distinct ensembl gene ids appear in generated evidence string json objects",
            self.gene_uris.len()
        )?;
        writeln!(
            f,
            "{} distinct ontology terms found to include in generated evidence string json objects",
            self.ontology_ids.len()
        )?;
        writeln!(
            f,
            "{} variant records with allowed clinical significance DO NOT have an rs id",
            c(Counter::AllowedSignificanceNoRs)
        )?;
        writeln!(
            f,
            "{} variant records generated more than one evidence string",
            c(Counter::MultipleEvidenceStrings)
        )?;
        writeln!(
            f,
            "{} variant records with germline and somatic origins",
            c(Counter::GermlineSomatic)
        )?;
        writeln!(
            f,
            "{} variant records with more than one allele origin",
            c(Counter::MultipleAlleleOrigin)
        )?;
        writeln!(
            f,
            "{} combinations skipped due to a clinical significance outside the allowed set",
            c(Counter::SkippedClinicalSignificance)
        )?;
        writeln!(
            f,
            "{} combinations with allowed clinical significance were skipped due to a lack of variant->ENSG mapping",
            c(Counter::NoVariantToGeneMapping)
        )?;
        writeln!(
            f,
            "{} trait groups could not be mapped to an ontology term",
            c(Counter::UnmappedTraitGroups)
        )?;
        writeln!(
            f,
            "{} variant records with allowed clinical significance, variant->ENSG mapping and ontology mapping were skipped due to a lack of a valid allele origin",
            c(Counter::NoRecognisedAlleleOrigin)
        )?;
        writeln!(f, "Unprocessed allele origins:")?;
        for (origin, count) in &self.unrecognised_allele_origins {
            writeln!(f, " {}: {}", origin, count)?;
        }
        writeln!(
            f,
            "{} evidence strings with a trait mapped to more than one ontology term",
            c(Counter::MoreThanOneOntologyTerm)
        )?;
        writeln!(
            f,
            "{} evidence strings were generated from variant records with nsv ids",
            c(Counter::EvidenceFromNsvRecords)
        )?;
        writeln!(f, "{} total nsvs found", c(Counter::Nsvs))?;
        write!(
            f,
            "{} nsv combinations were skipped because of a different clinical significance",
            c(Counter::NsvSkippedClinicalSignificance)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_counters_start_at_zero() {
        let report = RunReport::new();
        for counter in Counter::ALL {
            assert_eq!(report.counter(counter), 0);
        }
    }

    #[rstest]
    fn test_counter_indices_are_distinct() {
        for (position, counter) in Counter::ALL.iter().enumerate() {
            assert_eq!(counter.index(), position);
        }
    }

    #[rstest]
    fn test_apply_effects() {
        let mut report = RunReport::new();
        report.apply_all(vec![
            Effect::Increment(Counter::NoVariantToGeneMapping),
            Effect::Increment(Counter::NoVariantToGeneMapping),
            Effect::UnmappedTrait("Long QT syndrome".to_string()),
            Effect::UnmappedTrait("Long QT syndrome".to_string()),
            Effect::UnrecognisedAlleleOrigin("tissue-culture".to_string()),
            Effect::UnrecognisedSignificance("pathogenic, low penetrance".to_string()),
            Effect::UnrecognisedSignificance("pathogenic, low penetrance".to_string()),
            Effect::Nsv("nsv1".to_string()),
        ]);

        assert_eq!(report.counter(Counter::NoVariantToGeneMapping), 2);
        assert_eq!(report.unmapped_traits()["Long QT syndrome"], 2);
        assert_eq!(report.unrecognised_allele_origins()["tissue-culture"], 1);
        assert_eq!(report.unrecognised_significances().len(), 1);
        assert_eq!(report.nsvs(), &["nsv1".to_string()]);
    }

    #[rstest]
    fn test_summary_mentions_every_origin() {
        let mut report = RunReport::new();
        report.apply(Effect::UnrecognisedAlleleOrigin("tissue-culture".to_string()));
        report.apply(Effect::Increment(Counter::ClinvarRecords));

        let summary = report.to_string();
        assert!(summary.starts_with("1 ClinVar records in total"));
        assert!(summary.contains(" tissue-culture: 1"));
    }
}

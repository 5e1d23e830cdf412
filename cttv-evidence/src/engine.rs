use log::info;

use cttv_core::models::{ClinvarRecord, VariantRecord};

use crate::allele_origin::{AlleleOrigin, classify_allele_origins};
use crate::consequence::{ConsequenceTypeTable, GeneConsequence};
use crate::consts::PROGRESS_INTERVAL;
use crate::errors::{EvidenceError, Result};
use crate::evidence::{EvidenceRecord, EvidenceString};
use crate::report::{Counter, Effect, RunReport};
use crate::significance::{AllowedSignificance, is_recognised_significance};
use crate::trait_mapping::{ResolvedTrait, TraitMapper};
use crate::validate::{AcceptAll, EvidenceValidator};

///
/// Why a (consequence, trait, origin) combination was not emitted.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ClinicalSignificance,
    NoGeneMapping,
}

impl SkipReason {
    ///
    /// Report effects for one skipped combination of `record`.
    ///
    pub fn effects(self, record: &VariantRecord) -> Vec<Effect> {
        match self {
            SkipReason::ClinicalSignificance => {
                let mut effects = vec![Effect::Increment(Counter::SkippedClinicalSignificance)];
                if record.nsv_id.is_some() {
                    effects.push(Effect::Increment(Counter::NsvSkippedClinicalSignificance));
                }
                effects
            }
            SkipReason::NoGeneMapping => vec![Effect::Increment(Counter::NoVariantToGeneMapping)],
        }
    }
}

///
/// Skip filter for one combination. Checks run in a fixed order and the
/// first failing check decides the reason: clinical significance first, then
/// the presence of a gene mapping. Allele origins are already restricted to
/// germline/somatic by [AlleleOrigin], so they need no check here.
///
pub fn filter_combination<'c>(
    record: &VariantRecord,
    consequence: Option<&'c GeneConsequence>,
    allowed: &AllowedSignificance,
) -> std::result::Result<&'c GeneConsequence, SkipReason> {
    if !allowed.is_allowed(&record.clinical_significance) {
        return Err(SkipReason::ClinicalSignificance);
    }

    consequence.ok_or(SkipReason::NoGeneMapping)
}

///
/// Traits resolved from every group of a record.
///
#[derive(Debug, Default)]
pub struct TraitResolution {
    pub traits: Vec<ResolvedTrait>,
    /// Number of ontology terms each group resolved to (0 when unmapped).
    pub terms_per_group: Vec<usize>,
    pub effects: Vec<Effect>,
}

///
/// Resolve every trait group of a record. Each unmapped group is counted
/// once, and every name in it is reported as unmapped.
///
pub fn resolve_traits(mapper: &TraitMapper, groups: &[Vec<String>]) -> TraitResolution {
    let mut resolution = TraitResolution::default();

    for (group_index, names) in groups.iter().enumerate() {
        match mapper.resolve(names, group_index) {
            Some(traits) => {
                resolution.terms_per_group.push(traits.len());
                resolution.traits.extend(traits);
            }
            None => {
                resolution.terms_per_group.push(0);
                resolution
                    .effects
                    .push(Effect::Increment(Counter::UnmappedTraitGroups));
                resolution
                    .effects
                    .extend(names.iter().map(|name| Effect::UnmappedTrait(name.clone())));
            }
        }
    }

    resolution
}

///
/// Joins variant records against the consequence table and the trait mapper
/// and expands them into evidence records.
///
/// [RecordJoinEngine::join] is read only and returns the report effects of
/// one record; [RecordJoinEngine::process] applies them and marks the traits
/// that produced evidence as used. Because of that marking, records must be
/// processed in order on one thread.
///
pub struct RecordJoinEngine<'a> {
    consequences: &'a ConsequenceTypeTable,
    traits: &'a mut TraitMapper,
    allowed: AllowedSignificance,
    validator: Box<dyn EvidenceValidator + 'a>,
}

impl<'a> RecordJoinEngine<'a> {
    pub fn new(
        consequences: &'a ConsequenceTypeTable,
        traits: &'a mut TraitMapper,
        allowed: AllowedSignificance,
    ) -> Self {
        RecordJoinEngine {
            consequences,
            traits,
            allowed,
            validator: Box::new(AcceptAll),
        }
    }

    pub fn with_validator(mut self, validator: Box<dyn EvidenceValidator + 'a>) -> Self {
        self.validator = validator;
        self
    }

    pub fn trait_mapper(&self) -> &TraitMapper {
        &*self.traits
    }

    ///
    /// Process every measure of a ClinVar record.
    ///
    /// # Returns
    /// The number of evidence strings emitted for the record.
    pub fn process_clinvar_record(
        &mut self,
        record: &ClinvarRecord,
        report: &mut RunReport,
    ) -> Result<usize> {
        report.apply(Effect::Increment(Counter::ClinvarRecords));

        let n_records = report.counter(Counter::ClinvarRecords);
        if n_records % PROGRESS_INTERVAL == 0 {
            info!("{} records processed", n_records);
        }

        let mut n_emitted = 0;
        for variant in record.variant_records() {
            n_emitted += self.process(&variant, report)?;
        }

        Ok(n_emitted)
    }

    ///
    /// Join one variant record, apply its effects to `report` and mark the
    /// traits it used.
    ///
    /// # Returns
    /// The number of evidence strings emitted.
    pub fn process(&mut self, record: &VariantRecord, report: &mut RunReport) -> Result<usize> {
        let effects = self.join(record)?;

        let mut n_emitted = 0;
        for effect in &effects {
            if let Effect::Emitted { record, .. } = effect {
                self.traits.mark_used(&record.resolved_trait.name);
                n_emitted += 1;
            }
        }

        report.apply_all(effects);

        Ok(n_emitted)
    }

    ///
    /// Compute the report effects of one variant record without changing any
    /// state.
    ///
    /// Fails only when an evidence string does not pass validation.
    pub fn join(&self, record: &VariantRecord) -> Result<Vec<Effect>> {
        let mut effects = vec![Effect::Increment(Counter::VariantRecords)];

        if let Some(nsv_id) = &record.nsv_id {
            effects.push(Effect::Increment(Counter::Nsvs));
            effects.push(Effect::Nsv(nsv_id.clone()));
        }
        if record.allele_origins.len() > 1 {
            effects.push(Effect::Increment(Counter::MultipleAlleleOrigin));
        }

        let consequences = self.consequences.lookup(record);

        let resolution = resolve_traits(&*self.traits, &record.traits);
        effects.extend(resolution.effects);

        let origins = classify_allele_origins(&record.allele_origins);
        if origins.len() > 1 {
            effects.push(Effect::Increment(Counter::GermlineSomatic));
        }

        let significance_allowed = self.allowed.is_allowed(&record.clinical_significance);
        if significance_allowed && record.rs_id.is_none() {
            effects.push(Effect::Increment(Counter::AllowedSignificanceNoRs));
        }

        // the product is empty without origins, so the earlier checks still
        // decide which counter the dropped combinations go to
        if origins.is_empty() && !resolution.traits.is_empty() {
            let mut dropped_for_origin = false;
            for consequence in &consequences {
                for _ in &resolution.traits {
                    match filter_combination(record, *consequence, &self.allowed) {
                        Ok(_) => dropped_for_origin = true,
                        Err(reason) => effects.extend(reason.effects(record)),
                    }
                }
            }

            if dropped_for_origin {
                effects.push(Effect::Increment(Counter::NoRecognisedAlleleOrigin));
                effects.extend(
                    record
                        .allele_origins
                        .iter()
                        .map(|origin| Effect::UnrecognisedAlleleOrigin(origin.clone())),
                );
            }
        }

        let mut n_emitted = 0;
        for consequence in &consequences {
            for resolved_trait in &resolution.traits {
                for origin in &origins {
                    let consequence =
                        match filter_combination(record, *consequence, &self.allowed) {
                            Ok(consequence) => consequence,
                            Err(reason) => {
                                effects.extend(reason.effects(record));
                                continue;
                            }
                        };

                    effects.extend(self.emit(
                        record,
                        consequence,
                        resolved_trait,
                        *origin,
                        resolution.terms_per_group[resolved_trait.group_index],
                    )?);
                    n_emitted += 1;
                }
            }
        }

        if n_emitted > 0 {
            effects.push(Effect::Increment(Counter::RecordsWithEvidence));
        }
        if n_emitted > 1 {
            effects.push(Effect::Increment(Counter::MultipleEvidenceStrings));
        }

        Ok(effects)
    }

    fn emit(
        &self,
        record: &VariantRecord,
        consequence: &GeneConsequence,
        resolved_trait: &ResolvedTrait,
        origin: AlleleOrigin,
        n_group_terms: usize,
    ) -> Result<Vec<Effect>> {
        let evidence_record = EvidenceRecord {
            variant: record.clone(),
            consequence: consequence.clone(),
            resolved_trait: resolved_trait.clone(),
            origin,
        };

        let evidence = EvidenceString::from_record(&evidence_record).to_value()?;
        self.validator
            .validate(&evidence)
            .map_err(|error| EvidenceError::Validation {
                error,
                record: record.to_string(),
                trait_name: resolved_trait.name.clone(),
                ontology_id: resolved_trait.ontology_id.clone(),
                gene_id: consequence.gene_id.clone(),
            })?;

        let mut effects = Vec::with_capacity(4);
        if record.nsv_id.is_some() {
            effects.push(Effect::Increment(Counter::EvidenceFromNsvRecords));
        }
        if n_group_terms > 1 {
            effects.push(Effect::Increment(Counter::MoreThanOneOntologyTerm));
        }
        if !is_recognised_significance(&record.clinical_significance) {
            effects.push(Effect::UnrecognisedSignificance(
                record.clinical_significance.clone(),
            ));
        }
        effects.push(Effect::Emitted {
            record: Box::new(evidence_record),
            evidence,
        });

        Ok(effects)
    }
}

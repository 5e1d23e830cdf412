use serde::Serialize;

use cttv_core::models::VariantRecord;

use crate::allele_origin::AlleleOrigin;
use crate::consequence::GeneConsequence;
use crate::consts::*;
use crate::trait_mapping::ResolvedTrait;

///
/// One surviving (variant, consequence, trait, origin) combination.
///
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceRecord {
    pub variant: VariantRecord,
    pub consequence: GeneConsequence,
    pub resolved_trait: ResolvedTrait,
    pub origin: AlleleOrigin,
}

impl EvidenceRecord {
    pub fn gene_uri(&self) -> String {
        ensembl_gene_uri(&self.consequence.gene_id)
    }
}

pub fn ensembl_gene_uri(gene_id: &str) -> String {
    format!("{}{}", ENSEMBL_GENE_URI_PREFIX, gene_id)
}

fn variant_uri(variant: &VariantRecord) -> String {
    match (&variant.rs_id, &variant.nsv_id) {
        (Some(rs_id), _) => format!("{}{}", DBSNP_URI_PREFIX, rs_id),
        (None, Some(nsv_id)) => format!("{}{}", DBVAR_URI_PREFIX, nsv_id),
        (None, None) => clinvar_uri(&variant.accession),
    }
}

fn clinvar_uri(accession: &str) -> String {
    format!("{}{}", CLINVAR_URI_PREFIX, accession)
}

fn variant_type(variant: &VariantRecord) -> &'static str {
    if variant.nsv_id.is_some() && variant.rs_id.is_none() {
        STRUCTURAL_VARIANT_TYPE
    } else {
        SNP_VARIANT_TYPE
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UniqueAssociationFields {
    pub clinvar_accession: String,
    pub allele_origin: AlleleOrigin,
    pub variant_id: String,
    pub gene: String,
    pub phenotype: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Target {
    pub id: String,
    pub target_type: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Disease {
    pub id: String,
    pub name: String,
    pub source_name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Variant {
    pub id: String,
    #[serde(rename = "type")]
    pub variant_type: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GeneToVariant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functional_consequence: Option<String>,
    pub consequence_name: String,
    pub is_associated: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VariantToDisease {
    pub clinical_significance: String,
    pub allele_origin: AlleleOrigin,
    pub unique_experiment_reference: String,
    pub is_associated: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GeneticsEvidence {
    pub gene2variant: GeneToVariant,
    pub variant2disease: VariantToDisease,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct KnownMutation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functional_consequence: Option<String>,
    pub preferred_name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SomaticEvidence {
    pub known_mutations: Vec<KnownMutation>,
    pub clinical_significance: String,
    pub allele_origin: AlleleOrigin,
    pub unique_experiment_reference: String,
    pub is_associated: bool,
}

///
/// Fields every evidence string carries regardless of its allele origin.
///
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EvidenceHeader {
    #[serde(rename = "sourceID")]
    pub source_id: &'static str,
    #[serde(rename = "type")]
    pub evidence_type: &'static str,
    pub access_level: &'static str,
    pub unique_association_fields: UniqueAssociationFields,
    pub target: Target,
    pub disease: Disease,
}

///
/// The serialised output unit. The allele origin decides the shape: germline
/// records carry gene->variant and variant->disease evidence, somatic records
/// a list of known mutations.
///
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum EvidenceString {
    Genetics {
        #[serde(flatten)]
        header: EvidenceHeader,
        variant: Variant,
        evidence: GeneticsEvidence,
    },
    Somatic {
        #[serde(flatten)]
        header: EvidenceHeader,
        evidence: SomaticEvidence,
    },
}

impl EvidenceString {
    pub fn from_record(record: &EvidenceRecord) -> Self {
        let variant = &record.variant;
        let so_term = &record.consequence.so_term;
        let experiment_reference = clinvar_uri(&variant.accession);

        let (source_id, evidence_type) = match record.origin {
            AlleleOrigin::Germline => (GERMLINE_SOURCE_ID, GERMLINE_EVIDENCE_TYPE),
            AlleleOrigin::Somatic => (SOMATIC_SOURCE_ID, SOMATIC_EVIDENCE_TYPE),
        };

        let header = EvidenceHeader {
            source_id,
            evidence_type,
            access_level: ACCESS_LEVEL,
            unique_association_fields: UniqueAssociationFields {
                clinvar_accession: experiment_reference.clone(),
                allele_origin: record.origin,
                variant_id: variant_uri(variant),
                gene: record.consequence.gene_id.clone(),
                phenotype: record.resolved_trait.ontology_id.clone(),
            },
            target: Target {
                id: record.gene_uri(),
                target_type: TARGET_TYPE,
            },
            disease: Disease {
                id: record.resolved_trait.ontology_id.clone(),
                name: record
                    .resolved_trait
                    .ontology_label
                    .clone()
                    .unwrap_or_else(|| record.resolved_trait.name.clone()),
                source_name: record.resolved_trait.name.clone(),
            },
        };

        match record.origin {
            AlleleOrigin::Germline => EvidenceString::Genetics {
                header,
                variant: Variant {
                    id: variant_uri(variant),
                    variant_type: variant_type(variant),
                },
                evidence: GeneticsEvidence {
                    gene2variant: GeneToVariant {
                        functional_consequence: so_term.uri(),
                        consequence_name: so_term.name().to_string(),
                        is_associated: true,
                    },
                    variant2disease: VariantToDisease {
                        clinical_significance: variant.clinical_significance.to_lowercase(),
                        allele_origin: record.origin,
                        unique_experiment_reference: experiment_reference,
                        is_associated: true,
                    },
                },
            },
            AlleleOrigin::Somatic => EvidenceString::Somatic {
                header,
                evidence: SomaticEvidence {
                    known_mutations: vec![KnownMutation {
                        functional_consequence: so_term.uri(),
                        preferred_name: so_term.name().to_string(),
                    }],
                    clinical_significance: variant.clinical_significance.to_lowercase(),
                    allele_origin: record.origin,
                    unique_experiment_reference: experiment_reference,
                    is_associated: true,
                },
            },
        }
    }

    pub fn origin(&self) -> AlleleOrigin {
        match self {
            EvidenceString::Genetics { .. } => AlleleOrigin::Germline,
            EvidenceString::Somatic { .. } => AlleleOrigin::Somatic,
        }
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn record() -> EvidenceRecord {
        EvidenceRecord {
            variant: VariantRecord {
                chr: "11".to_string(),
                start: 2549169,
                stop: 2549169,
                reference: "G".to_string(),
                alternate: Some("A".to_string()),
                rs_id: Some("rs120074178".to_string()),
                accession: "RCV000019802".to_string(),
                clinical_significance: "Pathogenic".to_string(),
                allele_origins: vec!["germline".to_string()],
                traits: vec![vec!["Long QT syndrome".to_string()]],
                ..Default::default()
            },
            consequence: GeneConsequence::new("ENSG00000053918", "missense_variant"),
            resolved_trait: ResolvedTrait {
                name: "long qt syndrome".to_string(),
                ontology_id: "http://www.ebi.ac.uk/efo/EFO_0000768".to_string(),
                ontology_label: Some("Long QT syndrome".to_string()),
                group_index: 0,
            },
            origin: AlleleOrigin::Germline,
        }
    }

    #[rstest]
    fn test_germline_shape(record: EvidenceRecord) {
        let evidence = EvidenceString::from_record(&record);
        assert_eq!(evidence.origin(), AlleleOrigin::Germline);

        let value = evidence.to_value().unwrap();
        assert_eq!(value["sourceID"], "eva");
        assert_eq!(value["type"], "genetic_association");
        assert_eq!(
            value["target"]["id"],
            "http://identifiers.org/ensembl/ENSG00000053918"
        );
        assert_eq!(value["disease"]["name"], "Long QT syndrome");
        assert_eq!(value["variant"]["id"], "http://identifiers.org/dbsnp/rs120074178");
        assert_eq!(
            value["evidence"]["gene2variant"]["functional_consequence"],
            "http://purl.obolibrary.org/obo/SO_0001583"
        );
        assert_eq!(
            value["evidence"]["variant2disease"]["clinical_significance"],
            "pathogenic"
        );
        assert_eq!(value["unique_association_fields"]["allele_origin"], "germline");
    }

    #[rstest]
    fn test_somatic_shape(mut record: EvidenceRecord) {
        record.origin = AlleleOrigin::Somatic;
        record.consequence = GeneConsequence::new("ENSG00000053918", "not_a_real_term");

        let value = EvidenceString::from_record(&record).to_value().unwrap();

        assert_eq!(value["sourceID"], "eva_somatic");
        assert_eq!(value["type"], "somatic_mutation");
        assert!(value.get("variant").is_none());
        let mutation = &value["evidence"]["known_mutations"][0];
        assert_eq!(mutation["preferred_name"], "not_a_real_term");
        assert!(mutation.get("functional_consequence").is_none());
        assert_eq!(value["evidence"]["allele_origin"], "somatic");
    }

    #[rstest]
    fn test_structural_variant_uri(mut record: EvidenceRecord) {
        record.variant.rs_id = None;
        record.variant.nsv_id = Some("nsv1067916".to_string());

        let value = EvidenceString::from_record(&record).to_value().unwrap();
        assert_eq!(value["variant"]["id"], "http://identifiers.org/dbvar/nsv1067916");
        assert_eq!(value["variant"]["type"], "structural variant");
    }

    #[rstest]
    fn test_disease_name_falls_back_to_trait_name(mut record: EvidenceRecord) {
        record.resolved_trait.ontology_label = None;
        let value = EvidenceString::from_record(&record).to_value().unwrap();
        assert_eq!(value["disease"]["name"], "long qt syndrome");
    }
}

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

/// Sequence ontology names with their numeric accession.
const SO_ACCESSIONS: &[(&str, u32)] = &[
    ("transcript_ablation", 1893),
    ("splice_donor_variant", 1575),
    ("splice_acceptor_variant", 1574),
    ("stop_gained", 1587),
    ("frameshift_variant", 1589),
    ("stop_lost", 1578),
    ("initiator_codon_variant", 1582),
    ("inframe_insertion", 1821),
    ("inframe_deletion", 1822),
    ("missense_variant", 1583),
    ("transcript_amplification", 1889),
    ("splice_region_variant", 1630),
    ("incomplete_terminal_codon_variant", 1626),
    ("synonymous_variant", 1819),
    ("stop_retained_variant", 1567),
    ("coding_sequence_variant", 1580),
    ("miRNA", 276),
    ("miRNA_target_site", 934),
    ("mature_miRNA_variant", 1620),
    ("5_prime_UTR_variant", 1623),
    ("3_prime_UTR_variant", 1624),
    ("exon_variant", 1791),
    ("non_coding_transcript_exon_variant", 1792),
    ("non_coding_transcript_variant", 1619),
    ("intron_variant", 1627),
    ("NMD_transcript_variant", 1621),
    ("TFBS_ablation", 1895),
    ("TFBS_amplification", 1892),
    ("TF_binding_site_variant", 1782),
    ("regulatory_region_variant", 1566),
    ("regulatory_region_ablation", 1894),
    ("regulatory_region_amplification", 1891),
    ("feature_elongation", 1907),
    ("feature_truncation", 1906),
    ("intergenic_variant", 1628),
    ("lincRNA", 1463),
    ("downstream_gene_variant", 1632),
    ("2KB_downstream_gene_variant", 1632),
    ("upstream_gene_variant", 1631),
    ("2KB_upstream_gene_variant", 1631),
    ("SNV", 1483),
    ("SNP", 694),
    ("RNA_polymerase_promoter", 1203),
    ("CpG_island", 307),
    ("DNAseI_hypersensitive_site", 685),
    ("polypeptide_variation_site", 336),
    ("start_lost", 2012),
    ("protein_altering_variant", 1818),
    ("gene_fusion", 1565),
    ("gene_variant", 1564),
    ("sequence_variant", 1060),
    ("trinucleotide_repeat_microsatellite_feature", 291),
    ("trinucleotide_repeat_expansion", 2165),
];

/// Ensembl's consequence severity order, most severe first.
pub const RANKED_SO_NAMES: &[&str] = &[
    "transcript_ablation",
    "splice_acceptor_variant",
    "splice_donor_variant",
    "stop_gained",
    "frameshift_variant",
    "stop_lost",
    "initiator_codon_variant",
    "transcript_amplification",
    "inframe_insertion",
    "inframe_deletion",
    "missense_variant",
    "splice_region_variant",
    "incomplete_terminal_codon_variant",
    "stop_retained_variant",
    "synonymous_variant",
    "coding_sequence_variant",
    "mature_miRNA_variant",
    "5_prime_UTR_variant",
    "3_prime_UTR_variant",
    "non_coding_transcript_exon_variant",
    "intron_variant",
    "NMD_transcript_variant",
    "non_coding_transcript_variant",
    "upstream_gene_variant",
    "downstream_gene_variant",
    "TFBS_ablation",
    "TFBS_amplification",
    "TF_binding_site_variant",
    "regulatory_region_ablation",
    "regulatory_region_amplification",
    "regulatory_region_variant",
    "feature_elongation",
    "feature_truncation",
    "intergenic_variant",
];

const SO_URI_PREFIX: &str = "http://purl.obolibrary.org/obo/";

///
/// A sequence ontology term attached to a consequence type. Holds the term
/// name and derives its accession and severity rank from fixed tables.
///
/// Two terms are equal when their accessions are equal, so every term
/// without a known accession falls into a single equivalence class.
///
#[derive(Debug, Clone)]
pub struct SequenceOntologyTerm {
    name: String,
    accession_number: Option<u32>,
}

impl SequenceOntologyTerm {
    pub fn new(name: &str) -> Self {
        let accession_number = SO_ACCESSIONS
            .iter()
            .find(|(so_name, _)| *so_name == name)
            .map(|(_, number)| *number);

        SequenceOntologyTerm {
            name: name.to_string(),
            accession_number,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    ///
    /// Formatted accession, e.g. `SO:0001583`, or `None` for unknown names.
    ///
    pub fn accession(&self) -> Option<String> {
        self.accession_number
            .map(|number| format!("SO:{:07}", number))
    }

    ///
    /// Ontology URI for the term, e.g. `http://purl.obolibrary.org/obo/SO_0001583`.
    ///
    pub fn uri(&self) -> Option<String> {
        self.accession_number
            .map(|number| format!("{}SO_{:07}", SO_URI_PREFIX, number))
    }

    ///
    /// Position in [RANKED_SO_NAMES] (lower is more severe). Names outside
    /// the list get the least severe rank, `RANKED_SO_NAMES.len()`.
    ///
    pub fn rank(&self) -> usize {
        RANKED_SO_NAMES
            .iter()
            .position(|ranked| *ranked == self.name)
            .unwrap_or(RANKED_SO_NAMES.len())
    }
}

impl PartialEq for SequenceOntologyTerm {
    fn eq(&self, other: &Self) -> bool {
        self.accession_number == other.accession_number
    }
}

impl Eq for SequenceOntologyTerm {}

impl Hash for SequenceOntologyTerm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.accession_number.hash(state);
    }
}

impl Display for SequenceOntologyTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

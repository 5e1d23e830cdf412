pub const ENSEMBL_GENE_URI_PREFIX: &str = "http://identifiers.org/ensembl/";
pub const DBSNP_URI_PREFIX: &str = "http://identifiers.org/dbsnp/";
pub const DBVAR_URI_PREFIX: &str = "http://identifiers.org/dbvar/";
pub const CLINVAR_URI_PREFIX: &str = "http://www.ncbi.nlm.nih.gov/clinvar/";

pub const GERMLINE_SOURCE_ID: &str = "eva";
pub const SOMATIC_SOURCE_ID: &str = "eva_somatic";
pub const GERMLINE_EVIDENCE_TYPE: &str = "genetic_association";
pub const SOMATIC_EVIDENCE_TYPE: &str = "somatic_mutation";
pub const ACCESS_LEVEL: &str = "public";
pub const TARGET_TYPE: &str = "http://identifiers.org/cttv.target/gene_evidence";

pub const SNP_VARIANT_TYPE: &str = "snp single";
pub const STRUCTURAL_VARIANT_TYPE: &str = "structural variant";

/// Progress is logged every this many records.
pub const PROGRESS_INTERVAL: u64 = 1000;

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

///
/// One measured change of a ClinVar record, together with the record level
/// annotations it inherits (significance, allele origins and traits).
///
/// This is the unit the join engine works on.
///
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone, Default)]
pub struct VariantRecord {
    pub chr: String,
    pub start: u64,
    pub stop: u64,
    pub reference: String,
    pub alternate: Option<String>,

    pub rs_id: Option<String>,
    pub nsv_id: Option<String>,
    pub accession: String,

    pub clinical_significance: String,
    pub allele_origins: Vec<String>,

    /// Each inner list holds the synonymous names of one reported trait.
    pub traits: Vec<Vec<String>>,
}

impl VariantRecord {
    ///
    /// Alternate allele, or `-` when the measure has none (deletions).
    ///
    pub fn alternate_or_dash(&self) -> &str {
        self.alternate.as_deref().unwrap_or("-")
    }
}

impl Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{}-{} {}>{} rs={} nsv={} significance={:?} origins={:?} traits={:?}",
            self.accession,
            self.chr,
            self.start,
            self.stop,
            self.reference,
            self.alternate_or_dash(),
            self.rs_id.as_deref().unwrap_or("."),
            self.nsv_id.as_deref().unwrap_or("."),
            self.clinical_significance,
            self.allele_origins,
            self.traits,
        )
    }
}

use std::io::BufRead;
use std::path::Path;

use fxhash::FxHashMap as HashMap;
use log::{info, warn};

use cttv_core::models::VariantRecord;
use cttv_core::utils::get_dynamic_reader;

use crate::errors::{EvidenceError, Result};
use crate::so_term::SequenceOntologyTerm;

const MIN_FIELDS: usize = 6;
const MISSING_GENE: &str = "NA";

///
/// A gene and the sequence ontology term describing the variant's effect on it.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneConsequence {
    pub gene_id: String,
    pub so_term: SequenceOntologyTerm,
}

impl GeneConsequence {
    pub fn new(gene_id: &str, so_name: &str) -> Self {
        GeneConsequence {
            gene_id: gene_id.to_string(),
            so_term: SequenceOntologyTerm::new(so_name),
        }
    }
}

///
/// Variant key -> gene consequences, loaded once from the variant-to-gene
/// mapping file.
///
/// Keys are rs ids, nsv ids, coordinate ids (`chr:start-stop:1/alt`) or
/// ClinVar accessions, depending on how the upstream annotation resolved
/// the variant.
///
#[derive(Debug, Default)]
pub struct ConsequenceTypeTable {
    map: HashMap<String, Vec<GeneConsequence>>,
}

impl ConsequenceTypeTable {
    ///
    /// Build the table from a tab separated reader.
    ///
    /// Every line needs at least six fields: variant key (0), gene id (2) and
    /// sequence ontology term (4). Short lines and lines whose gene id is `NA`
    /// are skipped with a warning.
    ///
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut map: HashMap<String, Vec<GeneConsequence>> = HashMap::default();
        let mut n_skipped = 0;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();

            if parts.len() < MIN_FIELDS {
                warn!("Skip invalid line in variant-to-gene file: {}", line);
                n_skipped += 1;
                continue;
            }

            let variant_id = parts[0];
            let gene_id = parts[2];
            let so_name = parts[4];

            if gene_id == MISSING_GENE {
                warn!("Skip line with missing gene ID: {}", line);
                n_skipped += 1;
                continue;
            }

            map.entry(variant_id.to_string())
                .or_default()
                .push(GeneConsequence::new(gene_id, so_name));
        }

        let table = ConsequenceTypeTable { map };
        info!(
            "{} variant->gene/SO term mappings loaded ({} associations, {} lines skipped)",
            table.len(),
            table.n_associations(),
            n_skipped
        );

        Ok(table)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading mapping variant -> ENSG/SO terms from {:?}", path);
        let reader = get_dynamic_reader(path)
            .map_err(|e| EvidenceError::MappingFileReadError(format!("{:#}", e)))?;
        Self::from_reader(reader)
    }

    /// Number of distinct variant keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of gene associations over all keys.
    pub fn n_associations(&self) -> usize {
        self.map.values().map(|v| v.len()).sum()
    }

    pub fn get(&self, key: &str) -> Option<&[GeneConsequence]> {
        self.map.get(key).map(|v| v.as_slice())
    }

    ///
    /// The key the record resolves to, trying in order: rs id, nsv id,
    /// coordinate id and finally the ClinVar accession.
    ///
    pub fn resolve_key(&self, record: &VariantRecord) -> Option<String> {
        let by_id = [record.rs_id.as_deref(), record.nsv_id.as_deref()]
            .into_iter()
            .flatten()
            .find(|id| self.map.contains_key(*id));

        if let Some(id) = by_id {
            return Some(id.to_string());
        }

        let coordinate_id = coordinate_id(record);
        if self.map.contains_key(&coordinate_id) {
            return Some(coordinate_id);
        }

        if self.map.contains_key(&record.accession) {
            return Some(record.accession.clone());
        }

        None
    }

    ///
    /// Gene consequences for the record. When no key matches, the result is a
    /// single `None` so the missing mapping still flows through the join and
    /// gets counted.
    ///
    pub fn lookup(&self, record: &VariantRecord) -> Vec<Option<&GeneConsequence>> {
        match self.resolve_key(record).and_then(|key| self.map.get(&key)) {
            Some(consequences) => consequences.iter().map(Some).collect(),
            None => vec![None],
        }
    }
}

///
/// Coordinate key in the form used by the mapping file: `chr:start-stop:1/alt`,
/// with `-` standing in for a missing alternate allele.
///
pub fn coordinate_id(record: &VariantRecord) -> String {
    format!(
        "{}:{}-{}:1/{}",
        record.chr,
        record.start,
        record.stop,
        record.alternate_or_dash()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    fn table(contents: &str) -> ConsequenceTypeTable {
        ConsequenceTypeTable::from_reader(Cursor::new(contents.to_string())).unwrap()
    }

    #[fixture]
    fn record() -> VariantRecord {
        VariantRecord {
            chr: "1".to_string(),
            start: 1000,
            stop: 1001,
            reference: "A".to_string(),
            alternate: Some("G".to_string()),
            rs_id: Some("rs123".to_string()),
            nsv_id: Some("nsv456".to_string()),
            accession: "RCV000000001".to_string(),
            ..Default::default()
        }
    }

    #[rstest]
    fn test_single_line_round_trip(record: VariantRecord) {
        let table = table("rs123\tX\tGENE1\tY\tmissense_variant\tZ\n");

        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve_key(&record).as_deref(), Some("rs123"));

        let found = table.lookup(&record);
        assert_eq!(found.len(), 1);
        let consequence = found[0].unwrap();
        assert_eq!(consequence.gene_id, "GENE1");
        assert_eq!(consequence.so_term.name(), "missense_variant");
        assert_eq!(consequence.so_term.accession().as_deref(), Some("SO:0001583"));
    }

    #[rstest]
    fn test_skips_short_and_na_lines() {
        let table = table(
            "# comment\n\
             \n\
             rs1\tX\tGENE1\n\
             rs2\tX\tNA\tY\tmissense_variant\tZ\n\
             rs3\tX\tGENE3\tY\tstop_gained\tZ\n",
        );

        assert_eq!(table.len(), 1);
        assert!(table.get("rs1").is_none());
        assert!(table.get("rs2").is_none());
        assert!(table.get("rs3").is_some());
    }

    #[rstest]
    fn test_repeated_keys_append() {
        let table = table(
            "rs1\tX\tGENE1\tY\tmissense_variant\tZ\n\
             rs1\tX\tGENE2\tY\tintron_variant\tZ\n",
        );

        assert_eq!(table.len(), 1);
        assert_eq!(table.n_associations(), 2);
        let genes: Vec<&str> = table
            .get("rs1")
            .unwrap()
            .iter()
            .map(|c| c.gene_id.as_str())
            .collect();
        assert_eq!(genes, vec!["GENE1", "GENE2"]);
    }

    #[rstest]
    #[case("rs123\tX\tG\tY\tmissense_variant\tZ\nnsv456\tX\tG\tY\tmissense_variant\tZ\n", "rs123")]
    #[case("nsv456\tX\tG\tY\tmissense_variant\tZ\n1:1000-1001:1/G\tX\tG\tY\tmissense_variant\tZ\n", "nsv456")]
    #[case("1:1000-1001:1/G\tX\tG\tY\tmissense_variant\tZ\nRCV000000001\tX\tG\tY\tmissense_variant\tZ\n", "1:1000-1001:1/G")]
    #[case("RCV000000001\tX\tG\tY\tmissense_variant\tZ\n", "RCV000000001")]
    fn test_key_fallback_order(record: VariantRecord, #[case] contents: &str, #[case] expected: &str) {
        let table = table(contents);
        assert_eq!(table.resolve_key(&record).as_deref(), Some(expected));
    }

    #[rstest]
    fn test_coordinate_id_uses_dash_for_missing_alt(mut record: VariantRecord) {
        record.alternate = None;
        assert_eq!(coordinate_id(&record), "1:1000-1001:1/-");
    }

    #[rstest]
    fn test_lookup_miss_yields_single_none(record: VariantRecord) {
        let table = table("rs999\tX\tGENE1\tY\tmissense_variant\tZ\n");

        assert_eq!(table.resolve_key(&record), None);
        assert_eq!(table.lookup(&record), vec![None]);
    }
}

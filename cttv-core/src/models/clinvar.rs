use std::io::{BufRead, Lines};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, Result};
use crate::models::VariantRecord;
use crate::utils::get_dynamic_reader_w_stdin;

///
/// A single measured change inside a ClinVar record.
///
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone, Default)]
pub struct VariantMeasure {
    pub chr: String,
    pub start: u64,
    pub stop: u64,
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(rename = "alt", default)]
    pub alternate: Option<String>,
    #[serde(default)]
    pub rs_id: Option<String>,
    #[serde(default)]
    pub nsv_id: Option<String>,
}

///
/// A ClinVar record as handed over by the upstream parser: record level
/// annotations plus the list of measures they apply to.
///
#[derive(Serialize, Deserialize, Eq, PartialEq, Debug, Clone, Default)]
pub struct ClinvarRecord {
    pub accession: String,
    pub clinical_significance: String,
    #[serde(default)]
    pub allele_origins: Vec<String>,
    #[serde(default)]
    pub traits: Vec<Vec<String>>,
    #[serde(default)]
    pub measures: Vec<VariantMeasure>,
}

impl ClinvarRecord {
    ///
    /// Flatten the record into one [VariantRecord] per measure.
    ///
    pub fn variant_records(&self) -> Vec<VariantRecord> {
        self.measures
            .iter()
            .map(|measure| VariantRecord {
                chr: measure.chr.clone(),
                start: measure.start,
                stop: measure.stop,
                reference: measure.reference.clone(),
                alternate: measure.alternate.clone(),
                rs_id: measure.rs_id.clone(),
                nsv_id: measure.nsv_id.clone(),
                accession: self.accession.clone(),
                clinical_significance: self.clinical_significance.clone(),
                allele_origins: self.allele_origins.clone(),
                traits: self.traits.clone(),
            })
            .collect()
    }
}

///
/// Lazy iterator over a JSON-lines file of [ClinvarRecord]s.
///
/// Blank lines are skipped. A line that fails to parse yields an error
/// carrying its 1-based line number.
///
pub struct ClinvarRecordReader<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> ClinvarRecordReader<R> {
    pub fn new(reader: R) -> Self {
        ClinvarRecordReader {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl ClinvarRecordReader<std::io::BufReader<Box<dyn std::io::Read>>> {
    ///
    /// Open a plain or gzipped JSON-lines file, or stdin when `path` is `-`.
    ///
    /// # Arguments
    /// - path: path to the input file
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader_w_stdin(&path.to_string_lossy())
            .map_err(|e| CoreError::FileReadError(format!("{:#}", e)))?;
        Ok(ClinvarRecordReader::new(reader))
    }
}

impl<R: BufRead> Iterator for ClinvarRecordReader<R> {
    type Item = Result<ClinvarRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            return Some(serde_json::from_str(&line).map_err(|source| {
                CoreError::RecordParseError {
                    line: self.line_number,
                    source,
                }
            }));
        }
    }
}

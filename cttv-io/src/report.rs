use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;

use cttv_core::utils::get_dynamic_writer;
use cttv_evidence::{RunReport, TraitMapper};

use crate::consts::*;
use crate::error::{OutputError, Result};
use crate::zooma::zooma_rows;

pub trait RunOutputWrite {
    ///
    /// Write every emitted evidence string as one JSON object per line.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_evidence_strings<T: AsRef<Path>>(&self, path: T) -> Result<()>;

    ///
    /// Write the nsv ids seen during the run, one per line.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_nsv_list<T: AsRef<Path>>(&self, path: T) -> Result<()>;

    ///
    /// Write the unmapped trait names with how often each was dropped.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_unmapped_traits<T: AsRef<Path>>(&self, path: T) -> Result<()>;

    ///
    /// Write the zooma provenance file. Mappings from `mapper` that never
    /// produced evidence are appended after the emitted records.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - mapper: the trait mapper used for the run
    /// - timestamp: annotation date stamped on every row
    fn write_zooma_file<T: AsRef<Path>>(
        &self,
        path: T,
        mapper: &TraitMapper,
        timestamp: &DateTime<Utc>,
    ) -> Result<()>;
}

fn open(path: &Path) -> Result<impl Write> {
    get_dynamic_writer(path).map_err(|e| OutputError::FileCreateError(format!("{:#}", e)))
}

impl RunOutputWrite for RunReport {
    fn write_evidence_strings<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let mut writer = open(path.as_ref())?;

        for evidence in self.evidence_strings() {
            serde_json::to_writer(&mut writer, evidence)?;
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_nsv_list<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let mut writer = open(path.as_ref())?;
        write!(writer, "{}", self.nsvs().join("\n"))?;
        writer.flush()?;
        Ok(())
    }

    fn write_unmapped_traits<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let mut writer = open(path.as_ref())?;

        writeln!(writer, "{}", UNMAPPED_TRAITS_HEADER)?;
        for (name, count) in self.unmapped_traits() {
            writeln!(writer, "{}\t{}", name, count)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_zooma_file<T: AsRef<Path>>(
        &self,
        path: T,
        mapper: &TraitMapper,
        timestamp: &DateTime<Utc>,
    ) -> Result<()> {
        let mut writer = open(path.as_ref())?;

        writeln!(writer, "{}", ZOOMA_HEADER)?;
        for row in zooma_rows(self.provenance(), mapper, timestamp) {
            writeln!(writer, "{}", row)?;
        }

        writer.flush()?;
        Ok(())
    }
}

///
/// Where [write_run_outputs] put each file.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub evidence_strings: PathBuf,
    pub nsv_list: PathBuf,
    pub unmapped_traits: PathBuf,
    pub zooma: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(out_dir: &Path) -> Self {
        OutputPaths {
            evidence_strings: out_dir.join(EVIDENCE_STRINGS_FILE_NAME),
            nsv_list: out_dir.join(NSV_LIST_FILE_NAME),
            unmapped_traits: out_dir.join(UNMAPPED_TRAITS_FILE_NAME),
            zooma: out_dir.join(ZOOMA_FILE_NAME),
        }
    }
}

///
/// Write all run artifacts into `out_dir`, stamping the zooma file with the
/// current UTC time.
///
pub fn write_run_outputs(
    report: &RunReport,
    mapper: &TraitMapper,
    out_dir: &Path,
) -> Result<OutputPaths> {
    let paths = OutputPaths::in_dir(out_dir);

    report.write_nsv_list(&paths.nsv_list)?;
    report.write_unmapped_traits(&paths.unmapped_traits)?;
    report.write_evidence_strings(&paths.evidence_strings)?;
    report.write_zooma_file(&paths.zooma, mapper, &Utc::now())?;

    info!("Run outputs written to {:?}", out_dir);

    Ok(paths)
}

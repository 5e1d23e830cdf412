use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};

use cttv_core::models::clinvar::ClinvarRecordReader;
use cttv_evidence::consts::PROGRESS_INTERVAL;
use cttv_evidence::{
    AcceptAll, ConsequenceTypeTable, EvidenceValidator, RecordJoinEngine, ResolvedRunConfig,
    RunConfig, RunReport, SchemaValidator, TraitMapper,
};
use cttv_io::write_run_outputs;

use super::cli::*;

///
/// Build the run configuration: the `--config` file if given, overridden by
/// any path or list passed on the command line.
///
pub fn build_run_config(matches: &ArgMatches) -> Result<ResolvedRunConfig> {
    let from_file = match matches.get_one::<String>(CONFIG_ARG) {
        Some(path) => RunConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load run configuration from {}", path))?,
        None => RunConfig::default(),
    };

    let path_arg = |name: &str| matches.get_one::<String>(name).map(PathBuf::from);

    let from_flags = RunConfig {
        efo_mapping: path_arg(EFO_MAPPING_ARG),
        gene_mapping: path_arg(GENE_MAPPING_ARG),
        input: path_arg(INPUT_ARG),
        output_dir: path_arg(OUT_ARG),
        schema: path_arg(SCHEMA_ARG),
        allowed_clinical_significance: matches
            .get_one::<String>(ALLOWED_SIGNIFICANCE_ARG)
            .map(|list| list.split(',').map(str::to_string).collect()),
    };

    let config = from_file.merge(from_flags).resolve()?;

    Ok(config)
}

fn spinner(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg} ({pos} records)")?,
    );
    pb.set_message("Generating evidence strings");
    pb.enable_steady_tick(Duration::from_millis(100));

    Ok(pb)
}

pub fn run_evidence(matches: &ArgMatches) -> Result<()> {
    let config = build_run_config(matches)?;
    let quiet = matches.get_flag("quiet");

    let genes = ConsequenceTypeTable::from_file(&config.gene_mapping)
        .with_context(|| format!("Failed to load gene mappings from {:?}", config.gene_mapping))?;
    let mut traits = TraitMapper::from_file(&config.efo_mapping)
        .with_context(|| format!("Failed to load EFO mappings from {:?}", config.efo_mapping))?;

    let validator: Box<dyn EvidenceValidator> = match &config.schema {
        Some(schema) => Box::new(
            SchemaValidator::from_file(schema)
                .with_context(|| format!("Failed to load schema from {:?}", schema))?,
        ),
        None => Box::new(AcceptAll),
    };

    let records = ClinvarRecordReader::from_path(&config.input)
        .with_context(|| format!("Failed to open ClinVar records {:?}", config.input))?;

    info!("Processing ClinVar records from {:?}", config.input);

    let pb = spinner(quiet)?;
    let mut report = RunReport::new();
    {
        let mut engine = RecordJoinEngine::new(&genes, &mut traits, config.allowed.clone())
            .with_validator(validator);

        for (index, record) in records.enumerate() {
            let record = record.context("Failed to read ClinVar records")?;

            if let Err(e) = engine.process_clinvar_record(&record, &mut report) {
                pb.abandon();
                error!("{}", e);
                return Err(e.into());
            }

            if (index as u64 + 1) % PROGRESS_INTERVAL == 0 {
                pb.set_position(index as u64 + 1);
            }
        }
    }
    pb.finish_and_clear();

    let paths = write_run_outputs(&report, &traits, &config.output_dir)
        .with_context(|| format!("Failed to write outputs to {:?}", config.output_dir))?;
    info!("Evidence strings written to {:?}", paths.evidence_strings);

    println!("{}", report);

    Ok(())
}

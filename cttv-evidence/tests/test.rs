use std::io::Write;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::{TempDir, tempdir};

use cttv_core::models::clinvar::ClinvarRecordReader;
use cttv_core::utils::get_dynamic_writer;
use cttv_evidence::{
    AllowedSignificance, ConsequenceTypeTable, Counter, EvidenceError, RecordJoinEngine,
    RunConfig, RunReport, SchemaValidator, TraitMapper,
};

const GENE_MAPPING: &str = "\
# variant\tindex\tgene\tgene symbol\tconsequence\tdistance
rs120074178\t1\tENSG00000053918\tKCNQ1\tmissense_variant\t0
rs120074178\t1\tENSG00000236512\tKCNQ1OT1\tintron_variant\t0
nsv1067916\t1\tENSG00000053918\tKCNQ1\tfeature_truncation\t0
11:2549500-2549500:1/T\t1\tENSG00000053918\tKCNQ1\tsynonymous_variant\t0
rs999\t1\tNA\tNA\tintergenic_variant\t0
";

const EFO_MAPPING: &str = "\
Long QT syndrome\thttp://www.ebi.ac.uk/efo/EFO_0000768\tLong QT syndrome
jervell and lange-nielsen syndrome\thttp://www.orpha.net/ORDO/Orphanet_90647|http://www.ebi.ac.uk/efo/EFO_0000768
never used trait\thttp://www.ebi.ac.uk/efo/EFO_0000001
";

const CLINVAR_RECORDS: &str = r#"{"accession":"RCV000019802","clinical_significance":"Pathogenic","allele_origins":["germline","somatic"],"traits":[["LQTS","Long QT syndrome"]],"measures":[{"chr":"11","start":2549169,"stop":2549169,"ref":"G","alt":"A","rs_id":"rs120074178"}]}
{"accession":"RCV000020000","clinical_significance":"Likely pathogenic","allele_origins":["maternal"],"traits":[["Jervell and Lange-Nielsen syndrome"],["Unknown syndrome"]],"measures":[{"chr":"11","start":2549200,"stop":2549300,"ref":"N","nsv_id":"nsv1067916"},{"chr":"11","start":2549500,"stop":2549500,"ref":"C","alt":"T"}]}

{"accession":"RCV000030000","clinical_significance":"Benign","allele_origins":["germline"],"traits":[["Long QT syndrome"]],"measures":[{"chr":"11","start":1,"stop":1,"ref":"A","alt":"C","rs_id":"rs120074178"}]}
{"accession":"RCV000040000","clinical_significance":"Pathogenic","allele_origins":["germline"],"traits":[["Long QT syndrome"]],"measures":[]}
"#;

struct Fixture {
    _dir: TempDir,
    genes: PathBuf,
    efo: PathBuf,
    clinvar: PathBuf,
}

fn write_file(path: &Path, contents: &str) {
    let mut writer = get_dynamic_writer(path).unwrap();
    writer.write_all(contents.as_bytes()).unwrap();
    writer.flush().unwrap();
}

#[fixture]
fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let genes = dir.path().join("genes.tsv.gz");
    let efo = dir.path().join("efo.tsv");
    let clinvar = dir.path().join("clinvar.jsonl.gz");

    write_file(&genes, GENE_MAPPING);
    write_file(&efo, EFO_MAPPING);
    write_file(&clinvar, CLINVAR_RECORDS);

    Fixture {
        _dir: dir,
        genes,
        efo,
        clinvar,
    }
}

fn allowed() -> AllowedSignificance {
    AllowedSignificance::from_comma_separated("pathogenic,likely pathogenic")
}

#[rstest]
fn test_end_to_end(fixture: Fixture) {
    let genes = ConsequenceTypeTable::from_file(&fixture.genes).unwrap();
    let mut traits = TraitMapper::from_file(&fixture.efo).unwrap();
    let mut report = RunReport::new();

    assert_eq!(genes.len(), 3);
    assert_eq!(traits.n_mappings(), 3);

    {
        let mut engine = RecordJoinEngine::new(&genes, &mut traits, allowed());
        for record in ClinvarRecordReader::from_path(&fixture.clinvar).unwrap() {
            engine
                .process_clinvar_record(&record.unwrap(), &mut report)
                .unwrap();
        }
    }

    assert_eq!(report.counter(Counter::ClinvarRecords), 4);
    assert_eq!(report.counter(Counter::VariantRecords), 4);

    // record 1: 2 genes x 1 trait x 2 origins
    // record 2: nsv and coordinate measures, 2 terms each for one trait group
    assert_eq!(report.counter(Counter::EvidenceStrings), 8);
    assert_eq!(report.counter(Counter::RecordsWithEvidence), 3);
    assert_eq!(report.counter(Counter::MultipleEvidenceStrings), 3);
    assert_eq!(report.counter(Counter::GermlineSomatic), 1);
    assert_eq!(report.counter(Counter::MoreThanOneOntologyTerm), 4);
    assert_eq!(report.counter(Counter::EvidenceFromNsvRecords), 2);
    assert_eq!(report.counter(Counter::Nsvs), 1);
    assert_eq!(report.counter(Counter::AllowedSignificanceNoRs), 2);
    assert_eq!(report.counter(Counter::SkippedClinicalSignificance), 2);
    assert_eq!(report.counter(Counter::UnmappedTraitGroups), 2);
    assert_eq!(report.unmapped_traits()["Unknown syndrome"], 2);
    assert_eq!(report.nsvs(), &["nsv1067916".to_string()]);

    let unused: Vec<&str> = traits.unused_mappings().map(|(name, _)| name).collect();
    assert_eq!(unused, vec!["never used trait"]);

    let first = &report.evidence_strings()[0];
    assert_eq!(first["sourceID"], "eva_somatic");
    assert_eq!(
        first["disease"]["source_name"],
        "long qt syndrome"
    );
}

#[rstest]
fn test_schema_rejects_evidence(fixture: Fixture) {
    let genes = ConsequenceTypeTable::from_file(&fixture.genes).unwrap();
    let mut traits = TraitMapper::from_file(&fixture.efo).unwrap();
    let mut report = RunReport::new();

    let schema = serde_json::json!({
        "type": "object",
        "required": ["validated_against_schema_version"]
    });
    let validator = SchemaValidator::new(schema).unwrap();

    let mut engine = RecordJoinEngine::new(&genes, &mut traits, allowed())
        .with_validator(Box::new(validator));

    let mut records = ClinvarRecordReader::from_path(&fixture.clinvar).unwrap();
    let record = records.next().unwrap().unwrap();
    let result = engine.process_clinvar_record(&record, &mut report);

    let error = result.unwrap_err();
    assert!(matches!(error, EvidenceError::Validation { .. }));
    assert!(error.to_string().contains("RCV000019802"));
}

#[rstest]
fn test_missing_mapping_files() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.tsv");

    assert!(matches!(
        ConsequenceTypeTable::from_file(&missing),
        Err(EvidenceError::MappingFileReadError(_))
    ));
    assert!(matches!(
        TraitMapper::from_file(&missing),
        Err(EvidenceError::MappingFileReadError(_))
    ));
}

#[rstest]
fn test_config_from_file(fixture: Fixture) {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("run.toml");
    write_file(
        &config_path,
        &format!(
            "efo_mapping = {:?}\ngene_mapping = {:?}\ninput = {:?}\noutput_dir = \"out\"\n",
            fixture.efo, fixture.genes, fixture.clinvar
        ),
    );

    let resolved = RunConfig::try_from(config_path.as_path())
        .unwrap()
        .resolve()
        .unwrap();

    assert_eq!(resolved.gene_mapping, fixture.genes);
    assert_eq!(resolved.schema, None);
}

use clap::{Arg, Command};

pub const EVIDENCE_CMD: &str = "evidence";

pub const EFO_MAPPING_ARG: &str = "efo-mapping";
pub const GENE_MAPPING_ARG: &str = "gene-mapping";
pub const INPUT_ARG: &str = "input";
pub const OUT_ARG: &str = "out";
pub const ALLOWED_SIGNIFICANCE_ARG: &str = "allowed-clinical-significance";
pub const SCHEMA_ARG: &str = "schema";
pub const CONFIG_ARG: &str = "config";

pub fn create_evidence_cli() -> Command {
    Command::new(EVIDENCE_CMD)
        .about("Join ClinVar records against gene and trait mappings and write evidence strings.")
        .arg(
            Arg::new(CONFIG_ARG)
                .long(CONFIG_ARG)
                .short('c')
                .help("TOML run configuration. Flags given on the command line take precedence"),
        )
        .arg(
            Arg::new(EFO_MAPPING_ARG)
                .long(EFO_MAPPING_ARG)
                .short('e')
                .help("Trait -> ontology mapping TSV (plain or .gz)"),
        )
        .arg(
            Arg::new(GENE_MAPPING_ARG)
                .long(GENE_MAPPING_ARG)
                .short('g')
                .help("Variant -> gene/consequence TSV (plain or .gz)"),
        )
        .arg(
            Arg::new(INPUT_ARG)
                .long(INPUT_ARG)
                .short('i')
                .help("ClinVar records as JSON lines (plain or .gz, `-` for stdin)"),
        )
        .arg(
            Arg::new(OUT_ARG)
                .long(OUT_ARG)
                .short('o')
                .help("Output directory"),
        )
        .arg(
            Arg::new(ALLOWED_SIGNIFICANCE_ARG)
                .long(ALLOWED_SIGNIFICANCE_ARG)
                .help("Comma separated clinical significances to keep, e.g. `pathogenic,likely pathogenic`"),
        )
        .arg(
            Arg::new(SCHEMA_ARG)
                .long(SCHEMA_ARG)
                .help("JSON Schema every evidence string is validated against"),
        )
}

mod evidence;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "cttv";
    pub const BIN_NAME: &str = "cttv";
    pub const DEFAULT_LOG_FILTER: &str = "info";
    pub const QUIET_LOG_FILTER: &str = "warn";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("EVA")
        .about("Generate target-disease evidence strings from ClinVar records.")
        .subcommand_required(true)
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors, and hide the progress spinner"),
        )
        .subcommand(evidence::cli::create_evidence_cli())
}

///
/// Route `log` records from the libraries through a `tracing` fmt subscriber.
/// `RUST_LOG` takes precedence over the default filter.
///
fn init_logging(matches: &ArgMatches) {
    let default_filter = match matches.get_flag("quiet") {
        true => consts::QUIET_LOG_FILTER,
        false => consts::DEFAULT_LOG_FILTER,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // EVIDENCE STRINGS
        //
        Some((evidence::cli::EVIDENCE_CMD, matches)) => {
            evidence::handlers::run_evidence(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

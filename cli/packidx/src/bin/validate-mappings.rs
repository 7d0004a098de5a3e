//! `validate-mappings` — run the external pack content validator on one
//! pack manifest.
//!
//! Argument errors (including a missing manifest path) exit with status 2.
//! Otherwise the exit status is the external validator's.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use packidx::commands::mappings::{self, EXIT_NOT_RUNNABLE};
use packidx::config::{LoadedConfig, MAPPINGS_PROGRAM_ENV};
use packidx::logging;

/// Validate the mappings of a single pack manifest.
#[derive(Parser, Debug)]
#[command(name = "validate-mappings", version, about)]
struct Cli {
    /// Pack manifest to validate
    manifest: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| LoadedConfig::discover(&cwd))
    {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(1);
        }
    };
    logging::init(cli.verbose, loaded.log_filter());

    let program = loaded.mappings_program(std::env::var(MAPPINGS_PROGRAM_ENV).ok());
    match mappings::run(&program, loaded.mappings_args(), &cli.manifest) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_NOT_RUNNABLE)
        }
    }
}

//! `validate-index` — validate a pack registry index before publication.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use packidx::commands;
use packidx::config::LoadedConfig;
use packidx::logging;
use packidx_index::EXIT_INVALID;

/// Check every entry of a pack registry index and report all violations.
#[derive(Parser, Debug)]
#[command(name = "validate-index", version, about)]
struct Cli {
    /// Index file to validate (default: index.json, or [index].path in packidx.toml)
    path: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    // Status 2 belongs to `validate-mappings`; usage errors here exit 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_INVALID);
        }
    };

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_INVALID)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let cwd = std::env::current_dir()?;
    let loaded = LoadedConfig::discover(&cwd)?;
    logging::init(cli.verbose, loaded.log_filter());

    let path = loaded.index_path(cli.path.as_deref(), &cwd);
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    commands::index::run(&path, &mut stdout.lock(), &mut stderr.lock())
}

//! `validate-mappings` — hand one pack manifest to the external content
//! validator and pass its exit status through.

use std::path::Path;
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

/// Exit status when the external validator could not be started.
pub const EXIT_NOT_RUNNABLE: u8 = 127;

/// Exit status used when the external validator was killed by a signal.
pub const EXIT_ABNORMAL: u8 = 1;

/// Build the command line for validating `manifest`.
pub fn command(program: &str, args: &[String], manifest: &Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args).arg("--file").arg(manifest);
    cmd
}

/// Run `program args... --file <manifest>` with inherited stdio.
pub fn run(program: &str, args: &[String], manifest: &Path) -> Result<u8> {
    tracing::info!(program, manifest = %manifest.display(), "delegating to mappings validator");
    let status = command(program, args, manifest)
        .status()
        .with_context(|| format!("failed to run mappings validator `{program}`"))?;
    Ok(exit_code(status))
}

/// Map a child exit status onto this process's exit status.
pub fn exit_code(status: ExitStatus) -> u8 {
    match status.code() {
        Some(code) => u8::try_from(code).unwrap_or(EXIT_ABNORMAL),
        None => {
            tracing::warn!(%status, "mappings validator terminated abnormally");
            EXIT_ABNORMAL
        }
    }
}

//! Violation reporting and pass/fail status.

use std::fmt;
use std::io::Write;

use crate::validate::{Violation, ViolationSink};

/// Exit status of a run with no violations.
pub const EXIT_OK: u8 = 0;

/// Exit status of a run with at least one violation or a fatal load error.
pub const EXIT_INVALID: u8 = 1;

/// Streams violations to a writer as they are discovered.
///
/// The writer is normally the process error stream. Every violation is
/// written on its own line the moment it is reported; nothing is buffered
/// until the end of the pass.
#[derive(Debug)]
pub struct Diagnostics<W: Write> {
    out: W,
    violations: usize,
}

impl<W: Write> Diagnostics<W> {
    pub fn new(out: W) -> Self {
        Diagnostics { out, violations: 0 }
    }

    /// Whether any violation has been reported.
    pub fn failed(&self) -> bool {
        self.violations > 0
    }

    /// Number of violations reported so far.
    pub fn violations(&self) -> usize {
        self.violations
    }

    /// Close the run over `entries` entries.
    pub fn finish(self, entries: usize) -> Summary {
        Summary {
            entries,
            violations: self.violations,
        }
    }

    /// Borrow the underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> ViolationSink for Diagnostics<W> {
    fn report(&mut self, violation: Violation) {
        self.violations += 1;
        if let Err(e) = writeln!(self.out, "{violation}") {
            tracing::warn!(error = %e, "failed to write violation");
        }
    }
}

/// Outcome of one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of entries in the index.
    pub entries: usize,
    /// Number of violations reported.
    pub violations: usize,
}

impl Summary {
    pub fn passed(&self) -> bool {
        self.violations == 0
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.passed() {
            EXIT_OK
        } else {
            EXIT_INVALID
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            write!(f, "index OK: {} entries validated", self.entries)
        } else {
            write!(
                f,
                "index validation failed: {} violation(s) in {} entries",
                self.violations, self.entries
            )
        }
    }
}

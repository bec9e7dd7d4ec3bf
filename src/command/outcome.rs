//! Terminal result of a command run and its exit-status mapping.

use std::fmt::Display;
use std::io::{self, Write};
use std::process::ExitCode;

/// Status reported for [`Outcome::Failure`].
pub const FAILURE_STATUS: u8 = 1;

/// How a command run ended.
///
/// A run stopped by the shutdown signal without an internal error is a
/// `Success`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
}

impl Outcome {
    /// Failure carrying the `Display` text of `detail`.
    pub fn failure(detail: impl Display) -> Self {
        Outcome::Failure(detail.to_string())
    }

    /// Process exit status: 0 for success, 1 for failure.
    pub fn exit_status(&self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure(_) => FAILURE_STATUS,
        }
    }

    /// Write the failure detail, if any, to `out` and return the exit code.
    pub fn report_to<W: Write>(&self, mut out: W) -> ExitCode {
        if let Outcome::Failure(detail) = self {
            // Nothing useful left to do if stderr itself is gone.
            let _ = writeln!(out, "error: {detail}");
        }
        ExitCode::from(self.exit_status())
    }

    /// [`Outcome::report_to`] on the process's stderr.
    pub fn report(&self) -> ExitCode {
        self.report_to(io::stderr().lock())
    }
}

impl<E: Display> From<Result<(), E>> for Outcome {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Outcome::Success,
            Err(e) => Outcome::failure(e),
        }
    }
}

//! Shell executor port for running external commands.

use std::path::Path;

use crate::ports::sink::OutputSink;
use crate::runner::Outcome;

/// Executes shell commands and packages their outcome.
///
/// Abstracting shell execution allows deterministic replay by recording
/// and replaying command outcomes during cassette playback.
///
/// Implementations never fail at this boundary: spawn failures and I/O
/// errors are folded into [`Outcome::Error`] so that an agent reasoning over
/// text always gets a result it can read.
pub trait ShellExecutor: Send + Sync {
    /// Runs `command` through the system shell inside `working_dir`.
    ///
    /// Every stdout line is handed to `sink` as soon as it is read.
    fn run(&self, command: &str, working_dir: &Path, sink: &dyn OutputSink) -> Outcome;
}

//! Replaying adapter for the `ShellExecutor` port.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::shell::ShellExecutor;
use crate::ports::sink::OutputSink;
use crate::runner::Outcome;

/// Replays recorded shell invocations from a cassette without spawning anything.
///
/// Recorded stdout lines are re-emitted to the sink so the caller sees the
/// same live progress it saw during recording.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, command: &str, _working_dir: &Path, sink: &dyn OutputSink) -> Outcome {
        let (next, remaining) = {
            let mut replayer = self.replayer.lock().unwrap_or_else(PoisonError::into_inner);
            let next = replayer.next_run(command);
            (next, replayer.remaining())
        };
        match next {
            Ok(run) => {
                debug!(seq = run.seq, command, remaining, "replaying shell invocation");
                for line in &run.lines {
                    sink.emit(line);
                }
                run.outcome
            }
            Err(err) => {
                warn!(command, error = %err, "replay failed");
                Outcome::error(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::Utc;

    use super::*;
    use crate::cassette::format::{Cassette, RecordedRun};
    use crate::ports::sink::MemorySink;

    fn make_replayer(runs: Vec<RecordedRun>) -> CassetteReplayer {
        let cassette =
            Cassette { name: "test".into(), recorded_at: Utc::now(), commit: "abc".into(), runs };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replaying_shell_run() {
        let replayer = make_replayer(vec![RecordedRun {
            seq: 0,
            command: "echo hello".into(),
            working_dir: PathBuf::from("."),
            lines: vec!["hello\n".into()],
            outcome: Outcome::Success { stdout: "hello\n".into() },
        }]);
        let shell = ReplayingShellExecutor::new(replayer);
        let sink = MemorySink::new();

        let outcome = shell.run("echo hello", Path::new("."), &sink);

        assert_eq!(outcome.to_string(), "STDOUT:\nhello\n");
        assert_eq!(sink.lines(), vec!["hello\n"]);
    }

    #[test]
    fn replaying_recorded_failure() {
        let replayer = make_replayer(vec![RecordedRun {
            seq: 0,
            command: "bad_cmd".into(),
            working_dir: PathBuf::from("."),
            lines: Vec::new(),
            outcome: Outcome::Failure {
                exit_code: 127,
                stderr: "sh: 1: bad_cmd: not found\n".into(),
                stdout: String::new(),
            },
        }]);
        let shell = ReplayingShellExecutor::new(replayer);

        let outcome = shell.run("bad_cmd", Path::new("."), &MemorySink::new());

        assert_eq!(outcome.to_string(), "STDERR:\nsh: 1: bad_cmd: not found\n\nPARTIAL STDOUT:\n");
    }

    #[test]
    fn exhausted_cassette_becomes_execution_error() {
        let shell = ReplayingShellExecutor::new(make_replayer(Vec::new()));

        let outcome = shell.run("echo hi", Path::new("."), &MemorySink::new());

        assert!(outcome.to_string().starts_with("EXECUTION ERROR: cassette exhausted"));
    }
}

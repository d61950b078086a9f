//! Recording adapter for the `ShellExecutor` port.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::sink::{OutputSink, TeeSink};
use crate::ports::ShellExecutor;
use crate::runner::Outcome;

/// Records shell invocations while delegating to an inner implementation.
pub struct RecordingShellExecutor {
    inner: Box<dyn ShellExecutor>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingShellExecutor {
    /// Creates a new recording shell executor wrapping the given implementation.
    pub fn new(inner: Box<dyn ShellExecutor>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ShellExecutor for RecordingShellExecutor {
    fn run(&self, command: &str, working_dir: &Path, sink: &dyn OutputSink) -> Outcome {
        let tee = TeeSink::new(sink);
        let outcome = self.inner.run(command, working_dir, &tee);
        let lines = tee.into_lines();

        let success = outcome.is_success();
        let mut recorder = self.recorder.lock().unwrap_or_else(PoisonError::into_inner);
        recorder.record(command, working_dir, lines, outcome.clone());
        debug!(command, success, recorded = recorder.len(), "recorded shell invocation");
        outcome
    }
}

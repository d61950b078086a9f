//! Replays recorded invocations from a cassette.

use std::collections::VecDeque;

use super::format::{Cassette, RecordedRun};

/// Serves recorded invocations in the order they were captured.
///
/// Each request must name the same command that was recorded at that
/// position, so a diverging caller is reported instead of silently getting
/// someone else's output.
#[derive(Debug)]
pub struct CassetteReplayer {
    runs: VecDeque<RecordedRun>,
    served: usize,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self { runs: cassette.runs.iter().cloned().collect(), served: 0 }
    }

    /// Invocations not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.runs.len()
    }

    /// Return the next recorded invocation for `command`.
    ///
    /// # Errors
    ///
    /// Returns an error when the cassette is exhausted or when the next
    /// recorded command differs from `command`.
    pub fn next_run(&mut self, command: &str) -> Result<RecordedRun, String> {
        let Some(next) = self.runs.front() else {
            return Err(format!(
                "cassette exhausted: all {} recorded runs consumed, no entry for {command:?}",
                self.served
            ));
        };
        if next.command != command {
            return Err(format!(
                "cassette mismatch at seq={}: recorded {:?}, requested {command:?}",
                next.seq, next.command
            ));
        }
        self.served += 1;
        self.runs.pop_front().ok_or_else(|| "cassette exhausted".to_string())
    }
}

//! Records shell invocations into a cassette file.

use std::path::{Path, PathBuf};

use chrono::Utc;

use super::format::{Cassette, RecordedRun};
use crate::runner::Outcome;

/// Records invocations and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    runs: Vec<RecordedRun>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            commit: commit.into(),
            runs: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record one invocation. The `seq` field is assigned automatically.
    pub fn record(&mut self, command: &str, working_dir: &Path, lines: Vec<String>, outcome: Outcome) {
        self.runs.push(RecordedRun {
            seq: self.next_seq,
            command: command.to_string(),
            working_dir: working_dir.to_path_buf(),
            lines,
            outcome,
        });
        self.next_seq += 1;
    }

    /// Number of invocations recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            runs: self.runs,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

//! Cassette data structures for recording and replaying shell invocations.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::runner::Outcome;

/// One shell invocation as it was observed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedRun {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// The raw shell command.
    pub command: String,
    /// Directory the command ran in.
    pub working_dir: PathBuf,
    /// Stdout lines in the order they were streamed.
    pub lines: Vec<String>,
    /// The packaged result.
    pub outcome: Outcome,
}

/// A cassette containing a sequence of recorded invocations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit hash at recording time.
    pub commit: String,
    /// Ordered list of invocations.
    pub runs: Vec<RecordedRun>,
}

impl Cassette {
    /// Reads and parses a cassette YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}

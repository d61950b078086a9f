//! Recording session owning the shell cassette recorder.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::warn;

use super::recorder::CassetteRecorder;
use crate::ports::sink::NullSink;
use crate::runner::{Outcome, StreamingRunner};

/// Shares one `CassetteRecorder` between the recording adapter and the
/// command dispatcher, and writes it out when the session finishes.
///
/// Cassettes are written to `<dir>/<timestamp>.cassette.yaml`.
pub struct RecordingSession {
    /// Recorder for shell invocations.
    pub shell: Arc<Mutex<CassetteRecorder>>,
    /// Cassette file this session will write.
    path: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session inside `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be created
    /// - A cassette with the same timestamp already exists
    pub fn new(dir: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create cassette directory {}: {e}", dir.display()))?;

        let path = dir.join(format!("{timestamp}.cassette.yaml"));
        if path.exists() {
            return Err(format!("Cassette already exists: {}", path.display()));
        }

        let recorder = CassetteRecorder::new(&path, format!("shellrelay-{timestamp}"), commit_hash());
        Ok(Self { shell: Arc::new(Mutex::new(recorder)), path })
    }

    /// Path the cassette will be written to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the cassette to disk.
    ///
    /// Every recording adapter holding a clone of `shell` must have been
    /// dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is still shared or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.shell)
            .map_err(|_| "Recording adapter for shell still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock for shell poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write shell cassette: {e}"))
    }
}

/// Current git commit hash, or "unknown" with a warning if unavailable.
fn commit_hash() -> String {
    match StreamingRunner::new().execute("git rev-parse HEAD", Path::new("."), &NullSink) {
        Outcome::Success { stdout } if !stdout.trim().is_empty() => stdout.trim().to_string(),
        _ => {
            warn!("could not determine git commit hash, using 'unknown'");
            "unknown".to_string()
        }
    }
}

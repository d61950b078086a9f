//! Runtime settings read from the environment.
//!
//! `.env` files are honoured through `dotenvy` (loaded by the binary before
//! [`Settings::from_env`] runs). CLI flags are applied on top afterwards.

use std::path::PathBuf;
use std::time::Duration;

use crate::runner::default_shell;

/// Shell program used to interpret commands.
pub const SHELL_VAR: &str = "SHELLRELAY_SHELL";
/// Per-call timeout in milliseconds; `0` disables it.
pub const TIMEOUT_VAR: &str = "SHELLRELAY_TIMEOUT_MS";
/// Directory to record a cassette of shell invocations into.
pub const RECORD_VAR: &str = "SHELLRELAY_RECORD";
/// Cassette file to replay shell invocations from.
pub const REPLAY_VAR: &str = "SHELLRELAY_REPLAY";
/// Tracing filter directive.
pub const LOG_VAR: &str = "SHELLRELAY_LOG";

/// Everything the tool context needs to be wired up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Shell program, e.g. `/bin/sh`.
    pub shell: String,
    /// Kill commands that run longer than this. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Directory commands run in and relative paths resolve against.
    pub working_dir: PathBuf,
    /// Record shell invocations into a cassette in this directory.
    pub record_dir: Option<PathBuf>,
    /// Replay shell invocations from this cassette.
    pub replay_path: Option<PathBuf>,
    /// Suppress the live `[Stream]` echo.
    pub quiet: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shell: default_shell().to_string(),
            timeout: None,
            working_dir: PathBuf::from("."),
            record_dir: None,
            replay_path: None,
            quiet: false,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a whole number of milliseconds,
    /// or if both recording and replay are requested.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut settings = Self::default();
        if let Some(shell) = non_empty(SHELL_VAR) {
            settings.shell = shell;
        }
        if let Some(raw) = non_empty(TIMEOUT_VAR) {
            settings.timeout = parse_timeout_ms(&raw)?;
        }
        settings.record_dir = non_empty(RECORD_VAR).map(PathBuf::from);
        settings.replay_path = non_empty(REPLAY_VAR).map(PathBuf::from);
        settings.validate()?;
        Ok(settings)
    }

    /// Checks combinations that cannot work together.
    ///
    /// # Errors
    ///
    /// Returns an error if both recording and replay are configured.
    pub fn validate(&self) -> Result<(), String> {
        if self.record_dir.is_some() && self.replay_path.is_some() {
            return Err(format!("{RECORD_VAR} and {REPLAY_VAR} cannot be used together"));
        }
        Ok(())
    }
}

/// Parses a millisecond timeout where `0` means "no timeout".
///
/// # Errors
///
/// Returns an error if `raw` is not a non-negative integer.
pub fn parse_timeout_ms(raw: &str) -> Result<Option<Duration>, String> {
    let ms: u64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("Invalid {TIMEOUT_VAR} value {raw:?}: {e}"))?;
    Ok((ms > 0).then(|| Duration::from_millis(ms)))
}

//! Failures that stop the runner from producing a child outcome.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which standard stream an I/O failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// The child's standard output.
    Stdout,
    /// The child's standard error.
    Stderr,
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

/// Errors raised while driving a child process.
///
/// None of these escape the runner: each one is rendered into an
/// `EXECUTION ERROR: ` result. A child that exits nonzero is not an error.
#[derive(Debug, Error)]
pub enum RunError {
    /// The command string was empty or only whitespace.
    #[error("empty command")]
    EmptyCommand,

    /// The working directory does not exist or is not a directory.
    #[error("working directory {} does not exist or is not a directory", .0.display())]
    MissingWorkingDir(PathBuf),

    /// The shell could not be started.
    #[error("failed to spawn {shell}: {source}")]
    Spawn {
        /// Shell program that was launched.
        shell: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Reading one of the child's pipes failed mid-run.
    #[error("failed to read {stream}: {source}")]
    StreamRead {
        /// The stream that failed.
        stream: Stream,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Anything else, such as a failed wait or a reader thread that panicked.
    #[error("{0}")]
    Unexpected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_error_names_the_shell() {
        let err = RunError::Spawn {
            shell: "/bin/nope".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "failed to spawn /bin/nope: No such file or directory");
    }

    #[test]
    fn missing_dir_message() {
        let err = RunError::MissingWorkingDir(PathBuf::from("/no/where"));
        assert_eq!(
            err.to_string(),
            "working directory /no/where does not exist or is not a directory"
        );
    }
}

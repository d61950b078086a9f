//! The textual result handed back to the agent.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::RunError;
use super::invocation::CompletedInvocation;

/// Final result of one shell invocation.
///
/// `Display` produces the exact marker format downstream parsers expect:
///
/// ```text
/// STDOUT:\n<stdout>
/// STDERR:\n<stderr>\nPARTIAL STDOUT:\n<stdout>
/// EXECUTION ERROR: <message>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The child exited with status 0.
    Success {
        /// Full captured stdout.
        stdout: String,
    },
    /// The child ran but exited nonzero (or was killed).
    Failure {
        /// Exit status, `-1` when there was none.
        exit_code: i32,
        /// Full captured stderr.
        stderr: String,
        /// Whatever stdout was captured.
        stdout: String,
    },
    /// The child could not be run to completion.
    Error {
        /// Human-readable cause.
        message: String,
    },
}

impl Outcome {
    /// Builds an `Error` outcome from any displayable cause.
    pub fn error(message: impl fmt::Display) -> Self {
        Self::Error { message: message.to_string() }
    }

    /// Returns `true` only for [`Outcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<CompletedInvocation> for Outcome {
    fn from(done: CompletedInvocation) -> Self {
        if done.success() {
            Self::Success { stdout: done.stdout().to_string() }
        } else {
            Self::Failure {
                exit_code: done.exit_code(),
                stderr: done.stderr().to_string(),
                stdout: done.stdout().to_string(),
            }
        }
    }
}

impl From<RunError> for Outcome {
    fn from(err: RunError) -> Self {
        Self::error(err)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { stdout } => write!(f, "STDOUT:\n{stdout}"),
            Self::Failure { stderr, stdout, .. } => {
                write!(f, "STDERR:\n{stderr}\nPARTIAL STDOUT:\n{stdout}")
            }
            Self::Error { message } => write!(f, "EXECUTION ERROR: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::runner::invocation::Invocation;

    #[test]
    fn success_format() {
        let outcome = Outcome::Success { stdout: "hello\n".into() };
        assert_eq!(outcome.to_string(), "STDOUT:\nhello\n");
    }

    #[test]
    fn failure_format() {
        let outcome =
            Outcome::Failure { exit_code: 2, stderr: "bad\n".into(), stdout: "half".into() };
        assert_eq!(outcome.to_string(), "STDERR:\nbad\n\nPARTIAL STDOUT:\nhalf");
    }

    #[test]
    fn failure_with_nothing_captured() {
        let outcome = Outcome::Failure { exit_code: 1, stderr: String::new(), stdout: String::new() };
        assert_eq!(outcome.to_string(), "STDERR:\n\nPARTIAL STDOUT:\n");
    }

    #[test]
    fn error_format() {
        assert_eq!(Outcome::error("nope").to_string(), "EXECUTION ERROR: nope");
        assert_eq!(Outcome::from(RunError::EmptyCommand).to_string(), "EXECUTION ERROR: empty command");
    }

    #[test]
    fn completed_invocation_picks_branch_by_exit_code() {
        let mut ok = Invocation::new("x", Path::new("."));
        ok.push_stdout("out\n".into());
        assert_eq!(Outcome::from(ok.finish(0, "ignored".into())).to_string(), "STDOUT:\nout\n");

        let mut bad = Invocation::new("x", Path::new("."));
        bad.push_stdout("out\n".into());
        let outcome = Outcome::from(bad.finish(3, "err\n".into()));
        assert!(!outcome.is_success());
        assert_eq!(outcome.to_string(), "STDERR:\nerr\n\nPARTIAL STDOUT:\nout\n");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let value = serde_json::to_value(Outcome::Success { stdout: "x".into() }).unwrap();
        assert_eq!(value, serde_json::json!({"kind": "success", "stdout": "x"}));
    }
}

//! The lifecycle of a single command execution.
//!
//! An [`Invocation`] is created when a command is submitted and only ever
//! grows: stdout lines are appended in arrival order and never removed. It
//! is consumed by [`Invocation::finish`], which is the only way to obtain an
//! exit status, so nothing can observe one before the child has terminated.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A command that is still running.
#[derive(Debug)]
pub struct Invocation {
    id: Uuid,
    command: String,
    working_dir: PathBuf,
    stdout: Vec<String>,
}

impl Invocation {
    /// Starts tracking a new invocation with a fresh id.
    #[must_use]
    pub fn new(command: &str, working_dir: &Path) -> Self {
        Self {
            id: Uuid::new_v4(),
            command: command.to_string(),
            working_dir: working_dir.to_path_buf(),
            stdout: Vec::new(),
        }
    }

    /// Unique id of this invocation.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The raw shell command.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Directory the command runs in.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Appends one stdout line.
    pub fn push_stdout(&mut self, line: String) {
        self.stdout.push(line);
    }

    /// Lines captured so far, in arrival order.
    #[must_use]
    pub fn stdout_lines(&self) -> &[String] {
        &self.stdout
    }

    /// Finalizes the invocation once the child has exited and stderr is drained.
    #[must_use]
    pub fn finish(self, exit_code: i32, stderr: String) -> CompletedInvocation {
        CompletedInvocation {
            id: self.id,
            command: self.command,
            working_dir: self.working_dir,
            exit_code,
            stdout: self.stdout.concat(),
            stderr,
        }
    }
}

/// A finished, immutable invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedInvocation {
    id: Uuid,
    command: String,
    working_dir: PathBuf,
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl CompletedInvocation {
    /// Unique id of this invocation.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The raw shell command.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Directory the command ran in.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Exit status; `-1` when the child was terminated by a signal.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Whether the child exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// All stdout lines concatenated in arrival order.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Full stderr text.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

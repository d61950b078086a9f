//! Streaming process runner.
//!
//! Runs one shell command to completion, relays each stdout line to an
//! [`OutputSink`] as it arrives, and packages the result as an [`Outcome`].
//!
//! The drain loop consumes lines from a reader thread until the stdout pipe
//! reports end of stream, then collects the exit status, and only then reads
//! stderr. A line written just before exit is therefore never lost.

mod error;
mod invocation;
mod outcome;
mod reader;

use std::fmt::Write as _;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::{debug, debug_span, warn};
use wait_timeout::ChildExt;

use crate::ports::shell::ShellExecutor;
use crate::ports::sink::OutputSink;

pub use error::{RunError, Stream};
pub use invocation::{CompletedInvocation, Invocation};
pub use outcome::Outcome;

use reader::StderrCapture;

/// How long to keep collecting already-written stdout after a timeout kill.
const KILL_GRACE: Duration = Duration::from_millis(100);

/// Default shell used to interpret command strings.
#[must_use]
pub fn default_shell() -> &'static str {
    if cfg!(windows) {
        "cmd"
    } else {
        "/bin/sh"
    }
}

/// Live [`ShellExecutor`] that spawns a real child process per call.
#[derive(Debug, Clone)]
pub struct StreamingRunner {
    shell: String,
    timeout: Option<Duration>,
}

impl Default for StreamingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingRunner {
    /// Creates a runner using the platform shell and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self { shell: default_shell().to_string(), timeout: None }
    }

    /// Uses `shell` instead of the platform default.
    #[must_use]
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Kills the child once `timeout` has elapsed. `None` waits forever.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs `command` and renders every failure into the outcome.
    pub fn execute(&self, command: &str, working_dir: &Path, sink: &dyn OutputSink) -> Outcome {
        match self.drive(command, working_dir, sink) {
            Ok(done) => done,
            Err(err) => {
                warn!(command, error = %err, "command could not be executed");
                Outcome::from(err)
            }
        }
    }

    fn drive(
        &self,
        command: &str,
        working_dir: &Path,
        sink: &dyn OutputSink,
    ) -> Result<Outcome, RunError> {
        if command.trim().is_empty() {
            return Err(RunError::EmptyCommand);
        }
        if !working_dir.is_dir() {
            return Err(RunError::MissingWorkingDir(working_dir.to_path_buf()));
        }

        let mut invocation = Invocation::new(command, working_dir);
        let span = debug_span!(
            "invocation",
            id = %invocation.id(),
            command,
            working_dir = %working_dir.display()
        );
        let _entered = span.enter();

        let mut cmd = Command::new(&self.shell);
        cmd.arg(shell_flag(&self.shell))
            .arg(command)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // Own process group, so a timeout can take down everything the shell started.
        #[cfg(unix)]
        std::os::unix::process::CommandExt::process_group(&mut cmd, 0);
        let mut child = cmd
            .spawn()
            .map_err(|source| RunError::Spawn { shell: self.shell.clone(), source })?;
        debug!(pid = child.id(), "spawned");

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            reap(&mut child);
            return Err(RunError::Unexpected("child pipes were not captured".into()));
        };
        let lines = reader::spawn_line_reader(stdout);
        let stderr = StderrCapture::spawn(stderr);
        let deadline = self.timeout.map(|limit| Instant::now() + limit);

        loop {
            let next = match deadline {
                Some(deadline) => lines.recv_deadline(deadline),
                None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match next {
                Ok(Ok(line)) => {
                    sink.emit(&line);
                    invocation.push_stdout(line);
                }
                Ok(Err(source)) => {
                    reap(&mut child);
                    return Err(RunError::StreamRead { stream: Stream::Stdout, source });
                }
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    return Ok(self.expire(child, invocation, &lines, &stderr, sink));
                }
            }
        }

        let status = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                match child.wait_timeout(remaining).map_err(wait_failed)? {
                    Some(status) => status,
                    None => return Ok(self.expire(child, invocation, &lines, &stderr, sink)),
                }
            }
            None => child.wait().map_err(wait_failed)?,
        };
        // A background grandchild can hold stderr open after the shell exits.
        if let Some(deadline) = deadline {
            if !stderr.wait_until(deadline) {
                return Ok(self.expire(child, invocation, &lines, &stderr, sink));
            }
        }
        let exit_code = status.code().unwrap_or(-1);
        let stderr = stderr.finish()?;
        debug!(exit_code, stdout_lines = invocation.stdout_lines().len(), "exited");

        Ok(invocation.finish(exit_code, stderr).into())
    }

    /// Kills a child that outlived the timeout and reports what it produced.
    fn expire(
        &self,
        mut child: Child,
        mut invocation: Invocation,
        lines: &Receiver<std::io::Result<String>>,
        stderr: &StderrCapture,
        sink: &dyn OutputSink,
    ) -> Outcome {
        let limit = self.timeout.unwrap_or_default();
        warn!(timeout_ms = %limit.as_millis(), "command timed out, killing child");
        reap(&mut child);

        let grace = Instant::now() + KILL_GRACE;
        while let Ok(Ok(line)) = lines.recv_deadline(grace) {
            sink.emit(&line);
            invocation.push_stdout(line);
        }

        let mut stderr = stderr.snapshot();
        if !stderr.is_empty() && !stderr.ends_with('\n') {
            stderr.push('\n');
        }
        let _ = write!(stderr, "timed out after {} ms; process killed", limit.as_millis());
        invocation.finish(-1, stderr).into()
    }
}

impl ShellExecutor for StreamingRunner {
    fn run(&self, command: &str, working_dir: &Path, sink: &dyn OutputSink) -> Outcome {
        self.execute(command, working_dir, sink)
    }
}

/// The flag that makes `shell` interpret the next argument as a command line.
fn shell_flag(shell: &str) -> &'static str {
    let name = shell.rsplit(['/', '\\']).next().unwrap_or(shell);
    if name.eq_ignore_ascii_case("cmd") || name.eq_ignore_ascii_case("cmd.exe") {
        "/C"
    } else {
        "-c"
    }
}

/// Kills the child together with anything it spawned, then waits for it.
fn reap(child: &mut Child) {
    kill_process_group(child);
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn kill_process_group(child: &Child) {
    // The child leads its own group, so the group id is its pid.
    let status = Command::new("kill")
        .args(["-KILL", "--", &format!("-{}", child.id())])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Err(err) = status {
        debug!(error = %err, "could not signal process group");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

fn wait_failed(err: std::io::Error) -> RunError {
    RunError::Unexpected(format!("failed to wait for child: {err}"))
}

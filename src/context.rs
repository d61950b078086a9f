//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::{ConsoleSink, LiveFileSystem};
use crate::adapters::recording::RecordingShellExecutor;
use crate::adapters::replaying::ReplayingShellExecutor;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Settings;
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::ShellExecutor;
use crate::ports::sink::{NullSink, OutputSink};
use crate::runner::{Outcome, StreamingRunner};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Shell executor for running commands.
    pub shell: Box<dyn ShellExecutor>,
    /// Filesystem for the passthrough tools.
    pub fs: Box<dyn FileSystem>,
    /// Receives live stdout lines.
    pub sink: Box<dyn OutputSink>,
    /// Directory commands run in and relative paths resolve against.
    pub working_dir: PathBuf,
}

impl ServiceContext {
    /// Creates a live context: real child processes, real disk, console echo.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        Self {
            shell: Box::new(live_runner(settings)),
            fs: Box::new(LiveFileSystem),
            sink: sink_for(settings),
            working_dir: settings.working_dir.clone(),
        }
    }

    /// Creates a live context whose shell invocations are also recorded.
    ///
    /// The caller keeps its own handle on `recorder` and writes the cassette
    /// once this context has been dropped.
    #[must_use]
    pub fn recording(settings: &Settings, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self {
            shell: Box::new(RecordingShellExecutor::new(Box::new(live_runner(settings)), recorder)),
            ..Self::live(settings)
        }
    }

    /// Creates a context whose shell invocations are served from a cassette.
    ///
    /// The filesystem stays live; only the shell port is replayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(settings: &Settings, path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self {
            shell: Box::new(ReplayingShellExecutor::new(CassetteReplayer::new(&cassette))),
            ..Self::live(settings)
        })
    }

    /// Replaces the live-output sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn OutputSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Runs `command` in the context's working directory.
    pub fn run(&self, command: &str) -> Outcome {
        self.shell.run(command, &self.working_dir, self.sink.as_ref())
    }

    /// Resolves `path` against the working directory unless it is absolute.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() || self.working_dir == Path::new(".") {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

fn live_runner(settings: &Settings) -> StreamingRunner {
    StreamingRunner::new().with_shell(settings.shell.clone()).with_timeout(settings.timeout)
}

fn sink_for(settings: &Settings) -> Box<dyn OutputSink> {
    if settings.quiet {
        Box::new(NullSink)
    } else {
        Box::new(ConsoleSink)
    }
}

//! Command dispatch and handlers.
//!
//! Every handler returns the tool's result text; [`dispatch`] prints it.

pub mod edit;
pub mod exec;
pub mod files;
pub mod search;
pub mod tools;

use std::sync::Arc;

use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `SHELLRELAY_RECORD` is set to a directory path, every shell
/// invocation is recorded to a cassette in that directory. When
/// `SHELLRELAY_REPLAY` names a cassette, shell invocations are served from it.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the handler fails
/// before producing a tool result.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let settings = settings_for(cli, Settings::from_env()?);
    settings.validate()?;

    let session = settings.record_dir.as_deref().map(RecordingSession::new).transpose()?;
    let ctx = match (&session, &settings.replay_path) {
        (Some(session), _) => ServiceContext::recording(&settings, Arc::clone(&session.shell)),
        (None, Some(path)) => {
            info!(cassette = %path.display(), "replaying shell invocations");
            ServiceContext::replaying(&settings, path)?
        }
        (None, None) => ServiceContext::live(&settings),
    };

    let result = dispatch_with_context(&cli.command, &ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    let output = result?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Applies CLI flags on top of environment settings.
#[must_use]
pub fn settings_for(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(cwd) = &cli.cwd {
        settings.working_dir.clone_from(cwd);
    }
    if let Some(ms) = cli.timeout_ms {
        settings.timeout = (ms > 0).then(|| std::time::Duration::from_millis(ms));
    }
    settings.quiet |= cli.quiet;
    settings
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<String, String> {
    match command {
        Command::Exec { command } => Ok(exec::run(ctx, &command.join(" "))),
        Command::Search { pattern, path, flags } => Ok(search::run(ctx, pattern, path, flags)),
        Command::Edit { find, replace, path, mode } => {
            Ok(edit::run(ctx, find, replace, path, *mode))
        }
        Command::Read { path } => Ok(files::read(ctx, path)),
        Command::Write { path, content } => files::write(ctx, path, content.as_deref()),
        Command::Glob { pattern } => Ok(files::glob(ctx, pattern)),
        Command::Tools => tools::list(),
        Command::Call { tool, args } => tools::call(ctx, tool, args),
    }
}

/// Finish a recording session and report where the cassette went.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let path = session.finish()?;
    eprintln!("Recording saved to: {}", path.display());
    Ok(())
}

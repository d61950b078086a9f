//! Live sink that echoes stdout lines to the console.

use std::io::Write;

use crate::ports::sink::OutputSink;

/// Prefix printed before every relayed line.
pub const STREAM_PREFIX: &str = "[Stream]: ";

/// Prints each line to the process's stdout as `[Stream]: <line>`.
///
/// Surrounding whitespace (including the newline) is trimmed before
/// printing; the captured output keeps the line untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Formats a line the way it is shown to the user.
    #[must_use]
    pub fn render(line: &str) -> String {
        format!("{STREAM_PREFIX}{}", line.trim())
    }
}

impl OutputSink for ConsoleSink {
    fn emit(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout must not abort the command being relayed.
        let _ = writeln!(out, "{}", Self::render(line));
        let _ = out.flush();
    }
}

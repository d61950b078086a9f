//! Observer port receiving live stdout lines.

use std::sync::{Mutex, PoisonError};

/// Receives each stdout line of a running command as it arrives.
///
/// Lines are passed exactly as read from the child, including the trailing
/// newline when one was present.
pub trait OutputSink: Send + Sync {
    /// Called once per line, in emission order.
    fn emit(&self, line: &str);
}

/// Discards every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&self, _line: &str) {}
}

/// Collects lines in memory, mostly for tests and transcript recording.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line received so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl OutputSink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).push(line.to_string());
    }
}

/// Forwards to an inner sink while keeping a copy of every line.
pub struct TeeSink<'a> {
    inner: &'a dyn OutputSink,
    copy: MemorySink,
}

impl<'a> TeeSink<'a> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: &'a dyn OutputSink) -> Self {
        Self { inner, copy: MemorySink::new() }
    }

    /// Consumes the tee and returns the copied lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.copy.lines.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputSink for TeeSink<'_> {
    fn emit(&self, line: &str) {
        self.inner.emit(line);
        self.copy.emit(line);
    }
}

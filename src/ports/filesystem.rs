//! Filesystem port trait for file I/O abstraction.

use std::path::Path;

/// Provides filesystem access for the file passthrough tools.
///
/// Abstracting the filesystem keeps the tool layer testable without
/// reaching for the real disk in every test.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path)
        -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str)
        -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Expands a glob pattern, returning matching paths in sorted order.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is malformed.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}

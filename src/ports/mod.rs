//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the tool core and something it
//! does not own: the child-process shell, the filesystem, and the live
//! progress sink. Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod shell;
pub mod sink;

pub use filesystem::FileSystem;
pub use shell::ShellExecutor;
pub use sink::{MemorySink, NullSink, OutputSink};

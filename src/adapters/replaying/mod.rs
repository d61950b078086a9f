//! Replaying adapters that serve recorded interactions.

pub mod shell;

pub use shell::ReplayingShellExecutor;

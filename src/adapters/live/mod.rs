//! Live adapters for real external interactions.
//!
//! The live shell executor is [`crate::runner::StreamingRunner`].

pub mod console;
pub mod filesystem;

pub use console::ConsoleSink;
pub use filesystem::LiveFileSystem;

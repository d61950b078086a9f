//! Cassette format for recording and replaying shell invocations.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

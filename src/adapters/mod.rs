//! Adapter implementations of the port traits.
//!
//! - `live`: real console and disk
//! - `recording`: wraps a live adapter and captures every call to a cassette
//! - `replaying`: serves captured calls back without touching the system

pub mod live;
pub mod recording;
pub mod replaying;

//! Clipdeck Common Utilities
//!
//! Shared infrastructure for all Clipdeck crates:
//! - Error types and result aliases
//! - Frame pacing for the playback indicator loop
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;

//! CLI subcommand implementations.

pub mod play;
pub mod replay;
pub mod ticks;
pub mod zoom;

//! Clipdeck Timeline Model
//!
//! Defines the numeric model behind the player's navigation panel:
//! - **Window:** The zoomable visible sub-range of a media item
//! - **Ticks:** Tick-mark layout for the current window
//! - **Clip:** Optional export range nested inside the window
//! - **Rate:** Discrete playback rate steps
//!
//! This crate is pure computation: no I/O, no rendering surface.
//! All times are in seconds.

pub mod clip;
pub mod duration;
pub mod rate;
pub mod ticks;
pub mod window;

pub use clip::*;
pub use duration::*;
pub use rate::*;
pub use ticks::*;
pub use window::*;

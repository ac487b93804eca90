//! Clipdeck Player Sync
//!
//! Keeps every player control mirrored to one authoritative playback
//! position:
//!
//! - **Controls:** Seek bar, timeline track, two clip handles, volume,
//!   playback rate, and two auxiliary level sliders
//! - **Drag state:** At most one control captures pointer-move input;
//!   pointer-up anywhere releases it
//! - **Frame loop:** While media plays, an explicitly re-armed frame
//!   ticket refreshes the cursor indicators
//!
//! The engine is single-threaded and performs no I/O. It drives a
//! [`media::MediaPlayer`] and reports settings through a
//! [`media::SettingsSink`]; its output is plain [`layout::IndicatorOffsets`]
//! data for a rendering layer to apply.

pub mod control;
pub mod engine;
pub mod frame;
pub mod input;
pub mod layout;
pub mod media;

pub use control::{Control, DragState, HoverFlags};
pub use engine::{BoundKind, CursorBound, NavigationEngine};
pub use frame::{FrameLoop, FrameOutcome, FrameTicket};
pub use input::{parse_input_events, InputEvent, KeyCommand};
pub use layout::{ControlBounds, ControlLayout, IndicatorOffsets};
pub use media::{
    DefaultsSink, MediaPlayer, MemorySettings, SettingKey, SettingValue, SettingsSink,
    SimulatedPlayer,
};

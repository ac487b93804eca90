//! Pointer and keyboard input consumed by the navigation engine.
//!
//! Events serialize as one JSON object per line (JSONL) so interaction
//! sessions can be scripted and replayed headless.

use serde::{Deserialize, Serialize};

use crate::control::Control;

/// A single user input routed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Primary button pressed over a control.
    PointerDown { control: Control, x: f64 },

    /// Pointer moved anywhere in the window.
    PointerMove { x: f64 },

    /// Primary button released anywhere in the window.
    PointerUp,

    /// Wheel turned over a control.
    Wheel {
        control: Control,
        x: f64,
        delta_y: f64,
    },

    /// Pointer entered or left a control.
    Hover { control: Control, hovered: bool },

    /// Key pressed (DOM-style code, e.g. "ArrowUp", "KeyM").
    Key { code: String },

    /// Clip mode button.
    ToggleClip { on: bool },

    /// Play/pause button.
    TogglePlay,

    /// Navigation panel show/hide button.
    NavPanel { visible: bool },
}

/// Control-independent meaning of a shortcut key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Increase,
    Decrease,
    JumpToStart,
    Reset,
    ToggleMute,
}

impl KeyCommand {
    /// Map a key code to a command. Unknown keys map to `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "ArrowRight" => Some(Self::Increase),
            "ArrowDown" | "ArrowLeft" => Some(Self::Decrease),
            "Home" => Some(Self::JumpToStart),
            "KeyR" | "r" | "R" => Some(Self::Reset),
            "KeyM" | "m" | "M" => Some(Self::ToggleMute),
            _ => None,
        }
    }

    /// Command for a wheel step over a slider: scrolling up increases.
    pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
        if delta_y < 0.0 {
            Some(Self::Increase)
        } else if delta_y > 0.0 {
            Some(Self::Decrease)
        } else {
            None
        }
    }
}

/// Parse input events from JSONL content, skipping blank and `#` lines.
pub fn parse_input_events(jsonl: &str) -> Result<Vec<InputEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

//! Interactive controls, the drag state machine tag, and hover flags.

use serde::{Deserialize, Serialize};

/// Every interactive control mirrored to the playback model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// Seek bar spanning the whole media item.
    Seek,
    /// Timeline track spanning the current window.
    Timeline,
    /// Left clip handle.
    ClipLeft,
    /// Right clip handle.
    ClipRight,
    /// Main volume slider.
    Volume,
    /// Playback rate slider.
    Rate,
    /// First auxiliary level slider.
    AuxVolumeA,
    /// Second auxiliary level slider.
    AuxVolumeB,
}

impl Control {
    /// All controls, in keyboard-routing priority order.
    pub const ALL: [Control; 8] = [
        Control::Seek,
        Control::Timeline,
        Control::ClipLeft,
        Control::ClipRight,
        Control::Volume,
        Control::Rate,
        Control::AuxVolumeA,
        Control::AuxVolumeB,
    ];

    fn index(self) -> usize {
        match self {
            Control::Seek => 0,
            Control::Timeline => 1,
            Control::ClipLeft => 2,
            Control::ClipRight => 3,
            Control::Volume => 4,
            Control::Rate => 5,
            Control::AuxVolumeA => 6,
            Control::AuxVolumeB => 7,
        }
    }

    /// Controls that move the playback cursor and pause while dragged.
    pub fn scrubs(self) -> bool {
        matches!(self, Control::Seek | Control::Timeline)
    }

    /// Controls that live on the navigation panel.
    pub fn on_nav_panel(self) -> bool {
        matches!(
            self,
            Control::Timeline | Control::ClipLeft | Control::ClipRight
        )
    }
}

/// Which control, if any, is capturing pointer-move input.
///
/// Scrubbing variants remember whether playback was paused when the drag
/// began, so pointer-up can restore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Seek {
        was_paused: bool,
    },
    Timeline {
        was_paused: bool,
    },
    ClipLeft,
    ClipRight,
    Volume,
    Rate,
    AuxVolumeA,
    AuxVolumeB,
}

impl DragState {
    /// Drag state entered by a pointer-down on `control`.
    pub fn begin(control: Control, was_paused: bool) -> Self {
        match control {
            Control::Seek => DragState::Seek { was_paused },
            Control::Timeline => DragState::Timeline { was_paused },
            Control::ClipLeft => DragState::ClipLeft,
            Control::ClipRight => DragState::ClipRight,
            Control::Volume => DragState::Volume,
            Control::Rate => DragState::Rate,
            Control::AuxVolumeA => DragState::AuxVolumeA,
            Control::AuxVolumeB => DragState::AuxVolumeB,
        }
    }

    /// The control being dragged.
    pub fn control(&self) -> Option<Control> {
        match self {
            DragState::Idle => None,
            DragState::Seek { .. } => Some(Control::Seek),
            DragState::Timeline { .. } => Some(Control::Timeline),
            DragState::ClipLeft => Some(Control::ClipLeft),
            DragState::ClipRight => Some(Control::ClipRight),
            DragState::Volume => Some(Control::Volume),
            DragState::Rate => Some(Control::Rate),
            DragState::AuxVolumeA => Some(Control::AuxVolumeA),
            DragState::AuxVolumeB => Some(Control::AuxVolumeB),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    /// Whether the cursor itself is being dragged.
    pub fn is_scrubbing(&self) -> bool {
        matches!(self, DragState::Seek { .. } | DragState::Timeline { .. })
    }
}

/// Per-control hover booleans, independent of drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverFlags {
    flags: [bool; 8],
}

impl HoverFlags {
    pub fn set(&mut self, control: Control, hovered: bool) {
        self.flags[control.index()] = hovered;
    }

    pub fn is_hovered(&self, control: Control) -> bool {
        self.flags[control.index()]
    }

    /// Highest-priority hovered control, used to route keyboard shortcuts.
    pub fn target(&self) -> Option<Control> {
        Control::ALL.into_iter().find(|c| self.is_hovered(*c))
    }
}

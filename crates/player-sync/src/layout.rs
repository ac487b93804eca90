//! Control geometry pushed in by the layout collaborator, and the pure
//! indicator data computed back out for the rendering layer.

use serde::{Deserialize, Serialize};

use crate::control::Control;

/// Horizontal extent of a control, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlBounds {
    pub left: f64,
    pub width: f64,
}

impl ControlBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self {
            left,
            width: width.max(0.0),
        }
    }

    /// Pointer position as a fraction of the control, clamped to `[0, 1]`.
    ///
    /// Zero-width (hidden) controls always report `0.0`.
    pub fn fraction_at(&self, x: f64) -> f64 {
        if self.width <= 0.0 || !x.is_finite() {
            return 0.0;
        }
        ((x - self.left) / self.width).clamp(0.0, 1.0)
    }

    /// Pixel offset from the control's left edge for a fraction.
    pub fn offset_of(&self, fraction: f64) -> f64 {
        fraction * self.width
    }
}

/// Bounding boxes of every control.
///
/// The clip handles ride on the timeline track, so they share its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLayout {
    pub seek: ControlBounds,
    pub timeline: ControlBounds,
    pub volume: ControlBounds,
    pub rate: ControlBounds,
    pub aux_volume_a: ControlBounds,
    pub aux_volume_b: ControlBounds,
}

impl ControlLayout {
    /// Bounds used to turn pointer positions into fractions for `control`.
    pub fn bounds_for(&self, control: Control) -> ControlBounds {
        match control {
            Control::Seek => self.seek,
            Control::Timeline | Control::ClipLeft | Control::ClipRight => self.timeline,
            Control::Volume => self.volume,
            Control::Rate => self.rate,
            Control::AuxVolumeA => self.aux_volume_a,
            Control::AuxVolumeB => self.aux_volume_b,
        }
    }

    /// Replace the bounds of one control track.
    pub fn set_bounds(&mut self, control: Control, bounds: ControlBounds) {
        match control {
            Control::Seek => self.seek = bounds,
            Control::Timeline | Control::ClipLeft | Control::ClipRight => self.timeline = bounds,
            Control::Volume => self.volume = bounds,
            Control::Rate => self.rate = bounds,
            Control::AuxVolumeA => self.aux_volume_a = bounds,
            Control::AuxVolumeB => self.aux_volume_b = bounds,
        }
    }
}

/// Pixel offsets of every mirrored indicator, relative to each control's
/// left edge, plus the labels shown next to them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IndicatorOffsets {
    pub seek_px: f64,
    /// `None` when the cursor lies outside the visible window.
    pub timeline_px: Option<f64>,
    pub clip_left_px: Option<f64>,
    pub clip_right_px: Option<f64>,
    pub volume_px: f64,
    pub rate_px: f64,
    pub aux_volume_a_px: f64,
    pub aux_volume_b_px: f64,
    pub cursor_label: String,
    pub rate_label: String,
}

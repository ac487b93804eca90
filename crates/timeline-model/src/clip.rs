//! Clip selection: an optional export range nested inside the window.

use serde::{Deserialize, Serialize};

use crate::window::TimelineWindow;

/// Shortest clip the handles can produce, in seconds.
pub const MIN_CLIP_LENGTH_SECS: f64 = 5.0;

/// Bounds of an active clip, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRange {
    pub start: f64,
    pub end: f64,
}

impl ClipRange {
    /// Clip length in seconds.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Check if a time lies within the clip (both ends inclusive).
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }
}

/// Clip mode state. `None` while clip mode is off.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClipSelection {
    range: Option<ClipRange>,
}

impl ClipSelection {
    /// A selection with clip mode off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether clip mode is on.
    pub fn is_active(&self) -> bool {
        self.range.is_some()
    }

    /// Active clip bounds, if clip mode is on.
    pub fn range(&self) -> Option<ClipRange> {
        self.range
    }

    /// Turn clip mode on or off.
    ///
    /// Enabling centers a default-length clip on `cursor`, shifted (never
    /// shrunk) to fit the window. Windows no longer than the default clip
    /// length are selected whole.
    pub fn toggle(&mut self, on: bool, cursor: f64, window: &TimelineWindow) {
        if !on {
            self.range = None;
            tracing::debug!("Clip mode disabled");
            return;
        }

        let cursor = if cursor.is_finite() {
            cursor.clamp(window.start(), window.end())
        } else {
            window.start()
        };
        let length = window.default_clip_length();
        let range = if window.duration() > length {
            let mut start = cursor - length / 2.0;
            let mut end = start + length;
            if start < window.start() {
                start = window.start();
                end = start + length;
            }
            if end > window.end() {
                end = window.end();
                start = end - length;
            }
            ClipRange { start, end }
        } else {
            ClipRange {
                start: window.start(),
                end: window.end(),
            }
        };

        tracing::debug!(start = range.start, end = range.end, "Clip mode enabled");
        self.range = Some(range);
    }

    /// Move the left handle, keeping the minimum clip length.
    pub fn set_left(&mut self, new_start: f64, window: &TimelineWindow) {
        if let Some(range) = self.range.as_mut() {
            range.start = new_start
                .min(range.end - MIN_CLIP_LENGTH_SECS)
                .max(window.start());
        }
    }

    /// Move the right handle, keeping the minimum clip length.
    pub fn set_right(&mut self, new_end: f64, window: &TimelineWindow) {
        if let Some(range) = self.range.as_mut() {
            range.end = new_end
                .max(range.start + MIN_CLIP_LENGTH_SECS)
                .min(window.end());
        }
    }

    /// Pull the clip back inside a window that just changed.
    pub fn reconcile(&mut self, window: &TimelineWindow) {
        let Some(range) = self.range.as_mut() else {
            return;
        };
        let before = *range;

        if range.start < window.start() {
            range.start = window.start();
            if range.end - range.start < MIN_CLIP_LENGTH_SECS {
                range.end = range.start + MIN_CLIP_LENGTH_SECS;
            }
        }
        if range.end > window.end() {
            range.end = window.end();
            if range.end - range.start < MIN_CLIP_LENGTH_SECS {
                range.start = range.end - MIN_CLIP_LENGTH_SECS;
            }
        }
        // Windows shorter than one clip length cannot honor the minimum.
        range.start = range.start.max(window.start());

        if *range != before {
            tracing::debug!(
                start = range.start,
                end = range.end,
                "Clip reconciled to window"
            );
        }
    }
}

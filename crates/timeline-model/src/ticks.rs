//! Tick-mark layout for the visible timeline window.
//!
//! Ticks are placed on every multiple of the window's sub-interval; those
//! that also fall on a multiple of the tick interval are major and carry a
//! time label. Offsets are computed from integer multiples so no rounding
//! drift accumulates along long windows.

use serde::Serialize;

use crate::duration::format_duration;
use crate::window::TimelineWindow;

/// A single tick descriptor, ready for a rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// Media time of the tick, in seconds.
    pub offset_secs: f64,
    /// Horizontal position on the track, in pixels.
    pub pixel_x: f64,
    /// Major ticks fall on the tick interval.
    pub is_major: bool,
    /// Formatted time, present on major ticks only.
    pub label: Option<String>,
}

/// Lazy, restartable sequence of ticks for one window.
///
/// Cloning the layout restarts iteration from the first remaining tick.
#[derive(Debug, Clone)]
pub struct TickLayout {
    window_start: f64,
    window_duration: f64,
    track_width_px: f64,
    sub_interval: u64,
    interval: u64,
    next_index: u64,
    end_index: u64,
}

impl TickLayout {
    /// Lay out ticks for `window` across a track `track_width_px` wide.
    ///
    /// Pixel positions share the coordinate space of the track bounds, so a
    /// tick and an indicator at the same time land on the same pixel.
    pub fn new(window: &TimelineWindow, track_width_px: f64) -> Self {
        let sub_interval = window.tick_sub_interval().max(1) as u64;
        let interval = window.tick_interval().max(1) as u64;
        let sub = sub_interval as f64;

        let first_index = (window.start() / sub).ceil().max(0.0) as u64;
        let last_index = (window.end() / sub).floor().max(0.0) as u64;
        let end_index = if last_index >= first_index {
            last_index + 1
        } else {
            first_index
        };

        Self {
            window_start: window.start(),
            window_duration: window.duration(),
            track_width_px: if track_width_px.is_finite() {
                track_width_px.max(0.0)
            } else {
                0.0
            },
            sub_interval,
            interval,
            next_index: first_index,
            end_index,
        }
    }

    /// Number of ticks still to be produced.
    pub fn remaining(&self) -> usize {
        (self.end_index - self.next_index) as usize
    }

    fn tick_at(&self, index: u64) -> Tick {
        let offset = index * self.sub_interval;
        let offset_secs = offset as f64;
        let is_major = offset % self.interval == 0;
        Tick {
            offset_secs,
            pixel_x: (offset_secs - self.window_start) / self.window_duration
                * self.track_width_px,
            is_major,
            label: is_major.then(|| format_duration(offset_secs)),
        }
    }
}

impl Iterator for TickLayout {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.next_index >= self.end_index {
            return None;
        }
        let tick = self.tick_at(self.next_index);
        self.next_index += 1;
        Some(tick)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TickLayout {}

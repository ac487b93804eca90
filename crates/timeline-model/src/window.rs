//! The zoomable time window shown on the timeline track.
//!
//! A window is the visible sub-range `[start, end)` of a media item.
//! Its length drives the tick granularity and the default clip length.

use serde::{Deserialize, Serialize};

use crate::duration::MediaDuration;

/// Shortest window the user can zoom into, in seconds.
pub const MIN_ZOOM_SECS: f64 = 30.0;

/// Tolerance used when comparing window lengths against their limits.
const LENGTH_EPSILON: f64 = 1e-6;

/// Fraction of the window removed by one zoom-in step.
pub const ZOOM_IN_FACTOR: f64 = 0.1;

/// Fraction of the window added by one zoom-out step.
pub const ZOOM_OUT_FACTOR: f64 = 0.15;

/// Tick spacing and clip sizing derived from a window's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Granularity {
    /// Seconds between major (labelled) ticks.
    pub tick_interval: u32,
    /// Seconds between minor ticks.
    pub tick_sub_interval: u32,
    /// Length of a freshly created clip, in seconds.
    pub default_clip_length: u32,
}

impl Granularity {
    const fn new(tick_interval: u32, tick_sub_interval: u32, default_clip_length: u32) -> Self {
        Self {
            tick_interval,
            tick_sub_interval,
            default_clip_length,
        }
    }

    /// Look up the granularity for a window of the given length.
    ///
    /// Rows are evaluated top-down; the first threshold the duration
    /// strictly exceeds wins.
    pub fn for_duration(duration: f64) -> Self {
        GRANULARITY_TABLE
            .iter()
            .find(|(threshold, _)| duration > *threshold)
            .map(|(_, granularity)| *granularity)
            .unwrap_or(FINEST_GRANULARITY)
    }
}

const GRANULARITY_TABLE: [(f64, Granularity); 7] = [
    (7200.0, Granularity::new(3600, 900, 300)),
    (2400.0, Granularity::new(600, 150, 120)),
    (960.0, Granularity::new(300, 60, 60)),
    (480.0, Granularity::new(120, 30, 50)),
    (240.0, Granularity::new(60, 15, 30)),
    (80.0, Granularity::new(30, 10, 30)),
    (40.0, Granularity::new(10, 5, 20)),
];

const FINEST_GRANULARITY: Granularity = Granularity::new(5, 1, 5);

/// Zoom direction for a wheel step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Direction for a vertical wheel delta: scrolling up zooms in.
    /// Returns `None` for a zero delta.
    pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
        if delta_y < 0.0 {
            Some(Self::In)
        } else if delta_y > 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }
}

/// Visible time sub-range of a media item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineWindow {
    media_duration: f64,
    start: f64,
    end: f64,
    duration: f64,
    granularity: Granularity,
}

impl TimelineWindow {
    /// Create a window covering the whole media item.
    pub fn new(media_duration: MediaDuration) -> Self {
        let media = media_duration.secs();
        let mut window = Self {
            media_duration: media,
            start: 0.0,
            end: media,
            duration: media,
            granularity: Granularity::for_duration(media),
        };
        window.update(0.0, media);
        window
    }

    /// Set the window bounds and recompute the derived granularity.
    ///
    /// Bounds are clamped into `[0, media_duration]` and widened to the
    /// minimum zoom length if needed, so the window invariants always hold.
    pub fn update(&mut self, new_start: f64, new_end: f64) {
        let media = self.media_duration;
        let min_len = MIN_ZOOM_SECS.min(media);

        let mut start = finite_or(new_start, 0.0).clamp(0.0, media);
        let mut end = finite_or(new_end, media).clamp(start, media);
        if end - start < min_len {
            end = (start + min_len).min(media);
            start = end - min_len;
        }

        self.start = start;
        self.end = end;
        self.duration = end - start;
        self.granularity = Granularity::for_duration(self.duration);

        tracing::trace!(
            start = self.start,
            end = self.end,
            interval = self.granularity.tick_interval,
            "Timeline window updated"
        );
    }

    /// Restore the full-media window.
    pub fn reset(&mut self) {
        self.update(0.0, self.media_duration);
    }

    /// Whether a zoom-in step would change the window.
    pub fn can_zoom_in(&self) -> bool {
        self.duration > MIN_ZOOM_SECS + LENGTH_EPSILON
    }

    /// Whether a zoom-out step would change the window.
    pub fn can_zoom_out(&self) -> bool {
        self.duration < self.media_duration - LENGTH_EPSILON
    }

    /// Zoom one step anchored at `pointer_pct` (fraction of the track).
    ///
    /// Returns whether the window changed.
    pub fn zoom(&mut self, pointer_pct: f64, direction: ZoomDirection) -> bool {
        let pct = finite_or(pointer_pct, 0.5).clamp(0.0, 1.0);
        let (new_start, new_end) = match direction {
            ZoomDirection::In => {
                if !self.can_zoom_in() {
                    return false;
                }
                self.zoom_in_bounds(pct)
            }
            ZoomDirection::Out => {
                if !self.can_zoom_out() {
                    return false;
                }
                self.zoom_out_bounds(pct)
            }
        };

        let before = (self.start, self.end);
        self.update(new_start, new_end);
        tracing::debug!(
            ?direction,
            pointer_pct = pct,
            start = self.start,
            end = self.end,
            "Timeline zoomed"
        );
        before != (self.start, self.end)
    }

    fn zoom_in_bounds(&self, pct: f64) -> (f64, f64) {
        let shrink = ZOOM_IN_FACTOR * self.duration;
        let mut new_start = self.start + shrink * pct;
        let mut new_end = self.end - shrink * (1.0 - pct);

        let new_duration = new_end - new_start;
        if new_duration < MIN_ZOOM_SECS {
            new_start -= (MIN_ZOOM_SECS - new_duration) * pct;
            new_end = new_start + MIN_ZOOM_SECS;
        }
        (new_start, new_end)
    }

    fn zoom_out_bounds(&self, pct: f64) -> (f64, f64) {
        let media = self.media_duration;
        let grow = ZOOM_OUT_FACTOR * self.duration;
        let mut new_start = self.start - grow * pct;
        let mut new_end = self.end + grow * (1.0 - pct);

        // Start is clamped first; the end only absorbs overflow if the start
        // stayed in range.
        if new_start < 0.0 {
            new_end = (new_end - new_start).min(media);
            new_start = 0.0;
        } else if new_end > media {
            new_start = (new_start - (new_end - media)).max(0.0);
            new_end = media;
        }
        (new_start, new_end)
    }

    /// Window start, in seconds.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Window end, in seconds.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Window length, in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Length of the whole media item.
    pub fn media_duration(&self) -> f64 {
        self.media_duration
    }

    /// Granularity derived from the current window length.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn tick_interval(&self) -> u32 {
        self.granularity.tick_interval
    }

    pub fn tick_sub_interval(&self) -> u32 {
        self.granularity.tick_sub_interval
    }

    pub fn default_clip_length(&self) -> f64 {
        self.granularity.default_clip_length as f64
    }

    /// Check if a time lies within the window (both ends inclusive).
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Position of `time` as a fraction of the window.
    ///
    /// Not clamped: times outside the window map outside `[0, 1]`.
    pub fn fraction_of(&self, time: f64) -> f64 {
        (time - self.start) / self.duration
    }

    /// Time at a fraction of the window, clamped to the window.
    pub fn time_at(&self, fraction: f64) -> f64 {
        self.start + finite_or(fraction, 0.0).clamp(0.0, 1.0) * self.duration
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn window(media: f64) -> TimelineWindow {
        TimelineWindow::new(MediaDuration::new(media).unwrap())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_granularity_table_rows() {
        assert_eq!(
            Granularity::for_duration(3661.0),
            Granularity::new(600, 150, 120)
        );
        assert_eq!(
            Granularity::for_duration(7200.5),
            Granularity::new(3600, 900, 300)
        );
        assert_eq!(
            Granularity::for_duration(7200.0),
            Granularity::new(600, 150, 120)
        );
        assert_eq!(Granularity::for_duration(100.0), Granularity::new(30, 10, 30));
        assert_eq!(Granularity::for_duration(40.0), Granularity::new(5, 1, 5));
        assert_eq!(Granularity::for_duration(2.0), Granularity::new(5, 1, 5));
    }

    #[test]
    fn test_initial_window_covers_media() {
        let w = window(3661.0);
        assert_eq!(w.start(), 0.0);
        assert_eq!(w.end(), 3661.0);
        assert_eq!(w.tick_interval(), 600);
        assert_eq!(w.tick_sub_interval(), 150);
        assert_eq!(w.default_clip_length(), 120.0);
    }

    #[test]
    fn test_zoom_in_centered() {
        let mut w = window(100.0);
        assert!(w.zoom(0.5, ZoomDirection::In));
        assert!(approx(w.start(), 5.0));
        assert!(approx(w.end(), 95.0));
        assert!(approx(w.duration(), 90.0));
    }

    #[test]
    fn test_zoom_in_stops_at_min_zoom() {
        let mut w = window(100.0);
        w.update(10.0, 42.0);
        assert!(w.zoom(0.25, ZoomDirection::In));
        assert!(approx(w.duration(), MIN_ZOOM_SECS));
        // 10 + 3.2 * 0.25 = 10.8, then shifted by (30 - 28.8) * 0.25 = 0.3
        assert!(approx(w.start(), 10.5));
        assert!(approx(w.end(), 40.5));

        assert!(!w.can_zoom_in());
        assert!(!w.zoom(0.5, ZoomDirection::In));
    }

    #[test]
    fn test_zoom_out_at_full_media_is_noop() {
        let mut w = window(100.0);
        assert!(!w.zoom(0.5, ZoomDirection::Out));
        assert_eq!((w.start(), w.end()), (0.0, 100.0));
    }

    #[test]
    fn test_zoom_out_clamps_start_and_gives_growth_to_end() {
        let mut w = window(1000.0);
        w.update(10.0, 110.0);
        // start - 15 * 1.0 = -5 -> 0, end + 0 + 5 = 115
        assert!(w.zoom(1.0, ZoomDirection::Out));
        assert!(approx(w.start(), 0.0));
        assert!(approx(w.end(), 115.0));
    }

    #[test]
    fn test_zoom_out_clamps_end_and_gives_growth_to_start() {
        let mut w = window(1000.0);
        w.update(890.0, 990.0);
        // end + 15 = 1005 -> 1000, start - 0 - 5 = 885
        assert!(w.zoom(0.0, ZoomDirection::Out));
        assert!(approx(w.start(), 885.0));
        assert!(approx(w.end(), 1000.0));
    }

    #[test]
    fn test_short_media_cannot_zoom() {
        let mut w = window(12.0);
        assert_eq!(w.duration(), 12.0);
        assert!(!w.zoom(0.5, ZoomDirection::In));
        assert!(!w.zoom(0.5, ZoomDirection::Out));
        assert_eq!(w.default_clip_length(), 5.0);
    }

    #[test]
    fn test_update_clamps_out_of_range_bounds() {
        let mut w = window(100.0);
        w.update(-20.0, 500.0);
        assert_eq!((w.start(), w.end()), (0.0, 100.0));

        w.update(90.0, 95.0);
        assert!(approx(w.duration(), MIN_ZOOM_SECS));
        assert_eq!(w.end(), 100.0);
    }

    #[test]
    fn test_fraction_conversions() {
        let mut w = window(200.0);
        w.update(50.0, 150.0);
        assert!(approx(w.fraction_of(75.0), 0.25));
        assert!(approx(w.time_at(0.5), 100.0));
        assert!(approx(w.time_at(2.0), 150.0));
        assert!(w.contains(150.0));
        assert!(!w.contains(49.0));
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(ZoomDirection::from_wheel_delta(-3.0), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_wheel_delta(3.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_wheel_delta(0.0), None);
    }

    proptest! {
        #[test]
        fn prop_zoom_sequences_keep_window_invariants(
            media in 1.0f64..20_000.0,
            steps in proptest::collection::vec((0.0f64..=1.0, any::<bool>()), 0..60),
        ) {
            let mut w = window(media);
            for (pct, zoom_in) in steps {
                let direction = if zoom_in { ZoomDirection::In } else { ZoomDirection::Out };
                w.zoom(pct, direction);

                prop_assert!(w.start() >= 0.0);
                prop_assert!(w.start() < w.end());
                prop_assert!(w.end() <= media + 1e-9);
                if media >= MIN_ZOOM_SECS {
                    prop_assert!(w.duration() >= MIN_ZOOM_SECS - 1e-9);
                } else {
                    prop_assert!((w.duration() - media).abs() < 1e-9);
                }
            }
        }
    }
}

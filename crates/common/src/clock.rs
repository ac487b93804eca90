//! Frame pacing for the playback indicator loop.
//!
//! The navigation engine never owns a timer. Hosts that drive its frame
//! loop (the CLI's timed playback, tests) use these helpers to decide when
//! a frame is due and how much media time elapsed since the last one.

use std::time::{Duration, Instant};

/// Paces indicator frames at a target rate and measures real elapsed time
/// between fired frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FrameClock {
    /// Create a clock targeting the given Hz rate (minimum 1 Hz).
    pub fn new(target_hz: u32) -> Self {
        let hz = target_hz.max(1) as u64;
        Self {
            interval: Duration::from_nanos(1_000_000_000 / hz),
            last_frame: None,
        }
    }

    /// Target interval between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether enough time has passed for the next frame.
    /// The first call always returns true.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_frame {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Mark a frame as fired and return seconds elapsed since the previous
    /// one (zero for the first frame).
    pub fn tick(&mut self, now: Instant) -> f64 {
        let elapsed = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        elapsed
    }

    /// Forget the previous frame, e.g. after playback paused.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

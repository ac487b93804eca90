//! Discrete playback rate steps.

use serde::{Deserialize, Serialize};

/// Lowest rate step.
pub const MIN_RATE_STEP: i8 = -2;

/// Highest rate step.
pub const MAX_RATE_STEP: i8 = 4;

/// Step that plays at normal speed.
pub const DEFAULT_RATE_STEP: i8 = 1;

/// Multipliers for steps `MIN_RATE_STEP..=MAX_RATE_STEP`, in order.
const RATE_MULTIPLIERS: [f64; 7] = [0.2, 0.5, 0.7, 1.0, 2.0, 3.0, 4.0];

/// Bidirectional mapping between rate steps and playback multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackRateMapper {
    step: i8,
}

impl Default for PlaybackRateMapper {
    fn default() -> Self {
        Self {
            step: DEFAULT_RATE_STEP,
        }
    }
}

impl PlaybackRateMapper {
    /// Mapper at normal speed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper positioned on the step nearest to a persisted multiplier.
    pub fn from_multiplier(multiplier: f64) -> Self {
        Self {
            step: step_for_multiplier(multiplier),
        }
    }

    /// Current step in `MIN_RATE_STEP..=MAX_RATE_STEP`.
    pub fn step(&self) -> i8 {
        self.step
    }

    /// Current playback multiplier.
    pub fn multiplier(&self) -> f64 {
        multiplier_for_step(self.step)
    }

    /// Move to a step, clamped to the valid range.
    pub fn set_step(&mut self, step: i32) -> f64 {
        self.step = step.clamp(MIN_RATE_STEP as i32, MAX_RATE_STEP as i32) as i8;
        self.multiplier()
    }

    /// One step faster, stopping at the top step.
    pub fn increment(&mut self) -> f64 {
        self.set_step(self.step as i32 + 1)
    }

    /// One step slower, stopping at the bottom step.
    pub fn decrement(&mut self) -> f64 {
        self.set_step(self.step as i32 - 1)
    }

    /// Back to normal speed regardless of the current step.
    pub fn reset(&mut self) -> f64 {
        self.step = step_for_multiplier(1.0);
        self.multiplier()
    }

    /// Position of the current step along the rate slider, in `[0, 1]`.
    pub fn step_fraction(&self) -> f64 {
        (self.step - MIN_RATE_STEP) as f64 / (MAX_RATE_STEP - MIN_RATE_STEP) as f64
    }

    /// Snap a slider fraction to the nearest step.
    pub fn set_from_fraction(&mut self, fraction: f64) -> f64 {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let span = (MAX_RATE_STEP - MIN_RATE_STEP) as f64;
        self.set_step(MIN_RATE_STEP as i32 + (fraction * span).round() as i32)
    }
}

/// Multiplier for a step, clamping out-of-range steps.
pub fn multiplier_for_step(step: i8) -> f64 {
    let index = (step.clamp(MIN_RATE_STEP, MAX_RATE_STEP) - MIN_RATE_STEP) as usize;
    RATE_MULTIPLIERS[index]
}

/// Step whose multiplier is closest to `multiplier`.
///
/// Non-finite input maps to the default step.
pub fn step_for_multiplier(multiplier: f64) -> i8 {
    if !multiplier.is_finite() {
        return DEFAULT_RATE_STEP;
    }
    RATE_MULTIPLIERS
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (*a - multiplier)
                .abs()
                .total_cmp(&(*b - multiplier).abs())
        })
        .map(|(index, _)| MIN_RATE_STEP + index as i8)
        .unwrap_or(DEFAULT_RATE_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_table() {
        let pairs: Vec<(i8, f64)> = (MIN_RATE_STEP..=MAX_RATE_STEP)
            .map(|s| (s, multiplier_for_step(s)))
            .collect();
        assert_eq!(
            pairs,
            [
                (-2, 0.2),
                (-1, 0.5),
                (0, 0.7),
                (1, 1.0),
                (2, 2.0),
                (3, 3.0),
                (4, 4.0)
            ]
        );
        for (step, multiplier) in pairs {
            assert_eq!(step_for_multiplier(multiplier), step);
        }
    }

    #[test]
    fn test_decrements_clamp_at_slowest() {
        let mut rate = PlaybackRateMapper::new();
        assert_eq!(rate.step(), 1);
        assert_eq!(rate.multiplier(), 1.0);

        assert_eq!(rate.decrement(), 0.7);
        assert_eq!(rate.decrement(), 0.5);
        assert_eq!(rate.decrement(), 0.2);
        assert_eq!(rate.decrement(), 0.2);
        assert_eq!(rate.step(), -2);
    }

    #[test]
    fn test_increments_clamp_at_fastest() {
        let mut rate = PlaybackRateMapper::new();
        for _ in 0..10 {
            rate.increment();
        }
        assert_eq!(rate.step(), MAX_RATE_STEP);
        assert_eq!(rate.multiplier(), 4.0);
    }

    #[test]
    fn test_reset_restores_normal_speed() {
        let mut rate = PlaybackRateMapper::new();
        rate.set_step(-2);
        assert_eq!(rate.reset(), 1.0);
        assert_eq!(rate.step(), DEFAULT_RATE_STEP);
    }

    #[test]
    fn test_from_multiplier_snaps_to_nearest() {
        assert_eq!(PlaybackRateMapper::from_multiplier(1.25).multiplier(), 1.0);
        assert_eq!(PlaybackRateMapper::from_multiplier(2.6).multiplier(), 3.0);
        assert_eq!(PlaybackRateMapper::from_multiplier(9.0).multiplier(), 4.0);
        assert_eq!(PlaybackRateMapper::from_multiplier(f64::NAN).step(), 1);
    }

    #[test]
    fn test_slider_fraction_mapping() {
        let mut rate = PlaybackRateMapper::new();
        assert!((rate.step_fraction() - 0.5).abs() < 1e-9);

        assert_eq!(rate.set_from_fraction(0.0), 0.2);
        assert_eq!(rate.set_from_fraction(1.0), 4.0);
        // 0.6 * 6 = 3.6 -> 4 -> step 2
        assert_eq!(rate.set_from_fraction(0.6), 2.0);
        assert_eq!(rate.set_from_fraction(-3.0), 0.2);
    }
}

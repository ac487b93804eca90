//! Media duration validation and time label formatting.

use serde::{Deserialize, Serialize};

use clipdeck_common::error::{ClipdeckError, ClipdeckResult};

/// Length of a loaded media item, in seconds.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MediaDuration(f64);

impl MediaDuration {
    /// Validate a duration reported by the media player.
    pub fn new(secs: f64) -> ClipdeckResult<Self> {
        if secs.is_finite() && secs > 0.0 {
            Ok(Self(secs))
        } else {
            Err(ClipdeckError::invalid_duration(secs))
        }
    }

    /// Duration in seconds.
    pub fn secs(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for MediaDuration {
    type Error = ClipdeckError;

    fn try_from(secs: f64) -> ClipdeckResult<Self> {
        Self::new(secs)
    }
}

impl From<MediaDuration> for f64 {
    fn from(duration: MediaDuration) -> f64 {
        duration.0
    }
}

/// Format a position as `M:SS`, or `H:MM:SS` from one hour up.
///
/// Fractional seconds are truncated; negative input formats as `0:00`.
pub fn format_duration(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

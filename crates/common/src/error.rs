//! Error types shared across Clipdeck crates.

use std::path::PathBuf;

/// Top-level error type for Clipdeck operations.
///
/// The navigation engine itself never fails: numeric input is clamped.
/// These variants cover the boundaries around it (media metadata,
/// configuration, scripted input, the CLI).
#[derive(Debug, thiserror::Error)]
pub enum ClipdeckError {
    #[error("Invalid media duration: {value}")]
    InvalidDuration { value: f64 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ClipdeckError.
pub type ClipdeckResult<T> = Result<T, ClipdeckError>;

impl ClipdeckError {
    pub fn invalid_duration(value: f64) -> Self {
        Self::InvalidDuration { value }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn script(line: usize, msg: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: msg.into(),
        }
    }
}

//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Persisted player defaults, read once at startup.
    #[serde(default)]
    pub player: PlayerDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Player control defaults.
///
/// The navigation engine reads these once when it is built and reports
/// changes back through its persist hook; it never writes this file itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDefaults {
    /// Main playback volume in `[0.0, 1.0]`.
    pub volume: f64,

    /// Playback rate multiplier (snapped to the nearest rate step on load).
    pub playback_rate: f64,

    /// First auxiliary level (microphone monitor).
    pub aux_volume_a: f64,

    /// Second auxiliary level (system audio monitor).
    pub aux_volume_b: f64,

    /// Whether the navigation panel (timeline + clip track) is shown.
    pub nav_panel_visible: bool,

    /// Seconds moved per keyboard seek nudge.
    pub seek_step_secs: f64,

    /// Level change per keyboard volume nudge.
    pub volume_step: f64,

    /// Indicator refresh rate while playing (Hz).
    pub frame_rate_hz: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "clipdeck=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player: PlayerDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            volume: 1.0,
            playback_rate: 1.0,
            aux_volume_a: 1.0,
            aux_volume_b: 1.0,
            nav_panel_visible: true,
            seek_step_secs: 5.0,
            volume_step: 0.05,
            frame_rate_hz: 60,
        }
    }
}

impl PlayerDefaults {
    /// Clamp every level into its valid range.
    ///
    /// Values edited by hand in the config file may be out of range.
    pub fn sanitized(mut self) -> Self {
        self.volume = clamp_level(self.volume);
        self.aux_volume_a = clamp_level(self.aux_volume_a);
        self.aux_volume_b = clamp_level(self.aux_volume_b);
        if !self.playback_rate.is_finite() || self.playback_rate <= 0.0 {
            self.playback_rate = 1.0;
        }
        if !self.seek_step_secs.is_finite() || self.seek_step_secs <= 0.0 {
            self.seek_step_secs = 5.0;
        }
        if !self.volume_step.is_finite() || self.volume_step <= 0.0 {
            self.volume_step = 0.05;
        }
        self.frame_rate_hz = self.frame_rate_hz.clamp(1, 240);
        self
    }
}

fn clamp_level(level: f64) -> f64 {
    if level.is_finite() {
        level.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
                    Ok(mut config) => {
                        config.player = config.player.sanitized();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("clipdeck").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("clipdeck-config-{}-{}", name, std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/clipdeck/config.json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("save");
        let mut config = AppConfig::default();
        config.player.volume = 0.4;
        config.player.nav_panel_visible = false;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.player.volume, 0.4);
        assert!(!loaded.player.nav_panel_visible);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_partial_player_section_uses_defaults() {
        let raw = r#"{ "player": { "volume": 0.25 } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.player.volume, 0.25);
        assert_eq!(config.player.playback_rate, 1.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_logging_section_keeps_player_defaults() {
        let path = scratch_path("partial-logging");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{ "player": { "volume": 0.3 }, "logging": { "level": "debug" } }"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.json);
        assert_eq!(config.logging.file, None);
        assert_eq!(config.player.volume, 0.3);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_sanitize_clamps_levels() {
        let defaults = PlayerDefaults {
            volume: 3.0,
            aux_volume_a: -1.0,
            aux_volume_b: f64::NAN,
            playback_rate: 0.0,
            frame_rate_hz: 0,
            ..PlayerDefaults::default()
        }
        .sanitized();

        assert_eq!(defaults.volume, 1.0);
        assert_eq!(defaults.aux_volume_a, 0.0);
        assert_eq!(defaults.aux_volume_b, 1.0);
        assert_eq!(defaults.playback_rate, 1.0);
        assert_eq!(defaults.frame_rate_hz, 1);
    }
}

//! Collaborator interfaces consumed by the navigation engine.
//!
//! The engine never decodes media or writes settings itself. It reads and
//! drives a [`MediaPlayer`] and reports final control values through a
//! [`SettingsSink`].

use serde::Serialize;

use clipdeck_common::config::PlayerDefaults;

/// The media element owning the authoritative playback cursor.
pub trait MediaPlayer {
    /// Media length in seconds, as reported once metadata is ready.
    fn duration(&self) -> f64;

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback position.
    fn set_current_time(&mut self, secs: f64);

    fn is_paused(&self) -> bool;

    /// Whether playback ran off the end of the media.
    fn is_ended(&self) -> bool;

    fn play(&mut self);

    fn pause(&mut self);

    fn set_volume(&mut self, level: f64);

    fn set_muted(&mut self, muted: bool);

    fn set_playback_rate(&mut self, rate: f64);
}

/// Persisted player settings the engine reports changes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    Volume,
    PlaybackRate,
    AuxVolumeA,
    AuxVolumeB,
    NavPanelVisible,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Volume => "volume",
            SettingKey::PlaybackRate => "playback_rate",
            SettingKey::AuxVolumeA => "aux_volume_a",
            SettingKey::AuxVolumeB => "aux_volume_b",
            SettingKey::NavPanelVisible => "nav_panel_visible",
        }
    }
}

/// Value written for a [`SettingKey`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Number(f64),
    Flag(bool),
}

/// Abstract persistence hook. Implementations own storage and retries.
pub trait SettingsSink {
    fn persist(&mut self, key: SettingKey, value: SettingValue);
}

impl<T: SettingsSink + ?Sized> SettingsSink for &mut T {
    fn persist(&mut self, key: SettingKey, value: SettingValue) {
        (**self).persist(key, value);
    }
}

/// Sink that records every persisted value in order.
#[derive(Debug, Default)]
pub struct MemorySettings {
    writes: Vec<(SettingKey, SettingValue)>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes, oldest first.
    pub fn writes(&self) -> &[(SettingKey, SettingValue)] {
        &self.writes
    }

    /// Most recent value written for `key`.
    pub fn last(&self, key: SettingKey) -> Option<SettingValue> {
        self.writes
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

impl SettingsSink for MemorySettings {
    fn persist(&mut self, key: SettingKey, value: SettingValue) {
        self.writes.push((key, value));
    }
}

/// Sink that folds persisted values into [`PlayerDefaults`], ready to be
/// saved with the rest of the application config.
#[derive(Debug, Clone)]
pub struct DefaultsSink {
    defaults: PlayerDefaults,
    dirty: bool,
}

impl DefaultsSink {
    pub fn new(defaults: PlayerDefaults) -> Self {
        Self {
            defaults,
            dirty: false,
        }
    }

    pub fn defaults(&self) -> &PlayerDefaults {
        &self.defaults
    }

    /// Whether any value changed since creation.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn into_defaults(self) -> PlayerDefaults {
        self.defaults
    }
}

impl SettingsSink for DefaultsSink {
    fn persist(&mut self, key: SettingKey, value: SettingValue) {
        match (key, value) {
            (SettingKey::Volume, SettingValue::Number(v)) => self.defaults.volume = v,
            (SettingKey::PlaybackRate, SettingValue::Number(v)) => self.defaults.playback_rate = v,
            (SettingKey::AuxVolumeA, SettingValue::Number(v)) => self.defaults.aux_volume_a = v,
            (SettingKey::AuxVolumeB, SettingValue::Number(v)) => self.defaults.aux_volume_b = v,
            (SettingKey::NavPanelVisible, SettingValue::Flag(v)) => {
                self.defaults.nav_panel_visible = v
            }
            (key, value) => {
                tracing::warn!(key = key.as_str(), ?value, "Ignoring mistyped setting");
                return;
            }
        }
        self.dirty = true;
        tracing::debug!(key = key.as_str(), ?value, "Setting persisted");
    }
}

/// In-memory player that advances its cursor on demand.
///
/// Used for headless replay and for tests; behaves like a media element
/// that ends (and pauses) when the cursor reaches the duration.
#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    duration: f64,
    current_time: f64,
    paused: bool,
    ended: bool,
    volume: f64,
    muted: bool,
    rate: f64,
}

impl SimulatedPlayer {
    /// A paused player at position zero.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            current_time: 0.0,
            paused: true,
            ended: false,
            volume: 1.0,
            muted: false,
            rate: 1.0,
        }
    }

    /// Advance playback by `secs` of wall time, scaled by the rate.
    pub fn advance(&mut self, secs: f64) {
        if self.paused || self.ended {
            return;
        }
        self.current_time += secs.max(0.0) * self.rate;
        if self.current_time >= self.duration {
            self.current_time = self.duration;
            self.ended = true;
            self.paused = true;
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn playback_rate(&self) -> f64 {
        self.rate
    }
}

impl MediaPlayer for SimulatedPlayer {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, secs: f64) {
        self.current_time = secs.clamp(0.0, self.duration.max(0.0));
        self.ended = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_ended(&self) -> bool {
        self.ended
    }

    fn play(&mut self) {
        if self.ended {
            self.current_time = 0.0;
            self.ended = false;
        }
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn set_volume(&mut self, level: f64) {
        self.volume = level;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_player_ends_at_duration() {
        let mut player = SimulatedPlayer::new(10.0);
        player.advance(5.0);
        assert_eq!(player.current_time(), 0.0);

        player.play();
        player.set_playback_rate(2.0);
        player.advance(3.0);
        assert_eq!(player.current_time(), 6.0);

        player.advance(10.0);
        assert_eq!(player.current_time(), 10.0);
        assert!(player.is_ended());
        assert!(player.is_paused());

        player.play();
        assert_eq!(player.current_time(), 0.0);
        assert!(!player.is_ended());
    }

    #[test]
    fn test_memory_settings_last_write_wins() {
        let mut sink = MemorySettings::new();
        sink.persist(SettingKey::Volume, SettingValue::Number(0.2));
        sink.persist(SettingKey::Volume, SettingValue::Number(0.6));
        assert_eq!(sink.writes().len(), 2);
        assert_eq!(
            sink.last(SettingKey::Volume),
            Some(SettingValue::Number(0.6))
        );
        assert_eq!(sink.last(SettingKey::PlaybackRate), None);
    }

    #[test]
    fn test_defaults_sink_updates_player_defaults() {
        let mut sink = DefaultsSink::new(PlayerDefaults::default());
        assert!(!sink.is_dirty());

        sink.persist(SettingKey::PlaybackRate, SettingValue::Number(2.0));
        sink.persist(SettingKey::NavPanelVisible, SettingValue::Flag(false));
        sink.persist(SettingKey::Volume, SettingValue::Flag(true));

        let defaults = sink.into_defaults();
        assert_eq!(defaults.playback_rate, 2.0);
        assert!(!defaults.nav_panel_visible);
        assert_eq!(defaults.volume, 1.0);
    }
}

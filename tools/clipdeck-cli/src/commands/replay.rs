//! Replay a JSONL interaction script against a simulated player.
//!
//! Each non-blank, non-`#` line is an input event. One extra directive is
//! understood: `{"type":"advance","secs":2.5}` lets simulated playback run
//! for that long, firing indicator frames as it goes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use clipdeck_common::config::AppConfig;
use clipdeck_common::error::{ClipdeckError, ClipdeckResult};
use clipdeck_player_sync::{
    Control, ControlBounds, DefaultsSink, DragState, IndicatorOffsets, InputEvent, MediaPlayer,
    NavigationEngine, SimulatedPlayer,
};
use clipdeck_timeline_model::ClipRange;

#[derive(Deserialize)]
struct Advance {
    secs: f64,
}

#[derive(Serialize)]
struct ReplayReport<'a> {
    events: usize,
    changed: usize,
    cursor: f64,
    playing: bool,
    window: (f64, f64),
    clip: Option<ClipRange>,
    playback_rate: f64,
    volume: f64,
    muted: bool,
    drag: DragState,
    offsets: &'a IndicatorOffsets,
}

pub fn run(
    script: PathBuf,
    duration: f64,
    width: f64,
    config: AppConfig,
    save: bool,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    if !script.exists() {
        return Err(ClipdeckError::FileNotFound { path: script }.into());
    }
    let content = std::fs::read_to_string(&script)?;

    let frame_dt = 1.0 / config.player.frame_rate_hz.max(1) as f64;
    let sink = DefaultsSink::new(config.player.clone());
    let mut engine = NavigationEngine::new(SimulatedPlayer::new(duration), sink, &config.player)?;
    for control in Control::ALL {
        engine.set_bounds(control, ControlBounds::new(0.0, width));
    }

    let mut events = 0;
    let mut changed = 0;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let value: serde_json::Value = serde_json::from_str(line)
            .map_err(|e| ClipdeckError::script(line_no, e.to_string()))?;

        if value.get("type").and_then(|t| t.as_str()) == Some("advance") {
            let secs = parse_advance(line_no, value)?;
            let frames = advance_playback(&mut engine, secs, frame_dt);
            tracing::debug!(line = line_no, secs, frames, "Advanced playback");
            continue;
        }

        let event: InputEvent = serde_json::from_value(value)
            .map_err(|e| ClipdeckError::script(line_no, e.to_string()))?;
        events += 1;
        if engine.handle(&event) {
            changed += 1;
        }
        tracing::debug!(line = line_no, ?event, drag = ?engine.drag_state(), "Event applied");
    }

    let report = ReplayReport {
        events,
        changed,
        cursor: engine.cursor(),
        playing: engine.is_playing(),
        window: (engine.window().start(), engine.window().end()),
        clip: engine.clip_range(),
        playback_rate: engine.rate().multiplier(),
        volume: engine.volume(),
        muted: engine.is_muted(),
        drag: engine.drag_state(),
        offsets: engine.offsets(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if save {
        if engine.settings().is_dirty() {
            let defaults = engine.settings().defaults().clone();
            let config = AppConfig {
                player: defaults,
                ..config
            };
            match &config_path {
                Some(path) => config.save_to(path)?,
                None => config.save()?,
            }
            tracing::info!("Player settings saved");
        } else {
            tracing::info!("No player settings changed");
        }
    }

    Ok(())
}

fn parse_advance(line_no: usize, value: serde_json::Value) -> ClipdeckResult<f64> {
    let advance: Advance =
        serde_json::from_value(value).map_err(|e| ClipdeckError::script(line_no, e.to_string()))?;
    if !advance.secs.is_finite() || advance.secs < 0.0 {
        return Err(ClipdeckError::script(
            line_no,
            format!("advance needs a non-negative duration, got {}", advance.secs),
        ));
    }
    Ok(advance.secs)
}

/// Run simulated playback for up to `secs`, one frame at a time.
///
/// Stops early once the player is no longer playing. Returns the number of
/// frames stepped.
fn advance_playback(
    engine: &mut NavigationEngine<SimulatedPlayer, DefaultsSink>,
    secs: f64,
    frame_dt: f64,
) -> u64 {
    // Saturating float-to-int cast bounds the loop for huge `secs`.
    let total = (secs / frame_dt).ceil() as u64;
    let mut frames = 0;

    while frames < total && engine.is_playing() {
        let dt = (secs - frames as f64 * frame_dt).clamp(0.0, frame_dt);
        frames += 1;

        let was_ended = engine.player().is_ended();
        engine.player_mut().advance(dt);
        if !was_ended && engine.player().is_ended() {
            engine.on_ended();
        }

        match engine.pending_frame() {
            Some(ticket) => {
                engine.on_animation_frame(ticket);
            }
            None => {
                engine.on_time_update();
            }
        }
    }
    frames
}

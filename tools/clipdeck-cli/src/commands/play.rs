//! Simulate real-time playback and print indicator updates.

use std::time::Instant;

use clipdeck_common::clock::FrameClock;
use clipdeck_common::config::AppConfig;
use clipdeck_common::error::ClipdeckError;
use clipdeck_player_sync::{
    Control, ControlBounds, FrameOutcome, MediaPlayer, MemorySettings, NavigationEngine,
    SimulatedPlayer,
};
use clipdeck_timeline_model::format_duration;

/// Track width used for the printed pixel offsets.
const TRACK_WIDTH_PX: f64 = 1000.0;

pub async fn run(
    duration: f64,
    from: f64,
    clip: bool,
    limit: f64,
    rate: Option<f64>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    if let Some(rate) = rate {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ClipdeckError::config(format!("Invalid playback rate: {rate}")).into());
        }
    }

    let mut player = SimulatedPlayer::new(duration);
    player.set_current_time(from);
    let mut engine = NavigationEngine::new(player, MemorySettings::new(), &config.player)?;
    for control in Control::ALL {
        engine.set_bounds(control, ControlBounds::new(0.0, TRACK_WIDTH_PX));
    }
    if let Some(rate) = rate {
        engine.set_playback_rate(rate);
    }
    if clip {
        engine.toggle_clip(true);
    }

    let bound = engine.active_bound();
    println!(
        "Playing {} - {} ({:?} bound) at {}",
        format_duration(bound.start),
        format_duration(bound.end),
        bound.kind,
        engine.offsets().rate_label
    );
    println!("Press Ctrl+C to stop...");
    println!();

    engine.play();

    let mut clock = FrameClock::new(config.player.frame_rate_hz);
    let mut interval = tokio::time::interval(clock.interval());
    let started = Instant::now();
    let mut last_label = String::new();

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                engine.pause();
                println!();
                println!("Stopped at {}", engine.offsets().cursor_label);
                break;
            }
        }

        let now = Instant::now();
        let elapsed = clock.tick(now);
        let was_ended = engine.player().is_ended();
        engine.player_mut().advance(elapsed);
        if !was_ended && engine.player().is_ended() {
            engine.on_ended();
        }

        let Some(ticket) = engine.pending_frame() else {
            println!("Playback stopped at {}", engine.offsets().cursor_label);
            break;
        };
        let outcome = engine.on_animation_frame(ticket);

        let offsets = engine.offsets();
        if offsets.cursor_label != last_label {
            last_label.clone_from(&offsets.cursor_label);
            let timeline = offsets
                .timeline_px
                .map(|px| format!("{px:>7.1}px"))
                .unwrap_or_else(|| "      -".to_string());
            println!(
                "  {:>8}  seek {:>7.1}px  timeline {timeline}",
                offsets.cursor_label, offsets.seek_px
            );
        }

        if outcome == FrameOutcome::Stopped {
            println!("Playback stopped at {}", engine.offsets().cursor_label);
            break;
        }
        if now.duration_since(started).as_secs_f64() >= limit {
            engine.pause();
            println!("Time limit reached at {}", engine.offsets().cursor_label);
            break;
        }
    }

    tracing::debug!(cursor = engine.cursor(), "Playback simulation finished");
    Ok(())
}

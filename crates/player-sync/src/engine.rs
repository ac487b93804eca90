//! The navigation engine: one authoritative playback cursor, many
//! mirrored controls.
//!
//! All mutation happens synchronously inside input handlers or inside a
//! fired frame; nothing here blocks, sleeps, or performs I/O. Numeric
//! input is clamped, never rejected.

use serde::Serialize;

use clipdeck_common::config::PlayerDefaults;
use clipdeck_common::error::ClipdeckResult;
use clipdeck_timeline_model::{
    format_duration, ClipRange, ClipSelection, MediaDuration, PlaybackRateMapper, TickLayout,
    TimelineWindow, ZoomDirection,
};

use crate::control::{Control, DragState, HoverFlags};
use crate::frame::{FrameLoop, FrameOutcome, FrameTicket};
use crate::input::{InputEvent, KeyCommand};
use crate::layout::{ControlBounds, ControlLayout, IndicatorOffsets};
use crate::media::{MediaPlayer, SettingKey, SettingValue, SettingsSink};

/// Which range currently constrains the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundKind {
    Window,
    Clip,
}

/// The valid cursor range: the clip while clip mode is on, else the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CursorBound {
    pub start: f64,
    pub end: f64,
    pub kind: BoundKind,
}

impl CursorBound {
    /// Both ends inclusive; playback sitting exactly on the end is valid.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    pub fn clamp(&self, time: f64) -> f64 {
        time.clamp(self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Levels {
    volume: f64,
    aux_volume_a: f64,
    aux_volume_b: f64,
    muted: bool,
}

/// Keeps every player control mirrored to the media player's cursor.
pub struct NavigationEngine<P, S> {
    player: P,
    settings: S,
    window: TimelineWindow,
    clip: ClipSelection,
    rate: PlaybackRateMapper,
    levels: Levels,
    drag: DragState,
    hover: HoverFlags,
    layout: ControlLayout,
    frames: FrameLoop,
    offsets: IndicatorOffsets,
    nav_panel_visible: bool,
    seek_step_secs: f64,
    volume_step: f64,
}

impl<P: MediaPlayer, S: SettingsSink> NavigationEngine<P, S> {
    /// Build an engine once the player's metadata is ready.
    ///
    /// Persisted defaults are read once here and pushed into the player.
    pub fn new(player: P, settings: S, defaults: &PlayerDefaults) -> ClipdeckResult<Self> {
        let duration = MediaDuration::new(player.duration())?;
        let defaults = defaults.clone().sanitized();

        let mut engine = Self {
            player,
            settings,
            window: TimelineWindow::new(duration),
            clip: ClipSelection::new(),
            rate: PlaybackRateMapper::from_multiplier(defaults.playback_rate),
            levels: Levels {
                volume: defaults.volume,
                aux_volume_a: defaults.aux_volume_a,
                aux_volume_b: defaults.aux_volume_b,
                muted: false,
            },
            drag: DragState::Idle,
            hover: HoverFlags::default(),
            layout: ControlLayout::default(),
            frames: FrameLoop::new(),
            offsets: IndicatorOffsets::default(),
            nav_panel_visible: defaults.nav_panel_visible,
            seek_step_secs: defaults.seek_step_secs,
            volume_step: defaults.volume_step,
        };

        engine.push_player_settings();
        if engine.is_playing() {
            engine.frames.arm();
        }
        engine.refresh_offsets();

        tracing::info!(
            duration = duration.secs(),
            rate = engine.rate.multiplier(),
            "Navigation engine ready"
        );
        Ok(engine)
    }

    /// New media finished loading: rebuild the window and drop the clip,
    /// any drag, and the frame loop.
    pub fn load_media(&mut self) -> ClipdeckResult<()> {
        let duration = MediaDuration::new(self.player.duration())?;

        self.window = TimelineWindow::new(duration);
        self.clip = ClipSelection::new();
        self.drag = DragState::Idle;
        self.frames.cancel();

        self.push_player_settings();
        if self.is_playing() {
            self.frames.arm();
        }
        self.refresh_offsets();

        tracing::info!(duration = duration.secs(), "Media loaded");
        Ok(())
    }

    fn push_player_settings(&mut self) {
        self.player.set_volume(self.levels.volume);
        self.player.set_muted(self.levels.muted);
        self.player.set_playback_rate(self.rate.multiplier());
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Mutable access for the host driving the player (e.g. advancing a
    /// simulated clock). Call the matching `on_*` notification afterwards.
    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn window(&self) -> &TimelineWindow {
        &self.window
    }

    pub fn clip(&self) -> &ClipSelection {
        &self.clip
    }

    /// Export range, if clip mode is on.
    pub fn clip_range(&self) -> Option<ClipRange> {
        self.clip.range()
    }

    pub fn rate(&self) -> &PlaybackRateMapper {
        &self.rate
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn hover(&self) -> &HoverFlags {
        &self.hover
    }

    pub fn layout(&self) -> &ControlLayout {
        &self.layout
    }

    /// Latest indicator positions for the rendering layer.
    pub fn offsets(&self) -> &IndicatorOffsets {
        &self.offsets
    }

    pub fn cursor(&self) -> f64 {
        self.player.current_time()
    }

    pub fn volume(&self) -> f64 {
        self.levels.volume
    }

    pub fn aux_volume_a(&self) -> f64 {
        self.levels.aux_volume_a
    }

    pub fn aux_volume_b(&self) -> f64 {
        self.levels.aux_volume_b
    }

    pub fn is_muted(&self) -> bool {
        self.levels.muted
    }

    pub fn nav_panel_visible(&self) -> bool {
        self.nav_panel_visible
    }

    pub fn is_playing(&self) -> bool {
        !self.player.is_paused() && !self.player.is_ended()
    }

    /// The range the cursor must stay inside.
    pub fn active_bound(&self) -> CursorBound {
        match self.clip.range() {
            Some(range) => CursorBound {
                start: range.start,
                end: range.end,
                kind: BoundKind::Clip,
            },
            None => CursorBound {
                start: self.window.start(),
                end: self.window.end(),
                kind: BoundKind::Window,
            },
        }
    }

    /// Tick marks for the timeline track at its current width.
    pub fn ticks(&self) -> TickLayout {
        TickLayout::new(&self.window, self.layout.timeline.width)
    }

    /// The frame the host should fire next, if the sync loop is running.
    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.frames.pending()
    }

    /// Replace all control geometry (after a resize or panel toggle).
    pub fn set_layout(&mut self, layout: ControlLayout) {
        self.layout = layout;
        self.refresh_offsets();
    }

    /// Replace the geometry of one control track.
    pub fn set_bounds(&mut self, control: Control, bounds: ControlBounds) {
        self.layout.set_bounds(control, bounds);
        self.refresh_offsets();
    }

    /// Route one input event. Returns whether it changed any state.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { control, x } => self.pointer_down(*control, *x),
            InputEvent::PointerMove { x } => self.pointer_move(*x),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::Wheel {
                control,
                x,
                delta_y,
            } => self.wheel(*control, *x, *delta_y),
            InputEvent::Hover { control, hovered } => {
                self.set_hovered(*control, *hovered);
                true
            }
            InputEvent::Key { code } => self.key(code),
            InputEvent::ToggleClip { on } => self.toggle_clip(*on),
            InputEvent::TogglePlay => self.toggle_play(),
            InputEvent::NavPanel { visible } => self.set_nav_panel_visible(*visible),
        }
    }

    /// Start dragging `control`. Any drag already in progress is finished
    /// first, so two drags are never active together.
    pub fn pointer_down(&mut self, control: Control, x: f64) -> bool {
        if self.drag.is_active() {
            self.pointer_up();
        }
        if control.on_nav_panel() && !self.nav_panel_visible {
            return false;
        }
        if matches!(control, Control::ClipLeft | Control::ClipRight) && !self.clip.is_active() {
            return false;
        }

        let was_paused = self.player.is_paused();
        if control.scrubs() {
            self.player.pause();
        }
        self.frames.cancel();
        self.drag = DragState::begin(control, was_paused);
        tracing::debug!(?control, was_paused, "Drag started");

        self.pointer_move(x);
        true
    }

    /// Apply the pointer position to whichever control is being dragged.
    pub fn pointer_move(&mut self, x: f64) -> bool {
        let Some(control) = self.drag.control() else {
            return false;
        };
        let fraction = self.layout.bounds_for(control).fraction_at(x);

        match self.drag {
            DragState::Idle => return false,
            DragState::Seek { .. } => {
                let time = fraction * self.window.media_duration();
                self.player.set_current_time(time);
            }
            DragState::Timeline { .. } => {
                let time = self.window.time_at(fraction);
                self.player.set_current_time(time);
            }
            DragState::ClipLeft => {
                let time = self.window.time_at(fraction);
                self.clip.set_left(time, &self.window);
            }
            DragState::ClipRight => {
                let time = self.window.time_at(fraction);
                self.clip.set_right(time, &self.window);
            }
            DragState::Volume => {
                self.levels.volume = fraction;
                self.player.set_volume(fraction);
            }
            DragState::Rate => {
                let multiplier = self.rate.set_from_fraction(fraction);
                self.player.set_playback_rate(multiplier);
            }
            DragState::AuxVolumeA => self.levels.aux_volume_a = fraction,
            DragState::AuxVolumeB => self.levels.aux_volume_b = fraction,
        }

        self.refresh_offsets();
        true
    }

    /// Finish the current drag, wherever the pointer was released.
    pub fn pointer_up(&mut self) -> bool {
        let finished = std::mem::take(&mut self.drag);

        match finished {
            DragState::Idle => return false,
            DragState::Seek { was_paused } | DragState::Timeline { was_paused } => {
                let snapped = self.enforce_bound();
                if !snapped && !was_paused {
                    self.player.play();
                }
            }
            released => {
                self.persist_released(released);
                // The window or clip may have moved under the drag.
                self.enforce_bound();
            }
        }

        if self.is_playing() {
            self.frames.ensure_armed();
        }
        self.refresh_offsets();
        tracing::debug!(drag = ?finished, cursor = self.cursor(), "Drag ended");
        true
    }

    fn persist_released(&mut self, released: DragState) {
        let (key, value) = match released {
            DragState::Volume => (SettingKey::Volume, self.levels.volume),
            DragState::Rate => (SettingKey::PlaybackRate, self.rate.multiplier()),
            DragState::AuxVolumeA => (SettingKey::AuxVolumeA, self.levels.aux_volume_a),
            DragState::AuxVolumeB => (SettingKey::AuxVolumeB, self.levels.aux_volume_b),
            DragState::Idle
            | DragState::Seek { .. }
            | DragState::Timeline { .. }
            | DragState::ClipLeft
            | DragState::ClipRight => return,
        };
        self.persist(key, SettingValue::Number(value));
    }

    /// Wheel over the timeline zooms; over a slider it nudges the value.
    pub fn wheel(&mut self, control: Control, x: f64, delta_y: f64) -> bool {
        if control.on_nav_panel() {
            if !self.nav_panel_visible {
                return false;
            }
            let Some(direction) = ZoomDirection::from_wheel_delta(delta_y) else {
                return false;
            };
            let pct = self.layout.timeline.fraction_at(x);
            return self.zoom(pct, direction);
        }

        match KeyCommand::from_wheel_delta(delta_y) {
            Some(command) => self.apply_command(control, command),
            None => false,
        }
    }

    pub fn set_hovered(&mut self, control: Control, hovered: bool) {
        self.hover.set(control, hovered);
    }

    /// Route a shortcut key to the hovered control.
    pub fn key(&mut self, code: &str) -> bool {
        let Some(command) = KeyCommand::from_code(code) else {
            return false;
        };
        let Some(target) = self.hover.target() else {
            return false;
        };
        self.apply_command(target, command)
    }

    fn apply_command(&mut self, control: Control, command: KeyCommand) -> bool {
        use KeyCommand::*;

        match (control, command) {
            (Control::Seek | Control::Timeline, Increase) => self.nudge_cursor(self.seek_step_secs),
            (Control::Seek | Control::Timeline, Decrease) => {
                self.nudge_cursor(-self.seek_step_secs)
            }
            (Control::Seek | Control::Timeline, JumpToStart) => {
                if self.drag.is_active() {
                    return false;
                }
                let start = self.active_bound().start;
                self.player.set_current_time(start);
                self.refresh_offsets();
                true
            }
            (Control::ClipLeft | Control::ClipRight, Increase | Decrease) => {
                let step = self.window.tick_sub_interval() as f64;
                let delta = if command == Increase { step } else { -step };
                self.nudge_clip(control, delta)
            }
            (Control::Volume | Control::AuxVolumeA | Control::AuxVolumeB, Increase) => {
                let level = self.level(control) + self.volume_step;
                self.set_level(control, level)
            }
            (Control::Volume | Control::AuxVolumeA | Control::AuxVolumeB, Decrease) => {
                let level = self.level(control) - self.volume_step;
                self.set_level(control, level)
            }
            (Control::Volume, ToggleMute) => {
                self.toggle_mute();
                true
            }
            (Control::Rate, Increase) => {
                self.rate.increment();
                self.commit_rate()
            }
            (Control::Rate, Decrease) => {
                self.rate.decrement();
                self.commit_rate()
            }
            (Control::Rate, Reset) => {
                self.reset_playback_rate();
                true
            }
            (Control::Timeline, Reset) => {
                if !self.nav_panel_visible || !self.window.can_zoom_out() {
                    return false;
                }
                self.reset_zoom();
                true
            }
            _ => false,
        }
    }

    fn nudge_cursor(&mut self, delta: f64) -> bool {
        if self.drag.is_active() {
            return false;
        }
        let target = self.active_bound().clamp(self.cursor() + delta);
        self.player.set_current_time(target);
        self.refresh_offsets();
        true
    }

    fn nudge_clip(&mut self, control: Control, delta: f64) -> bool {
        let Some(range) = self.clip.range() else {
            return false;
        };
        if !self.nav_panel_visible || self.drag.is_active() {
            return false;
        }
        if control == Control::ClipLeft {
            self.clip.set_left(range.start + delta, &self.window);
        } else {
            self.clip.set_right(range.end + delta, &self.window);
        }
        self.enforce_bound();
        self.refresh_offsets();
        true
    }

    fn level(&self, control: Control) -> f64 {
        match control {
            Control::AuxVolumeA => self.levels.aux_volume_a,
            Control::AuxVolumeB => self.levels.aux_volume_b,
            _ => self.levels.volume,
        }
    }

    /// Set a volume-type control and persist it. Non-level controls are
    /// ignored.
    pub fn set_level(&mut self, control: Control, level: f64) -> bool {
        if !level.is_finite() {
            return false;
        }
        let level = level.clamp(0.0, 1.0);
        let key = match control {
            Control::Volume => {
                self.levels.volume = level;
                self.player.set_volume(level);
                SettingKey::Volume
            }
            Control::AuxVolumeA => {
                self.levels.aux_volume_a = level;
                SettingKey::AuxVolumeA
            }
            Control::AuxVolumeB => {
                self.levels.aux_volume_b = level;
                SettingKey::AuxVolumeB
            }
            _ => return false,
        };
        self.persist(key, SettingValue::Number(level));
        self.refresh_offsets();
        true
    }

    pub fn toggle_mute(&mut self) {
        self.levels.muted = !self.levels.muted;
        self.player.set_muted(self.levels.muted);
        tracing::debug!(muted = self.levels.muted, "Mute toggled");
    }

    /// Snap a multiplier to the nearest rate step, apply and persist it.
    pub fn set_playback_rate(&mut self, multiplier: f64) {
        self.rate = PlaybackRateMapper::from_multiplier(multiplier);
        self.commit_rate();
    }

    /// Restore normal speed.
    pub fn reset_playback_rate(&mut self) {
        self.rate.reset();
        self.commit_rate();
    }

    fn commit_rate(&mut self) -> bool {
        let multiplier = self.rate.multiplier();
        self.player.set_playback_rate(multiplier);
        self.persist(SettingKey::PlaybackRate, SettingValue::Number(multiplier));
        self.refresh_offsets();
        tracing::debug!(step = self.rate.step(), multiplier, "Playback rate changed");
        true
    }

    /// Zoom the timeline one step anchored at `pointer_pct`.
    pub fn zoom(&mut self, pointer_pct: f64, direction: ZoomDirection) -> bool {
        if !self.window.zoom(pointer_pct, direction) {
            return false;
        }
        self.clip.reconcile(&self.window);
        self.enforce_bound();
        self.refresh_offsets();
        true
    }

    /// Show the whole media item again.
    pub fn reset_zoom(&mut self) {
        self.window.reset();
        self.clip.reconcile(&self.window);
        self.refresh_offsets();
        tracing::debug!(end = self.window.end(), "Timeline zoom reset");
    }

    /// Turn clip mode on (centered on the cursor) or off.
    pub fn toggle_clip(&mut self, on: bool) -> bool {
        if self.clip.is_active() == on {
            return false;
        }
        if !on && matches!(self.drag, DragState::ClipLeft | DragState::ClipRight) {
            self.drag = DragState::Idle;
        }
        let cursor = self.cursor();
        self.clip.toggle(on, cursor, &self.window);
        if !self.enforce_bound() && self.is_playing() && !self.drag.is_active() {
            self.frames.ensure_armed();
        }
        self.refresh_offsets();
        true
    }

    /// Show or hide the navigation panel and persist the choice.
    pub fn set_nav_panel_visible(&mut self, visible: bool) -> bool {
        if self.nav_panel_visible == visible {
            return false;
        }
        if !visible && self.drag.control().is_some_and(Control::on_nav_panel) {
            self.pointer_up();
        }
        self.nav_panel_visible = visible;
        self.persist(SettingKey::NavPanelVisible, SettingValue::Flag(visible));
        tracing::debug!(visible, "Navigation panel toggled");
        true
    }

    /// Start playback. A cursor parked on or past the end of its bound
    /// restarts from the bound's start.
    pub fn play(&mut self) {
        if self.drag.is_scrubbing() {
            return;
        }
        let bound = self.active_bound();
        let cursor = self.cursor();
        if self.player.is_ended() || !bound.contains(cursor) || cursor >= bound.end {
            self.player.set_current_time(bound.start);
        }
        self.player.play();
        self.on_play();
    }

    pub fn pause(&mut self) {
        self.player.pause();
        self.on_pause();
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.drag.is_scrubbing() {
            return false;
        }
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
        true
    }

    /// The player started playing.
    pub fn on_play(&mut self) {
        if !self.drag.is_active() && self.is_playing() {
            self.frames.ensure_armed();
            tracing::trace!("Frame loop armed");
        }
    }

    /// The player paused.
    pub fn on_pause(&mut self) {
        if self.frames.cancel() {
            tracing::trace!("Frame loop cancelled");
        }
        self.refresh_cursor_indicators();
    }

    /// The player ran off the end of the media.
    pub fn on_ended(&mut self) {
        self.on_pause();
    }

    /// The player reported progress outside a frame (e.g. a time update
    /// event). Returns whether the cursor was snapped back.
    pub fn on_time_update(&mut self) -> bool {
        let snapped = self.enforce_bound();
        self.refresh_cursor_indicators();
        snapped
    }

    /// Run one frame of the sync loop.
    ///
    /// Refreshes the cursor indicators and re-arms the next frame only
    /// while playback continues and no drag is in progress.
    pub fn on_animation_frame(&mut self, ticket: FrameTicket) -> FrameOutcome {
        if !self.frames.fire(ticket) {
            return FrameOutcome::Stale;
        }
        if self.drag.is_active() {
            return FrameOutcome::Stopped;
        }

        let snapped = self.enforce_bound();
        self.refresh_cursor_indicators();
        if snapped || !self.is_playing() {
            return FrameOutcome::Stopped;
        }

        self.frames.arm();
        FrameOutcome::Rearmed
    }

    /// Snap an out-of-bound cursor to the lower bound and pause.
    /// Suspended while any drag is in progress.
    fn enforce_bound(&mut self) -> bool {
        if self.drag.is_active() {
            return false;
        }
        let bound = self.active_bound();
        let cursor = self.cursor();
        if bound.contains(cursor) {
            return false;
        }

        self.player.set_current_time(bound.start);
        self.player.pause();
        self.frames.cancel();
        tracing::debug!(
            cursor,
            start = bound.start,
            end = bound.end,
            kind = ?bound.kind,
            "Cursor left active bound, snapped to start"
        );
        true
    }

    fn persist(&mut self, key: SettingKey, value: SettingValue) {
        self.settings.persist(key, value);
    }

    fn refresh_cursor_indicators(&mut self) {
        let cursor = self.cursor();
        let media = self.window.media_duration();
        let seek_px = self.layout.seek.offset_of((cursor / media).clamp(0.0, 1.0));
        let timeline_px = self
            .window
            .contains(cursor)
            .then(|| self.layout.timeline.offset_of(self.window.fraction_of(cursor)));

        self.offsets.seek_px = seek_px;
        self.offsets.timeline_px = timeline_px;
        self.offsets.cursor_label = format_duration(cursor);
    }

    fn refresh_offsets(&mut self) {
        self.refresh_cursor_indicators();

        let timeline = self.layout.timeline;
        let clip_px = self.clip.range().map(|range| {
            (
                timeline.offset_of(self.window.fraction_of(range.start)),
                timeline.offset_of(self.window.fraction_of(range.end)),
            )
        });
        self.offsets.clip_left_px = clip_px.map(|(left, _)| left);
        self.offsets.clip_right_px = clip_px.map(|(_, right)| right);

        self.offsets.volume_px = self.layout.volume.offset_of(self.levels.volume);
        self.offsets.aux_volume_a_px = self.layout.aux_volume_a.offset_of(self.levels.aux_volume_a);
        self.offsets.aux_volume_b_px = self.layout.aux_volume_b.offset_of(self.levels.aux_volume_b);
        self.offsets.rate_px = self.layout.rate.offset_of(self.rate.step_fraction());
        self.offsets.rate_label = format!("{}x", self.rate.multiplier());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MemorySettings, SimulatedPlayer};

    type Engine = NavigationEngine<SimulatedPlayer, MemorySettings>;

    fn layout() -> ControlLayout {
        ControlLayout {
            seek: ControlBounds::new(0.0, 1000.0),
            timeline: ControlBounds::new(0.0, 1000.0),
            volume: ControlBounds::new(0.0, 100.0),
            rate: ControlBounds::new(0.0, 60.0),
            aux_volume_a: ControlBounds::new(0.0, 100.0),
            aux_volume_b: ControlBounds::new(0.0, 100.0),
        }
    }

    fn engine(duration: f64) -> Engine {
        let mut engine = NavigationEngine::new(
            SimulatedPlayer::new(duration),
            MemorySettings::new(),
            &PlayerDefaults::default(),
        )
        .unwrap();
        engine.set_layout(layout());
        engine
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_rejects_invalid_duration() {
        let result = NavigationEngine::new(
            SimulatedPlayer::new(f64::NAN),
            MemorySettings::new(),
            &PlayerDefaults::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_are_pushed_to_player() {
        let defaults = PlayerDefaults {
            volume: 0.3,
            playback_rate: 2.0,
            ..PlayerDefaults::default()
        };
        let engine =
            NavigationEngine::new(SimulatedPlayer::new(60.0), MemorySettings::new(), &defaults)
                .unwrap();
        assert_eq!(engine.player().volume(), 0.3);
        assert_eq!(engine.player().playback_rate(), 2.0);
        assert_eq!(engine.rate().step(), 2);
        assert!(engine.settings().writes().is_empty());
    }

    #[test]
    fn test_seek_drag_pauses_and_resumes() {
        let mut engine = engine(100.0);
        engine.play();
        assert!(engine.pending_frame().is_some());

        assert!(engine.pointer_down(Control::Seek, 250.0));
        assert_eq!(engine.drag_state(), DragState::Seek { was_paused: false });
        assert!(engine.player().is_paused());
        assert!(engine.pending_frame().is_none());
        assert!(approx(engine.cursor(), 25.0));

        engine.pointer_move(400.0);
        assert!(approx(engine.cursor(), 40.0));
        assert!(approx(engine.offsets().seek_px, 400.0));

        assert!(engine.pointer_up());
        assert_eq!(engine.drag_state(), DragState::Idle);
        assert!(engine.is_playing());
        assert!(engine.pending_frame().is_some());
    }

    #[test]
    fn test_seek_drag_from_paused_stays_paused() {
        let mut engine = engine(100.0);
        engine.pointer_down(Control::Seek, 100.0);
        engine.pointer_up();
        assert!(engine.player().is_paused());
        assert!(engine.pending_frame().is_none());
    }

    #[test]
    fn test_seek_outside_clip_snaps_and_stays_paused() {
        let mut engine = engine(100.0);
        engine.player_mut().set_current_time(50.0);
        engine.toggle_clip(true);
        assert_eq!(engine.clip_range().unwrap().start, 35.0);
        engine.play();

        engine.pointer_down(Control::Seek, 900.0);
        engine.pointer_up();

        assert!(approx(engine.cursor(), 35.0));
        assert!(engine.player().is_paused());
        assert!(engine.pending_frame().is_none());
    }

    #[test]
    fn test_clip_left_drag_clamps_to_min_length() {
        let mut engine = engine(100.0);
        engine.player_mut().set_current_time(50.0);
        engine.toggle_clip(true);

        engine.pointer_down(Control::ClipLeft, 630.0);
        let range = engine.clip_range().unwrap();
        assert!(approx(range.start, 60.0));
        assert!(approx(range.end, 65.0));
        assert!(approx(engine.offsets().clip_left_px.unwrap(), 600.0));

        // Cursor at 50 is now before the clip: snapped on release.
        engine.pointer_up();
        assert!(approx(engine.cursor(), 60.0));
    }

    #[test]
    fn test_clip_handles_ignored_without_clip_mode() {
        let mut engine = engine(100.0);
        assert!(!engine.pointer_down(Control::ClipRight, 10.0));
        assert_eq!(engine.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_volume_drag_persists_on_release_only() {
        let mut engine = engine(100.0);
        engine.pointer_down(Control::Volume, 20.0);
        engine.pointer_move(70.0);
        assert!(engine.settings().writes().is_empty());
        assert_eq!(engine.player().volume(), 0.7);

        engine.pointer_up();
        assert_eq!(
            engine.settings().last(SettingKey::Volume),
            Some(SettingValue::Number(0.7))
        );
        assert_eq!(engine.offsets().volume_px, 70.0);
    }

    #[test]
    fn test_rate_drag_snaps_to_steps() {
        let mut engine = engine(100.0);
        engine.pointer_down(Control::Rate, 0.0);
        assert_eq!(engine.player().playback_rate(), 0.2);
        engine.pointer_move(60.0);
        assert_eq!(engine.player().playback_rate(), 4.0);
        engine.pointer_up();
        assert_eq!(
            engine.settings().last(SettingKey::PlaybackRate),
            Some(SettingValue::Number(4.0))
        );
        assert_eq!(engine.offsets().rate_label, "4x");
    }

    #[test]
    fn test_aux_levels_are_independent() {
        let mut engine = engine(100.0);
        engine.pointer_down(Control::AuxVolumeB, 30.0);
        engine.pointer_up();
        assert_eq!(engine.aux_volume_b(), 0.3);
        assert_eq!(engine.aux_volume_a(), 1.0);
        assert_eq!(engine.player().volume(), 1.0);
        assert_eq!(
            engine.settings().last(SettingKey::AuxVolumeB),
            Some(SettingValue::Number(0.3))
        );
    }

    #[test]
    fn test_second_pointer_down_finishes_first_drag() {
        let mut engine = engine(100.0);
        engine.pointer_down(Control::Volume, 50.0);
        engine.pointer_down(Control::AuxVolumeA, 10.0);
        assert_eq!(engine.drag_state(), DragState::AuxVolumeA);
        assert_eq!(
            engine.settings().last(SettingKey::Volume),
            Some(SettingValue::Number(0.5))
        );
    }

    #[test]
    fn test_pointer_up_without_drag_is_noop() {
        let mut engine = engine(100.0);
        assert!(!engine.pointer_up());
        assert!(!engine.pointer_move(10.0));
    }

    #[test]
    fn test_frame_loop_follows_playback() {
        let mut engine = engine(100.0);
        assert!(engine.pending_frame().is_none());

        engine.play();
        let ticket = engine.pending_frame().unwrap();
        engine.player_mut().advance(1.5);
        assert_eq!(engine.on_animation_frame(ticket), FrameOutcome::Rearmed);
        assert!(approx(engine.offsets().seek_px, 15.0));
        assert_eq!(engine.on_animation_frame(ticket), FrameOutcome::Stale);

        let next = engine.pending_frame().unwrap();
        engine.pause();
        assert!(engine.pending_frame().is_none());
        assert_eq!(engine.on_animation_frame(next), FrameOutcome::Stale);
    }

    #[test]
    fn test_frame_stops_when_playback_ends() {
        let mut engine = engine(40.0);
        engine.play();
        let ticket = engine.pending_frame().unwrap();
        engine.player_mut().advance(100.0);
        assert_eq!(engine.on_animation_frame(ticket), FrameOutcome::Stopped);
        assert!(engine.pending_frame().is_none());
        assert_eq!(engine.offsets().cursor_label, "0:40");
    }

    #[test]
    fn test_playback_past_clip_end_snaps_and_pauses() {
        let mut engine = engine(100.0);
        engine.player_mut().set_current_time(50.0);
        engine.toggle_clip(true);
        engine.play();

        let ticket = engine.pending_frame().unwrap();
        engine.player_mut().advance(16.0);
        assert_eq!(engine.on_animation_frame(ticket), FrameOutcome::Stopped);
        assert!(approx(engine.cursor(), 35.0));
        assert!(engine.player().is_paused());
    }

    #[test]
    fn test_bound_check_suspended_while_dragging() {
        let mut engine = engine(100.0);
        engine.player_mut().set_current_time(50.0);
        engine.toggle_clip(true);

        engine.pointer_down(Control::Seek, 900.0);
        assert!(!engine.on_time_update());
        assert!(approx(engine.cursor(), 90.0));
    }

    #[test]
    fn test_zoom_reconciles_clip_and_cursor() {
        let mut engine = engine(100.0);
        engine.player_mut().set_current_time(5.0);
        engine.toggle_clip(true);
        assert_eq!(engine.clip_range().unwrap().start, 0.0);

        // Zoom at the far right: [10, 100).
        assert!(engine.wheel(Control::Timeline, 1000.0, -1.0));
        assert!(approx(engine.window().start(), 10.0));
        let range = engine.clip_range().unwrap();
        assert!(approx(range.start, 10.0));
        assert!(approx(range.end, 30.0));
        assert!(approx(engine.cursor(), 10.0));
    }

    #[test]
    fn test_keyboard_routes_to_hovered_control() {
        let mut engine = engine(100.0);
        assert!(!engine.key("ArrowUp"));

        engine.set_hovered(Control::Rate, true);
        assert!(engine.key("ArrowDown"));
        assert_eq!(engine.player().playback_rate(), 0.7);
        assert!(engine.key("KeyR"));
        assert_eq!(engine.player().playback_rate(), 1.0);

        engine.set_hovered(Control::Rate, false);
        engine.set_hovered(Control::Volume, true);
        assert!(engine.key("ArrowDown"));
        assert!(approx(engine.volume(), 0.95));
        assert!(engine.key("KeyM"));
        assert!(engine.player().is_muted());

        engine.set_hovered(Control::Volume, false);
        engine.set_hovered(Control::Timeline, true);
        assert!(engine.key("ArrowRight"));
        assert!(approx(engine.cursor(), 5.0));
        assert!(engine.key("Home"));
        assert_eq!(engine.cursor(), 0.0);
    }

    #[test]
    fn test_nav_panel_toggle_persists_and_blocks_timeline() {
        let mut engine = engine(100.0);
        assert!(engine.set_nav_panel_visible(false));
        assert!(!engine.set_nav_panel_visible(false));
        assert_eq!(
            engine.settings().last(SettingKey::NavPanelVisible),
            Some(SettingValue::Flag(false))
        );
        assert!(!engine.pointer_down(Control::Timeline, 10.0));
        assert!(!engine.wheel(Control::Timeline, 10.0, -1.0));
    }

    #[test]
    fn test_load_media_resets_navigation() {
        let mut engine = engine(100.0);
        engine.zoom(0.5, ZoomDirection::In);
        engine.toggle_clip(true);

        *engine.player_mut() = SimulatedPlayer::new(3661.0);
        engine.load_media().unwrap();
        assert_eq!(engine.window().end(), 3661.0);
        assert_eq!(engine.window().tick_interval(), 600);
        assert!(engine.clip_range().is_none());
        assert_eq!(engine.ticks().len(), 25);
    }

    #[test]
    fn test_tick_and_cursor_share_track_pixels() {
        let mut engine = engine(200.0);
        engine.set_bounds(Control::Timeline, ControlBounds::new(0.0, 500.0));
        engine.player_mut().set_current_time(100.0);
        engine.on_time_update();

        let tick = engine
            .ticks()
            .find(|t| t.offset_secs == 100.0)
            .unwrap();
        assert_eq!(Some(tick.pixel_x), engine.offsets().timeline_px);
        assert_eq!(engine.offsets().timeline_px, Some(250.0));

        let last = engine.ticks().last().unwrap();
        assert!(last.pixel_x <= 500.0);
    }

    #[test]
    fn test_reset_key_on_timeline_restores_full_window() {
        let mut engine = engine(600.0);
        engine.set_hovered(Control::Timeline, true);
        assert!(!engine.key("KeyR"));

        engine.zoom(0.5, ZoomDirection::In);
        engine.zoom(0.5, ZoomDirection::In);
        assert!(engine.window().duration() < 600.0);

        assert!(engine.key("KeyR"));
        assert_eq!(engine.window().start(), 0.0);
        assert_eq!(engine.window().end(), 600.0);
        assert_eq!(engine.window().tick_interval(), 120);
    }
}

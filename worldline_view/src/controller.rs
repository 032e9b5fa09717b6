// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scroll/zoom state machine.

use worldline_calendar::{Timestamp, clamp_to_safe};
use worldline_timing::{CubicBezier, Debounce, TimerId, TimerQueue, Tween};

use crate::drag::DragTracker;
use crate::scale::time_from_f64;
use crate::{
    DeltaMode, PointerInput, ScaleLevel, ScaleTable, ScrollBounds, ScrollSnapshot, ScrollState,
    ScrollTarget, WheelInput, ZoomAnchor, ZoomDirection,
};

/// Overscroll below this many pixels snaps to zero while decaying.
const OVERSCROLL_REST_PX: f64 = 0.5;

/// Payloads of the controller's timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ControllerTimer {
    ZoomCommit,
    /// One decay step, scheduled for `due`.
    OverscrollDecay { due: u64 },
}

/// How wheel deltas turn into discrete zoom switches.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelZoomConfig {
    /// Accumulated pixel delta that makes up one zoom switch.
    pub pixels_per_switch: f64,
    /// Pixels per line for [`DeltaMode::Line`] deltas.
    pub line_multiplier: f64,
    /// Pixels per page for [`DeltaMode::Page`] deltas.
    pub page_multiplier: f64,
}

impl Default for WheelZoomConfig {
    fn default() -> Self {
        Self {
            pixels_per_switch: 100.0,
            line_multiplier: 40.0,
            page_multiplier: 800.0,
        }
    }
}

impl WheelZoomConfig {
    /// Converts a delta in `mode` units to pixels.
    #[must_use]
    pub fn normalize(&self, delta: f64, mode: DeltaMode) -> f64 {
        if !delta.is_finite() {
            return 0.0;
        }
        match mode {
            DeltaMode::Pixel => delta,
            DeltaMode::Line => delta * self.line_multiplier,
            DeltaMode::Page => delta * self.page_multiplier,
        }
    }
}

/// Timing and feel of the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Quiet period before accumulated zoom switches commit.
    pub zoom_debounce_ms: u64,
    /// Length of programmatic scroll animations; zero snaps.
    pub scroll_animation_ms: u64,
    /// Overscroll multiplier applied per decay tick, in `[0, 1)`.
    pub overscroll_decay_factor: f64,
    /// Time between two decay ticks.
    pub overscroll_decay_interval_ms: u64,
    /// Exponent of the elastic overscroll curve.
    pub overscroll_exponent: f64,
    /// Frame interval requested while animating.
    pub frame_interval_ms: u64,
    /// Wheel zoom sensitivity.
    pub wheel_zoom: WheelZoomConfig,
    /// Easing of programmatic scroll animations.
    pub easing: CubicBezier,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            zoom_debounce_ms: 300,
            scroll_animation_ms: 300,
            overscroll_decay_factor: 0.9,
            overscroll_decay_interval_ms: 16,
            overscroll_exponent: 0.85,
            frame_interval_ms: 16,
            wheel_zoom: WheelZoomConfig::default(),
            easing: CubicBezier::SCROLL,
        }
    }
}

/// What the controller is currently doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No gesture or animation in flight. Overscroll may still be decaying.
    Idle,
    /// A pointer drag is moving the scroll.
    Dragging,
    /// Zoom switches are waiting for the debounce to commit.
    ZoomPending,
    /// A programmatic scroll is animating.
    Animating,
}

/// A committed scale level change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleChange {
    /// Level before the change.
    pub from: ScaleLevel,
    /// Level after the change.
    pub to: ScaleLevel,
}

/// Notifications produced by one [`ScrollController::tick`].
///
/// All changes since the previous tick are coalesced: at most one scroll
/// snapshot and one scale change are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerUpdate {
    /// The new scroll state, if it changed.
    pub scroll: Option<ScrollSnapshot>,
    /// The committed scale change, if any.
    pub scale: Option<ScaleChange>,
}

impl ControllerUpdate {
    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scroll.is_none() && self.scale.is_none()
    }
}

/// Single writer of the [`ScrollState`].
///
/// Input handlers only record intent; time-driven work (zoom commits,
/// overscroll decay, animation) happens in [`tick`](Self::tick), which also
/// hands out the coalesced notifications.
#[derive(Clone, Debug)]
pub struct ScrollController {
    config: ControllerConfig,
    scale: ScaleTable,
    max_time: f64,
    state: ScrollState,
    viewport_width: f64,
    selected_time: Option<Timestamp>,
    drag: DragTracker,
    pending_switches: i32,
    zoom_anchor: ZoomAnchor,
    timers: TimerQueue<ControllerTimer>,
    zoom_debounce: Debounce,
    decay_timer: Option<TimerId>,
    wheel_remainder: f64,
    animation: Option<Tween>,
    pending_scale: Option<ScaleChange>,
    last_emitted: ScrollSnapshot,
    last_tick: u64,
}

impl ScrollController {
    /// Creates a controller at `initial_level` with time zero at x = 0.
    ///
    /// `max_time` is the largest representable time magnitude and sets the
    /// scroll bounds.
    #[must_use]
    pub fn new(
        scale: ScaleTable,
        max_time: Timestamp,
        initial_level: ScaleLevel,
        config: ControllerConfig,
    ) -> Self {
        let state = ScrollState {
            scroll_pixels: 0.0,
            scale_level: scale.clamp(initial_level),
            overscroll_pixels: 0.0,
        };
        let mut controller = Self {
            config,
            scale,
            max_time: max_time.unsigned_abs() as f64,
            state,
            viewport_width: 0.0,
            selected_time: None,
            drag: DragTracker::default(),
            pending_switches: 0,
            zoom_anchor: ZoomAnchor::Selection,
            timers: TimerQueue::new(),
            zoom_debounce: Debounce::new(config.zoom_debounce_ms),
            decay_timer: None,
            wheel_remainder: 0.0,
            animation: None,
            pending_scale: None,
            last_emitted: ScrollSnapshot {
                scroll_pixels: 0.0,
                displayed_scroll: 0.0,
                overscroll_pixels: 0.0,
                scale_level: state.scale_level,
                time_per_pixel: 0.0,
                viewport_width: 0.0,
            },
            last_tick: 0,
        };
        controller.last_emitted = controller.snapshot();
        controller
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The scale table in use.
    #[must_use]
    pub fn scale(&self) -> &ScaleTable {
        &self.scale
    }

    /// Replaces the scale table and time range, e.g. after a calendar change.
    ///
    /// The level and scroll are clamped into the new ranges; a level change is
    /// reported by the next tick.
    pub fn set_scale(&mut self, scale: ScaleTable, max_time: Timestamp) {
        self.scale = scale;
        self.max_time = max_time.unsigned_abs() as f64;
        let from = self.state.scale_level;
        let to = scale.clamp(from);
        if from != to {
            self.state.scale_level = to;
            self.record_scale_change(from, to);
        }
        self.state.scroll_pixels = self.bounds().clamp(self.state.scroll_pixels);
        self.animation = None;
    }

    /// The raw state.
    #[must_use]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Current phase of the state machine.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.drag.is_dragging() {
            Phase::Dragging
        } else if self.animation.is_some() {
            Phase::Animating
        } else if self.pending_switches != 0 && self.zoom_debounce.is_pending() {
            Phase::ZoomPending
        } else {
            Phase::Idle
        }
    }

    /// Milliseconds per pixel at the current level.
    #[must_use]
    pub fn time_per_pixel(&self) -> f64 {
        self.scale.time_per_pixel(self.state.scale_level)
    }

    /// Scroll bounds at the current level.
    #[must_use]
    pub fn bounds(&self) -> ScrollBounds {
        ScrollBounds::for_max_time(self.max_time, self.time_per_pixel())
    }

    /// Viewport width in pixels.
    #[must_use]
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Sets the viewport width. Returns `true` if it changed.
    pub fn set_viewport_width(&mut self, width: f64) -> bool {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        if width == self.viewport_width {
            return false;
        }
        self.viewport_width = width;
        true
    }

    /// Sets the time used as zoom anchor for non-pointer zoom requests.
    pub fn set_selected_time(&mut self, time: Option<Timestamp>) {
        self.selected_time = time;
    }

    /// The selected time, if any.
    #[must_use]
    pub fn selected_time(&self) -> Option<Timestamp> {
        self.selected_time
    }

    /// Starts a drag. Cancels any scroll animation and overscroll decay.
    ///
    /// A pending zoom commit is disarmed until the drag is released.
    pub fn pointer_down(&mut self, input: PointerInput) {
        self.animation = None;
        self.cancel_decay();
        self.zoom_debounce.cancel(&mut self.timers);
        self.drag.start(input.position);
    }

    /// Moves the scroll by the horizontal pointer delta while dragging.
    ///
    /// Movement past the bounds is kept as overscroll. Returns `true` if the
    /// scroll state changed.
    pub fn pointer_move(&mut self, input: PointerInput) -> bool {
        let Some(delta) = self.drag.update(input.position) else {
            return false;
        };
        if delta.x == 0.0 || !delta.x.is_finite() {
            return false;
        }
        let raw = self.state.scroll_pixels + self.state.overscroll_pixels + delta.x;
        let scroll = self.bounds().clamp(raw);
        self.state.scroll_pixels = scroll;
        self.state.overscroll_pixels = raw - scroll;
        true
    }

    /// Ends a drag, starting overscroll decay and releasing deferred zooms.
    pub fn pointer_up(&mut self, now: u64) {
        if !self.drag.is_dragging() {
            return;
        }
        self.drag.end();
        if self.state.overscroll_pixels != 0.0 {
            self.schedule_decay(now.saturating_add(self.decay_interval()));
        }
        if self.pending_switches != 0 {
            self.zoom_debounce
                .poke(&mut self.timers, now, ControllerTimer::ZoomCommit);
        }
    }

    /// Handles a wheel event: zooms with `CTRL`/`META`, pans otherwise.
    pub fn wheel(&mut self, input: WheelInput) {
        let wheel = self.config.wheel_zoom;
        if input.modifiers.zooms_wheel() {
            let delta = if input.delta_y != 0.0 {
                input.delta_y
            } else {
                input.delta_x
            };
            let per_switch = if wheel.pixels_per_switch > 0.0 {
                wheel.pixels_per_switch
            } else {
                WheelZoomConfig::default().pixels_per_switch
            };
            self.wheel_remainder += wheel.normalize(delta, input.delta_mode);
            let switches = (self.wheel_remainder / per_switch).trunc();
            if switches == 0.0 {
                return;
            }
            self.wheel_remainder -= switches * per_switch;
            let span = f64::from(self.scale.max().0) - f64::from(self.scale.min().0);
            #[expect(
                clippy::cast_possible_truncation,
                reason = "clamped to the width of the level range"
            )]
            let switches = switches.clamp(-span, span) as i32;
            self.add_switches(switches, ZoomAnchor::ViewX(input.position.x), input.time);
        } else {
            let delta = if input.delta_x != 0.0 {
                input.delta_x
            } else {
                input.delta_y
            };
            let delta = wheel.normalize(delta, input.delta_mode);
            if delta == 0.0 {
                return;
            }
            self.animation = None;
            let target = self.state.scroll_pixels - delta;
            self.state.scroll_pixels = self.bounds().clamp(target);
        }
    }

    /// Queues one zoom switch; it commits after the debounce period.
    pub fn request_zoom(&mut self, direction: ZoomDirection, anchor: ZoomAnchor, now: u64) {
        self.add_switches(direction.switches(), anchor, now);
    }

    /// Scrolls to `target`, animated unless `skip_animation` is set.
    ///
    /// A request during an animation re-targets it. A drag in progress ends.
    pub fn scroll_to(&mut self, target: ScrollTarget, skip_animation: bool, now: u64) {
        self.drag.end();
        self.cancel_decay();
        self.state.overscroll_pixels = 0.0;
        let raw = match target {
            ScrollTarget::Timestamp(time) => {
                self.viewport_width * 0.5 - self.real_time_to_scaled_time(time)
            }
            ScrollTarget::Pixels(pixels) => pixels,
        };
        let target = self.bounds().clamp(raw);
        if skip_animation || self.config.scroll_animation_ms == 0 {
            self.animation = None;
            self.state.scroll_pixels = target;
            return;
        }
        match &mut self.animation {
            Some(tween) => tween.retarget(now, target),
            None => {
                self.animation = Some(Tween::new(
                    self.state.scroll_pixels,
                    target,
                    now,
                    self.config.scroll_animation_ms,
                    self.config.easing,
                ));
            }
        }
    }

    /// Pages one viewport width toward earlier time.
    pub fn scroll_left(&mut self, now: u64) {
        let base = self.scroll_goal();
        self.scroll_to(ScrollTarget::Pixels(base + self.viewport_width), false, now);
    }

    /// Pages one viewport width toward later time.
    pub fn scroll_right(&mut self, now: u64) {
        let base = self.scroll_goal();
        self.scroll_to(ScrollTarget::Pixels(base - self.viewport_width), false, now);
    }

    /// Advances time-driven work and returns the coalesced notifications.
    pub fn tick(&mut self, now: u64) -> ControllerUpdate {
        self.last_tick = now;
        while let Some((id, timer)) = self.timers.pop_due(now) {
            match timer {
                ControllerTimer::ZoomCommit => {
                    if self.zoom_debounce.fired(id) {
                        self.commit_zoom();
                    }
                }
                ControllerTimer::OverscrollDecay { due } => {
                    if self.decay_timer == Some(id) {
                        self.decay_timer = None;
                        self.step_decay(due);
                    }
                }
            }
        }
        self.step_animation(now);

        let snapshot = self.snapshot();
        let scroll = (snapshot != self.last_emitted).then_some(snapshot);
        self.last_emitted = snapshot;
        let update = ControllerUpdate {
            scroll,
            scale: self.pending_scale.take(),
        };
        if !update.is_empty() {
            tracing::trace!(
                scroll = snapshot.scroll_pixels,
                level = snapshot.scale_level.0,
                "scroll update"
            );
        }
        update
    }

    /// When [`tick`](Self::tick) next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        let frame = self.last_tick.saturating_add(self.config.frame_interval_ms);
        let animating = self.animation.is_some().then_some(frame);
        let dirty = (self.snapshot() != self.last_emitted || self.pending_scale.is_some())
            .then_some(frame);
        [self.timers.next_deadline(), animating, dirty]
            .into_iter()
            .flatten()
            .min()
    }

    /// Read-only snapshot for renderers.
    #[must_use]
    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            scroll_pixels: self.state.scroll_pixels,
            displayed_scroll: self.displayed_scroll(),
            overscroll_pixels: self.state.overscroll_pixels,
            scale_level: self.state.scale_level,
            time_per_pixel: self.time_per_pixel(),
            viewport_width: self.viewport_width,
        }
    }

    /// Scroll offset including the elastic overscroll share.
    #[must_use]
    pub fn displayed_scroll(&self) -> f64 {
        self.state.displayed_scroll(self.config.overscroll_exponent)
    }

    /// Pixel distance of `time` from the time origin at the current level.
    #[must_use]
    pub fn real_time_to_scaled_time(&self, time: Timestamp) -> f64 {
        self.scale
            .real_time_to_scaled_time(time as f64, self.state.scale_level)
    }

    /// World time covered by `pixels` at the current level.
    #[must_use]
    pub fn scaled_time_to_real_time(&self, pixels: f64) -> f64 {
        self.scale
            .scaled_time_to_real_time(pixels, self.state.scale_level)
    }

    /// The time under viewport coordinate `x`.
    #[must_use]
    pub fn time_at_view_x(&self, x: f64) -> Timestamp {
        time_from_f64(self.scaled_time_to_real_time(x - self.displayed_scroll()))
    }

    /// Viewport coordinate of `time`.
    #[must_use]
    pub fn view_x_of_time(&self, time: Timestamp) -> f64 {
        self.real_time_to_scaled_time(time) + self.displayed_scroll()
    }

    /// The time a marker at `time` lands on after being dragged `dx` pixels.
    #[must_use]
    pub fn timestamp_for_drag(&self, time: Timestamp, dx: f64) -> Timestamp {
        let shift = time_from_f64(self.scaled_time_to_real_time(dx));
        clamp_to_safe(time.saturating_add(shift))
    }

    /// Snapshot of the controller internals for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ScrollControllerDebugInfo {
        ScrollControllerDebugInfo {
            phase: self.phase(),
            state: self.state,
            bounds: self.bounds(),
            viewport_width: self.viewport_width,
            pending_switches: self.pending_switches,
            zoom_deadline: self.zoom_debounce.deadline(&self.timers),
            decay_deadline: self.decay_timer.and_then(|id| self.timers.deadline(id)),
            pending_timers: self.timers.len(),
            animation_target: self.animation.map(|tween| tween.to),
        }
    }

    fn add_switches(&mut self, switches: i32, anchor: ZoomAnchor, now: u64) {
        self.pending_switches = self.pending_switches.saturating_add(switches);
        self.zoom_anchor = anchor;
        // Deferred until the drag is released.
        if !self.drag.is_dragging() {
            self.zoom_debounce
                .poke(&mut self.timers, now, ControllerTimer::ZoomCommit);
        }
    }

    fn commit_zoom(&mut self) {
        let switches = core::mem::take(&mut self.pending_switches);
        let from = self.state.scale_level;
        let to = self.scale.clamp(from.offset(switches));
        if from == to {
            tracing::debug!(level = from.0, switches, "zoom request clamped away");
            return;
        }
        // Measured against the displayed scroll so an elastic overscroll
        // does not shift the anchor.
        let anchor_x = self.anchor_x();
        let anchor_time = (anchor_x - self.displayed_scroll()) * self.time_per_pixel();
        self.state.scale_level = to;
        let scroll = anchor_x - anchor_time / self.time_per_pixel();
        self.state.scroll_pixels = self.bounds().clamp(scroll);
        self.state.overscroll_pixels = 0.0;
        self.cancel_decay();
        self.animation = None;
        tracing::debug!(from = from.0, to = to.0, anchor_x, "zoom committed");
        self.record_scale_change(from, to);
    }

    fn record_scale_change(&mut self, from: ScaleLevel, to: ScaleLevel) {
        let from = self.pending_scale.map_or(from, |pending| pending.from);
        self.pending_scale = Some(ScaleChange { from, to });
    }

    fn anchor_x(&self) -> f64 {
        match self.zoom_anchor {
            ZoomAnchor::ViewX(x) if x.is_finite() => x,
            ZoomAnchor::ViewX(_) => self.viewport_width * 0.5,
            ZoomAnchor::Selection => match self.selected_time {
                Some(time) => self.view_x_of_time(time),
                None => self.viewport_width * 0.5,
            },
        }
    }

    fn schedule_decay(&mut self, due: u64) {
        self.cancel_decay();
        let id = self
            .timers
            .schedule(due, ControllerTimer::OverscrollDecay { due });
        self.decay_timer = Some(id);
    }

    fn cancel_decay(&mut self) {
        if let Some(id) = self.decay_timer.take() {
            self.timers.cancel(id);
        }
    }

    /// Applies one decay step and re-arms the next one unless at rest.
    fn step_decay(&mut self, due: u64) {
        if self.drag.is_dragging() {
            return;
        }
        let factor = self.config.overscroll_decay_factor;
        let factor = if (0.0..1.0).contains(&factor) {
            factor
        } else {
            0.0
        };
        self.state.overscroll_pixels *= factor;
        if self.state.overscroll_pixels.abs() < OVERSCROLL_REST_PX {
            self.state.overscroll_pixels = 0.0;
            return;
        }
        self.schedule_decay(due.saturating_add(self.decay_interval()));
    }

    fn step_animation(&mut self, now: u64) {
        let Some(tween) = self.animation else {
            return;
        };
        self.state.scroll_pixels = self.bounds().clamp(tween.value_at(now));
        if tween.is_finished(now) {
            self.animation = None;
        }
    }

    fn decay_interval(&self) -> u64 {
        self.config.overscroll_decay_interval_ms.max(1)
    }

    /// Where the scroll is heading: the animation target, else the scroll.
    fn scroll_goal(&self) -> f64 {
        self.animation
            .map_or(self.state.scroll_pixels, |tween| tween.to)
    }
}

/// Debug snapshot of a [`ScrollController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollControllerDebugInfo {
    /// Current phase.
    pub phase: Phase,
    /// Raw scroll state.
    pub state: ScrollState,
    /// Bounds at the current level.
    pub bounds: ScrollBounds,
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Zoom switches not yet committed.
    pub pending_switches: i32,
    /// When the pending zoom commits.
    pub zoom_deadline: Option<u64>,
    /// Next overscroll decay tick.
    pub decay_deadline: Option<u64>,
    /// Timers waiting in the controller's queue.
    pub pending_timers: usize,
    /// Target of the running scroll animation.
    pub animation_target: Option<f64>,
}

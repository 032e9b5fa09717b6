// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use worldline_axis::{AxisWindow, Divider, DividerGenerator, DividerUpdate};
use worldline_calendar::{
    CalendarDefinition, CalendarSpec, LabelFormatter, PatternFormatter, Timestamp,
};
use worldline_layout::{
    EntityIndex, EventInput, GhostMarker, LayoutEngine, TimelineEntity, TimelineLayout, Track,
    TrackInput,
};
use worldline_timing::Clock;
use worldline_view::{
    HoverSet, PointerInput, ScaleLevel, ScaleTable, ScrollController, ScrollSnapshot, ScrollTarget,
    WheelInput, ZoomAnchor, ZoomDirection,
};
use worldline_virtual::{CullView, DividerCuller, MarkerCuller};

use crate::{
    BusEvent, EventBus, SubscriptionId, TimelineConfig, TimelineError, TimelineEvent,
    TimelineEventKind,
};

/// What one [`Timeline::frame`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Events published.
    pub published: usize,
    /// When the next frame has work to do.
    pub next_deadline: Option<u64>,
}

/// The timeline context: one calendar, one scroll/zoom controller, the axis,
/// the marker layout and the culled views of both.
///
/// Commands record intent; [`frame`](Self::frame) advances timers, refreshes
/// dividers and culling, and publishes at most one event of each kind.
pub struct Timeline<C> {
    config: TimelineConfig,
    clock: C,
    calendar: CalendarDefinition,
    formatter: Box<dyn LabelFormatter>,
    controller: ScrollController,
    axis: DividerGenerator,
    divider_culler: DividerCuller,
    marker_culler: MarkerCuller,
    engine: LayoutEngine,
    layout: TimelineLayout,
    events: Vec<EventInput>,
    tracks: Vec<TrackInput>,
    ghost: Option<GhostMarker>,
    hover: HoverSet<String>,
    bus: EventBus<TimelineEvent>,
    layout_changed: bool,
    hover_changed: bool,
}

impl<C> fmt::Debug for Timeline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("calendar", &self.calendar.name())
            .field("snapshot", &self.controller.snapshot())
            .field("layout_revision", &self.layout.revision())
            .field("dividers", &self.divider_culler.visible().len())
            .field("markers", &self.marker_culler.visible().len())
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

impl<C: Clock> Timeline<C> {
    /// Creates a timeline with no events.
    ///
    /// # Errors
    ///
    /// [`TimelineError::InvalidConfig`] if `config` does not validate.
    pub fn new(
        calendar: CalendarDefinition,
        config: TimelineConfig,
        clock: C,
    ) -> Result<Self, TimelineError> {
        config.validate()?;
        let scale = ScaleTable::from_settings(calendar.scale());
        let controller = ScrollController::new(
            scale,
            calendar.max_time(),
            ScaleLevel(config.initial_scale_level),
            config.controller(),
        );
        let mut engine = LayoutEngine::new(config.layout());
        let layout = engine.layout(&[], &[], None);
        Ok(Self {
            config,
            clock,
            calendar,
            formatter: Box::new(PatternFormatter),
            controller,
            axis: DividerGenerator::new(config.dividers()),
            divider_culler: DividerCuller::new(config.divider_culling()),
            marker_culler: MarkerCuller::new(config.marker_culling()),
            engine,
            layout,
            events: Vec::new(),
            tracks: Vec::new(),
            ghost: None,
            hover: HoverSet::new(),
            bus: EventBus::new(),
            layout_changed: true,
            hover_changed: false,
        })
    }

    /// Validates `spec` and creates a timeline for it.
    ///
    /// # Errors
    ///
    /// [`TimelineError::Calendar`] if the calendar is invalid, e.g. its
    /// origin is not a safe integer, or [`TimelineError::InvalidConfig`].
    pub fn from_spec(
        spec: CalendarSpec,
        config: TimelineConfig,
        clock: C,
    ) -> Result<Self, TimelineError> {
        let calendar = CalendarDefinition::try_from(spec)?;
        Self::new(calendar, config, clock)
    }

    /// Replaces the label formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl LabelFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self.axis.invalidate();
        self
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// The calendar in use.
    #[must_use]
    pub fn calendar(&self) -> &CalendarDefinition {
        &self.calendar
    }

    /// The injected clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The scroll/zoom controller, read-only.
    #[must_use]
    pub fn controller(&self) -> &ScrollController {
        &self.controller
    }

    /// The current layout.
    #[must_use]
    pub fn layout(&self) -> &TimelineLayout {
        &self.layout
    }

    // --- subscriptions ---

    /// Calls `handler` for every later event of `kind`.
    pub fn subscribe(
        &mut self,
        kind: TimelineEventKind,
        handler: impl FnMut(&TimelineEvent) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(kind, handler)
    }

    /// Removes a subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // --- renderer API ---

    /// Current scroll state.
    #[must_use]
    pub fn snapshot(&self) -> ScrollSnapshot {
        self.controller.snapshot()
    }

    /// Dividers to draw, as of the last frame.
    #[must_use]
    pub fn visible_dividers(&self) -> &[Divider] {
        self.divider_culler.visible()
    }

    /// Indices of the markers to draw, as of the last frame.
    #[must_use]
    pub fn visible_marker_indices(&self) -> &[EntityIndex] {
        self.marker_culler.visible()
    }

    /// Markers to draw in time order, as of the last frame.
    pub fn visible_markers(&self) -> impl Iterator<Item = &TimelineEntity> + '_ {
        self.marker_culler
            .visible()
            .iter()
            .filter_map(|index| self.layout.entity(*index))
    }

    /// Laid-out tracks with their heights.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        self.layout.tracks()
    }

    /// Timestamp to unscrolled pixels at the current scale.
    #[must_use]
    pub fn real_time_to_scaled_time(&self, time: Timestamp) -> f64 {
        self.controller.real_time_to_scaled_time(time)
    }

    /// Unscrolled pixels to time at the current scale.
    #[must_use]
    pub fn scaled_time_to_real_time(&self, pixels: f64) -> f64 {
        self.controller.scaled_time_to_real_time(pixels)
    }

    /// The time under viewport x.
    #[must_use]
    pub fn time_at_view_x(&self, x: f64) -> Timestamp {
        self.controller.time_at_view_x(x)
    }

    /// The viewport x of a time.
    #[must_use]
    pub fn view_x_of_time(&self, time: Timestamp) -> f64 {
        self.controller.view_x_of_time(time)
    }

    /// Where a marker at `time` lands after being dragged by `dx` pixels.
    #[must_use]
    pub fn timestamp_for_drag(&self, time: Timestamp, dx: f64) -> Timestamp {
        self.controller.timestamp_for_drag(time, dx)
    }

    /// Formats a time with the configured formatter.
    #[must_use]
    pub fn label(&self, time: Timestamp, format: Option<&str>) -> String {
        self.formatter.label(&self.calendar, time, format)
    }

    /// Returns `true` if the marker with `key` is hovered.
    #[must_use]
    pub fn is_hovered(&self, key: &str) -> bool {
        self.hover.iter().any(|hovered| hovered == key)
    }

    // --- commands ---

    /// Replaces the events and tracks and lays them out.
    pub fn set_data(&mut self, events: Vec<EventInput>, tracks: Vec<TrackInput>) {
        self.events = events;
        self.tracks = tracks;
        self.relayout();
    }

    /// Shows or clears a drag preview.
    pub fn set_ghost(&mut self, ghost: Option<GhostMarker>) {
        if self.ghost == ghost {
            return;
        }
        self.ghost = ghost;
        self.relayout();
    }

    /// Replaces the calendar. Scale and scroll are clamped to its ranges.
    pub fn set_calendar(&mut self, calendar: CalendarDefinition) {
        self.controller.set_scale(
            ScaleTable::from_settings(calendar.scale()),
            calendar.max_time(),
        );
        self.calendar = calendar;
        self.axis.invalidate();
        self.divider_culler.invalidate();
        self.marker_culler.invalidate();
    }

    /// Resizes the viewport.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.controller.set_viewport_width(width);
    }

    /// Sets the time non-pointer zooms keep fixed.
    pub fn set_selected_time(&mut self, time: Option<Timestamp>) {
        self.controller.set_selected_time(time);
    }

    /// Starts a drag.
    pub fn pointer_down(&mut self, input: PointerInput) {
        self.controller.pointer_down(input);
    }

    /// Continues a drag.
    pub fn pointer_move(&mut self, input: PointerInput) {
        self.controller.pointer_move(input);
    }

    /// Ends a drag.
    pub fn pointer_up(&mut self) {
        let now = self.clock.now_ms();
        self.controller.pointer_up(now);
    }

    /// Pans or zooms with the wheel.
    ///
    /// The event's own timestamp is replaced by the clock so zoom commits
    /// share a time base with every other timer.
    pub fn wheel(&mut self, input: WheelInput) {
        let time = self.clock.now_ms();
        self.controller.wheel(WheelInput { time, ..input });
    }

    /// Queues one zoom step around the selected time.
    pub fn request_zoom(&mut self, direction: ZoomDirection) {
        self.request_zoom_at(direction, ZoomAnchor::Selection);
    }

    /// Queues one zoom step around `anchor`.
    pub fn request_zoom_at(&mut self, direction: ZoomDirection, anchor: ZoomAnchor) {
        let now = self.clock.now_ms();
        self.controller.request_zoom(direction, anchor, now);
    }

    /// Scrolls to a time (centred) or a raw offset.
    pub fn scroll_to(&mut self, target: ScrollTarget, skip_animation: bool) {
        let now = self.clock.now_ms();
        self.controller.scroll_to(target, skip_animation, now);
    }

    /// Pages toward earlier time.
    pub fn scroll_left(&mut self) {
        let now = self.clock.now_ms();
        self.controller.scroll_left(now);
    }

    /// Pages toward later time.
    pub fn scroll_right(&mut self) {
        let now = self.clock.now_ms();
        self.controller.scroll_right(now);
    }

    /// Marks the marker with `key` as hovered.
    pub fn hover_enter(&mut self, key: &str) -> bool {
        let changed = self.hover.enter(String::from(key));
        self.hover_changed |= changed;
        changed
    }

    /// Clears hover from the marker with `key`.
    pub fn hover_leave(&mut self, key: &str) -> bool {
        let changed = self.hover.leave(&String::from(key));
        self.hover_changed |= changed;
        changed
    }

    /// Runs due timers, refreshes dividers and culling, and publishes what
    /// changed since the last frame.
    pub fn frame(&mut self) -> FrameReport {
        let now = self.clock.now_ms();
        let mut published = 0;
        let update = self.controller.tick(now);
        if let Some(change) = update.scale {
            published += self.publish(TimelineEvent::ScaleChanged(change));
        }
        if let Some(snapshot) = update.scroll {
            published += self.publish(TimelineEvent::ScrollChanged(snapshot));
        }

        let snapshot = self.controller.snapshot();
        let window = AxisWindow::from(&snapshot);
        let axis_update = self
            .axis
            .update(&self.calendar, self.formatter.as_ref(), window);
        if axis_update != DividerUpdate::Unchanged {
            self.divider_culler.invalidate();
        }
        let view = CullView::from(&snapshot);
        if self.divider_culler.update(&self.axis, view) {
            let count = self.divider_culler.visible().len();
            published += self.publish(TimelineEvent::DividersChanged { count });
        }

        if self.layout_changed {
            self.layout_changed = false;
            let revision = self.layout.revision();
            published += self.publish(TimelineEvent::LayoutChanged { revision });
        }
        if self.marker_culler.update(&self.layout, view) {
            let count = self.marker_culler.visible().len();
            published += self.publish(TimelineEvent::MarkersChanged { count });
        }
        if self.hover_changed {
            self.hover_changed = false;
            published += self.publish(TimelineEvent::HoverChanged);
        }

        tracing::trace!(now, published, "frame");
        FrameReport {
            published,
            next_deadline: self.next_deadline(),
        }
    }

    /// When [`frame`](Self::frame) next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        let controller = self.controller.next_deadline();
        if self.layout_changed || self.hover_changed {
            let now = self.clock.now_ms();
            return Some(controller.map_or(now, |deadline| deadline.min(now)));
        }
        controller
    }

    fn publish(&mut self, event: TimelineEvent) -> usize {
        let handlers = self.bus.publish(&event);
        tracing::trace!(kind = ?event.kind(), handlers, "published");
        1
    }

    fn relayout(&mut self) {
        self.layout = self
            .engine
            .layout(&self.events, &self.tracks, self.ghost.as_ref());
        let layout = &self.layout;
        let dropped = self
            .hover
            .retain(|key| layout.entities().iter().any(|entity| entity.key == *key));
        self.hover_changed |= dropped;
        self.layout_changed = true;
    }
}

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the timeline context.

use std::cell::RefCell;
use std::rc::Rc;

use worldline_axis::SizeClass;
use worldline_calendar::{
    CalendarDefinition, CalendarError, CalendarSpec, MAX_SAFE_TIME, TimeUnit, presets,
};
use worldline_layout::{EventInput, GhostMarker, MarkerType, TrackInput};
use worldline_timeline::{
    Timeline, TimelineConfig, TimelineError, TimelineEvent, TimelineEventKind,
};
use worldline_timing::ManualClock;
use worldline_view::{Modifiers, PointerInput, ScaleLevel, ScrollTarget, WheelInput, ZoomDirection};

fn countup(clock: &ManualClock) -> Timeline<&ManualClock> {
    let mut timeline = Timeline::new(presets::countup(), TimelineConfig::default(), clock).unwrap();
    timeline.set_viewport_width(800.0);
    timeline
}

fn record(
    timeline: &mut Timeline<&ManualClock>,
    kind: TimelineEventKind,
) -> Rc<RefCell<Vec<TimelineEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    timeline.subscribe(kind, move |event| sink.borrow_mut().push(*event));
    log
}

#[test]
fn countup_markers_near_origin_are_visible() {
    let clock = ManualClock::new(0);
    let mut timeline = countup(&clock);
    timeline.set_data(vec![EventInput::new("a", 0), EventInput::new("b", 100)], vec![]);
    timeline.frame();

    let pad = timeline.config().marker_padding_px;
    let markers: Vec<_> = timeline.visible_markers().collect();
    assert_eq!(markers.len(), 2);
    for marker in markers {
        let x = timeline.real_time_to_scaled_time(marker.marker_position)
            + timeline.snapshot().scroll_pixels;
        assert!(x >= -pad && x <= 800.0 + pad, "{x}");
    }
}

#[test]
fn far_marker_is_culled() {
    let clock = ManualClock::new(0);
    let mut timeline = countup(&clock);
    timeline.set_data(vec![EventInput::new("far", 100_000)], vec![]);
    timeline.frame();
    assert_eq!(timeline.visible_markers().count(), 0);
    assert_eq!(timeline.snapshot().scale_level, ScaleLevel(0));
}

#[test]
fn wheel_zoom_commits_after_debounce() {
    let clock = ManualClock::new(0);
    let mut timeline = countup(&clock);
    timeline.frame();
    let scales = record(&mut timeline, TimelineEventKind::ScaleChanged);
    let dividers = record(&mut timeline, TimelineEventKind::DividersChanged);

    let anchor_time = timeline.time_at_view_x(200.0);
    let wheel = WheelInput::pixels(200.0, 0.0, 100.0, 0).with_modifiers(Modifiers::CTRL);
    timeline.wheel(wheel);
    clock.advance(100);
    timeline.frame();
    assert!(scales.borrow().is_empty(), "still debouncing");

    clock.advance(250);
    let report = timeline.frame();
    assert!(report.published >= 2);
    assert_eq!(scales.borrow().len(), 1);
    let TimelineEvent::ScaleChanged(change) = scales.borrow()[0] else {
        panic!("unexpected event");
    };
    assert_eq!((change.from, change.to), (ScaleLevel(0), ScaleLevel(1)));
    assert_eq!(dividers.borrow().len(), 1);
    assert!((timeline.view_x_of_time(anchor_time) - 200.0).abs() <= 1.0);

    // Level 1 shows two ticks per pixel: the large dividers double their step.
    let large: Vec<_> = timeline
        .visible_dividers()
        .iter()
        .filter(|d| d.size_class == SizeClass::Large)
        .map(|d| d.timestamp)
        .collect();
    assert!(large.windows(2).all(|w| w[1] - w[0] == 1_000), "{large:?}");
}

#[test]
fn wheel_zoom_is_timed_by_the_clock_not_the_event() {
    let clock = ManualClock::new(5_000);
    let mut timeline = countup(&clock);
    timeline.frame();

    // Host event timestamps may use an unrelated epoch.
    let wheel = WheelInput::pixels(200.0, 0.0, 100.0, 9_000_000).with_modifiers(Modifiers::CTRL);
    timeline.wheel(wheel);
    assert_eq!(timeline.next_deadline(), Some(5_300));
    clock.advance(300);
    timeline.frame();
    assert_eq!(timeline.snapshot().scale_level, ScaleLevel(1));
}

#[test]
fn programmatic_scroll_animates_and_retargets() {
    let clock = ManualClock::new(0);
    let mut timeline = countup(&clock);
    timeline.frame();
    timeline.scroll_to(ScrollTarget::Timestamp(10_000), false);
    clock.advance(150);
    timeline.frame();
    let midway = timeline.snapshot().scroll_pixels;
    assert!(midway < 0.0 && midway > -9_600.0, "{midway}");

    timeline.scroll_to(ScrollTarget::Timestamp(20_000), false);
    clock.advance(300);
    timeline.frame();
    assert_eq!(timeline.snapshot().scroll_pixels, 400.0 - 20_000.0);
    assert_eq!(timeline.time_at_view_x(400.0), 20_000);
}

#[test]
fn paging_moves_by_viewport_width() {
    let clock = ManualClock::new(0);
    let mut timeline = countup(&clock);
    timeline.scroll_right();
    clock.advance(400);
    timeline.frame();
    assert_eq!(timeline.snapshot().scroll_pixels, -800.0);
    timeline.scroll_left();
    timeline.scroll_left();
    clock.advance(400);
    timeline.frame();
    assert_eq!(timeline.snapshot().scroll_pixels, 800.0);
}

#[test]
fn hover_changes_publish_once_per_frame() {
    let clock = ManualClock::new(0);
    let mut timeline = countup(&clock);
    timeline.set_data(vec![EventInput::new("a", 0)], vec![]);
    timeline.frame();
    let hovers = record(&mut timeline, TimelineEventKind::HoverChanged);

    assert!(timeline.hover_enter("a:issuedAt"));
    assert!(!timeline.hover_enter("a:issuedAt"));
    assert!(timeline.next_deadline().is_some());
    timeline.frame();
    timeline.frame();
    assert_eq!(hovers.borrow().len(), 1);
    assert!(timeline.is_hovered("a:issuedAt"));

    // The hovered marker disappears with the next layout.
    timeline.set_data(vec![EventInput::new("b", 0)], vec![]);
    timeline.frame();
    assert_eq!(hovers.borrow().len(), 2);
    assert!(!timeline.is_hovered("a:issuedAt"));
}

#[test]
fn ghost_marker_appears_and_clears() {
    let clock = ManualClock::new(0);
    let mut timeline = countup(&clock);
    let tracks = vec![TrackInput::new("t", "T", 1.0)];
    timeline.set_data(vec![EventInput::new("a", 0).on_track("t")], tracks);
    timeline.frame();
    let layouts = record(&mut timeline, TimelineEventKind::LayoutChanged);

    let dragged = timeline.timestamp_for_drag(0, 50.0);
    assert_eq!(dragged, 50);
    timeline.set_ghost(Some(GhostMarker {
        event_id: "a".into(),
        track_id: Some("t".into()),
        position: dragged,
    }));
    timeline.frame();
    let kinds: Vec<_> = timeline.visible_markers().map(|m| m.marker_type).collect();
    assert_eq!(kinds, [MarkerType::IssuedAt, MarkerType::Ghost]);

    timeline.set_ghost(None);
    timeline.frame();
    assert_eq!(timeline.visible_markers().count(), 1);
    assert_eq!(layouts.borrow().len(), 2);
}

#[test]
fn zoom_request_during_drag_waits_for_release() {
    let clock = ManualClock::new(0);
    let mut timeline = countup(&clock);
    timeline.set_selected_time(Some(0));
    timeline.pointer_down(PointerInput::at(100.0, 0.0, 0));
    timeline.request_zoom(ZoomDirection::In);
    clock.advance(1_000);
    timeline.frame();
    assert_eq!(timeline.snapshot().scale_level, ScaleLevel(0));

    timeline.pointer_up();
    clock.advance(300);
    timeline.frame();
    assert_eq!(timeline.snapshot().scale_level, ScaleLevel(-1));
}

#[test]
fn labels_use_the_calendar() {
    let clock = ManualClock::new(0);
    let timeline = Timeline::new(presets::earth(), TimelineConfig::default(), &clock).unwrap();
    assert_eq!(timeline.label(0, None), "1 January 1970");
    let custom =
        timeline.with_formatter(|_: &CalendarDefinition, t: i64, _: Option<&str>| format!("t{t}"));
    assert_eq!(custom.label(5, None), "t5");
}

#[test]
fn construction_errors() {
    let clock = ManualClock::new(0);
    let bad = TimelineConfig::default().with_marker_row_height(0.0);
    assert!(matches!(
        Timeline::new(presets::countup(), bad, &clock),
        Err(TimelineError::InvalidConfig { .. })
    ));

    let mut spec = CalendarSpec::from(presets::countup());
    spec.base_offset = MAX_SAFE_TIME + 1;
    let err = Timeline::from_spec(spec, TimelineConfig::default(), &clock).unwrap_err();
    assert_eq!(
        err,
        TimelineError::Calendar(CalendarError::OriginTooLarge {
            origin: MAX_SAFE_TIME + 1
        })
    );

    let spec = CalendarSpec {
        units: vec![TimeUnit::fixed("tick", 0)],
        ..CalendarSpec::from(presets::countup())
    };
    assert!(matches!(
        Timeline::from_spec(spec, TimelineConfig::default(), &clock),
        Err(TimelineError::Calendar(CalendarError::NonPositiveDuration { .. }))
    ));
}

#[test]
fn calendar_swap_clamps_and_regenerates() {
    let clock = ManualClock::new(0);
    let config = TimelineConfig::default().with_initial_scale_level(10);
    let mut timeline = Timeline::new(presets::countup(), config, &clock).unwrap();
    timeline.set_viewport_width(800.0);
    timeline.frame();
    let before: Vec<_> = timeline.visible_dividers().to_vec();

    timeline.set_calendar(presets::earth());
    timeline.frame();
    assert_eq!(timeline.calendar().name(), "earth");
    assert_ne!(timeline.visible_dividers(), before.as_slice());
}

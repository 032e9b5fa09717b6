// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Worked layout scenarios.

use worldline_layout::{EventInput, LayoutEngine, MarkerType, TimelineLayout};

fn heights_of(layout: &TimelineLayout, event: &str) -> Vec<u32> {
    layout
        .entities_for_event(event)
        .map(|i| layout.entity(i).unwrap().marker_height)
        .collect()
}

#[test]
fn six_deltas_share_the_issued_height() {
    let mut event = EventInput::new("saga", 0);
    for i in 1..=6 {
        event = event.with_delta(format!("step{i}"), i * 100);
    }
    let layout = LayoutEngine::default().layout(&[event], &[], None);

    assert_eq!(layout.entities().len(), 7);
    assert_eq!(heights_of(&layout, "saga"), [0; 7]);

    let issued = layout.entities_for_event("saga").next().unwrap();
    let kinds: Vec<_> = layout
        .chain(issued)
        .map(|i| layout.entity(i).unwrap().marker_type)
        .collect();
    assert_eq!(kinds[0], MarkerType::IssuedAt);
    assert!(kinds[1..].iter().all(|k| *k == MarkerType::DeltaState));
}

#[test]
fn conflicting_chain_takes_next_free_slot() {
    let mut saga = EventInput::new("saga", 0);
    for i in 1..=6 {
        saga = saga.with_delta(format!("step{i}"), i * 100);
    }
    let events = [
        saga,
        // Starts while `saga` is still running.
        EventInput::new("rival", 250).with_delta("turn", 700).revoked(900),
        // Starts after `saga` ended but while `rival` runs.
        EventInput::new("heir", 800),
        // Everything is over by now.
        EventInput::new("epilogue", 1_000),
    ];
    let layout = LayoutEngine::default().layout(&events, &[], None);

    assert_eq!(heights_of(&layout, "saga"), [0; 7]);
    assert_eq!(heights_of(&layout, "rival"), [1, 1, 1]);
    assert_eq!(heights_of(&layout, "heir"), [0]);
    assert_eq!(heights_of(&layout, "epilogue"), [0]);

    let default = layout.track("default").unwrap();
    assert_eq!(default.max_marker_height, Some(1));
    assert_eq!(default.height, 3.0 * 40.0);
}

#[test]
fn identical_timestamps_stack() {
    let events: Vec<_> = (0..4).map(|i| EventInput::new(format!("e{i}"), 42)).collect();
    let layout = LayoutEngine::default().layout(&events, &[], None);
    let heights: Vec<_> = layout.entities().iter().map(|e| e.marker_height).collect();
    assert_eq!(heights, [0, 1, 2, 3]);
}

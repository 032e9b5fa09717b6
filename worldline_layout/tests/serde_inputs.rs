// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON loading of layout inputs.

#![cfg(feature = "serde")]

use worldline_layout::{EventInput, TrackInput};

#[test]
fn events_and_tracks_load_from_json() {
    let events: Vec<EventInput> = serde_json::from_str(
        r#"[
            {"id": "e1", "timestamp": 5, "delta_states": [{"id": "d1", "timestamp": 9}]},
            {"id": "e2", "track_id": "t", "timestamp": 1, "revoked_at": 3, "name": "Two"}
        ]"#,
    )
    .unwrap();
    assert_eq!(events[0].delta_states[0].timestamp, 9);
    assert_eq!(events[0].track_id, None);
    assert_eq!(events[1].revoked_at, Some(3));
    assert_eq!(events[1].name, "Two");

    let tracks: Vec<TrackInput> =
        serde_json::from_str(r#"[{"id": "t", "name": "T", "position": 1.5}]"#).unwrap();
    assert!(tracks[0].visible);
}

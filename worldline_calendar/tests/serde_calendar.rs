// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading calendars from JSON.

#![cfg(feature = "serde")]

use worldline_calendar::{CalendarDefinition, CalendarError, presets};

#[test]
fn preset_survives_json() {
    let earth = presets::earth();
    let json = serde_json::to_string(&earth).unwrap();
    let back: CalendarDefinition = serde_json::from_str(&json).unwrap();
    assert_eq!(back, earth);
}

#[test]
fn minimal_definition_uses_defaults() {
    let json = r#"{
        "name": "ticks",
        "units": [
            { "name": "tick", "length": { "fixed": 1 } },
            { "name": "round", "length": { "multiple": 10 }, "display_base": 1 }
        ]
    }"#;
    let calendar: CalendarDefinition = serde_json::from_str(json).unwrap();
    assert_eq!(calendar.base_offset(), 0);
    assert_eq!(calendar.label_format(), "{round} {tick}");
    assert!(calendar.presentation().is_empty());
    let round = calendar.unit_by_name("round").unwrap();
    assert_eq!(calendar.to_fields(25).value(round), 2);
}

#[test]
fn invalid_definition_reports_validation_error() {
    let json = r#"{
        "name": "broken",
        "base_offset": 9007199254740992,
        "units": [{ "name": "tick", "length": { "fixed": 1 } }]
    }"#;
    let err = serde_json::from_str::<CalendarDefinition>(json).unwrap_err();
    let expected = CalendarError::OriginTooLarge {
        origin: 9_007_199_254_740_992,
    };
    assert!(
        err.to_string().contains(&expected.to_string()),
        "unexpected error: {err}"
    );
}

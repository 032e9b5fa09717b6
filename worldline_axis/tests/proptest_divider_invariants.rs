// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for divider generation.

use proptest::prelude::*;
use worldline_axis::{AxisWindow, DividerConfig, DividerGenerator, SizeClass};
use worldline_calendar::{CalendarDefinition, PatternFormatter, presets};
use worldline_view::ScaleLevel;

fn calendar(index: usize) -> CalendarDefinition {
    match index {
        0 => presets::countup(),
        1 => presets::earth(),
        _ => presets::two_moons(),
    }
}

fn window(calendar: &CalendarDefinition, level: i32, scroll: f64, width: f64) -> AxisWindow {
    AxisWindow {
        scroll_pixels: scroll,
        scale_level: ScaleLevel(level),
        time_per_pixel: calendar.scale().time_per_pixel(level),
        width,
    }
}

fn assert_strictly_increasing(generator: &DividerGenerator) -> Result<(), TestCaseError> {
    for class in SizeClass::ALL {
        let times: Vec<_> = generator.level(class).map(|d| d.timestamp).collect();
        for pair in times.windows(2) {
            prop_assert!(pair[0] < pair[1], "{class:?}: {times:?}");
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn dividers_are_unique_and_ordered(
        which in 0_usize..3,
        level in -3_i32..=10,
        scroll in -5.0e6_f64..5.0e6,
        width in 100.0_f64..2_000.0,
    ) {
        let calendar = calendar(which);
        let mut generator = DividerGenerator::new(DividerConfig::default());
        let window = window(&calendar, level, scroll, width);
        generator.regenerate(&calendar, &PatternFormatter, window);
        assert_strictly_increasing(&generator)?;

        let (start, end) = window.time_range(DividerConfig::default().padding_px);
        for divider in generator.dividers() {
            prop_assert!(divider.timestamp >= start && divider.timestamp <= end);
        }
    }

    #[test]
    fn scrolling_keeps_runs_ordered_and_bounded(
        which in 0_usize..3,
        level in -3_i32..=10,
        moves in prop::collection::vec(-1_500.0_f64..1_500.0, 1..12),
    ) {
        let calendar = calendar(which);
        let config = DividerConfig::default();
        let mut generator = DividerGenerator::new(config);
        let mut scroll = 0.0;
        generator.update(&calendar, &PatternFormatter, window(&calendar, level, scroll, 800.0));
        for delta in moves {
            scroll += delta;
            generator.update(&calendar, &PatternFormatter, window(&calendar, level, scroll, 800.0));
            assert_strictly_increasing(&generator)?;
            for class in SizeClass::ALL {
                prop_assert!(generator.level(class).count() <= config.iteration_cap);
            }
        }
    }
}

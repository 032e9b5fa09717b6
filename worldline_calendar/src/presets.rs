// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made calendars.

use alloc::vec;
use alloc::vec::Vec;

use crate::{
    CalendarDefinition, MonthDef, PresentationUnit, ScaleSettings, SpacingTargets, TimeUnit,
    UnitRef,
};

const MINUTE: i64 = 60_000;
const HOUR: i64 = 60 * MINUTE;

/// A calendar that simply counts milliseconds ("ticks") from zero.
///
/// Dividers follow a 1-2-5 ladder so that labels stay round at every scale.
#[must_use]
pub fn countup() -> CalendarDefinition {
    // A single fixed unit can never fail validation.
    let calendar = match CalendarDefinition::new("countup", 0, vec![TimeUnit::fixed("tick", 1)]) {
        Ok(calendar) => calendar,
        Err(_) => unreachable!("single fixed unit is always valid"),
    };
    let tick = UnitRef(0);
    let mut candidates = Vec::new();
    let mut magnitude: i64 = 1;
    while magnitude <= 1_000_000_000_000_000 {
        for m in [1, 2, 5] {
            candidates.push(PresentationUnit::new(tick, m * magnitude));
        }
        magnitude *= 10;
    }
    calendar
        .with_label_format("{tick}")
        .with_auto_presentation(&candidates, SpacingTargets::default())
}

/// A leap-free Earth calendar starting at 1970-01-01 00:00.
///
/// Scale level zero shows one minute per pixel.
#[must_use]
pub fn earth() -> CalendarDefinition {
    let months = [
        ("January", 31),
        ("February", 28),
        ("March", 31),
        ("April", 30),
        ("May", 31),
        ("June", 30),
        ("July", 31),
        ("August", 31),
        ("September", 30),
        ("October", 31),
        ("November", 30),
        ("December", 31),
    ];
    let units = vec![
        TimeUnit::fixed("minute", MINUTE),
        TimeUnit::multiple("hour", 60),
        TimeUnit::multiple("day", 24).with_display_base(1),
        TimeUnit::months(
            "month",
            months.iter().map(|(n, l)| MonthDef::new(*n, *l)).collect(),
        )
        .with_display_base(1),
        TimeUnit::multiple("year", 1).with_display_base(1970),
    ];
    build_with_months(
        "earth",
        units,
        MINUTE as f64,
        "{day} {month:name} {year}",
        &[
            (0, &[1, 5, 15, 30][..]),
            (1, &[1, 3, 6, 12][..]),
            (2, &[1, 7][..]),
        ],
    )
}

/// A fantasy calendar with two short "tide" months bracketing the year.
///
/// Months are 15, 28, 30, 31, 30 and 15 days long; days have 20 hours.
/// Scale level zero shows one hour per pixel.
#[must_use]
pub fn two_moons() -> CalendarDefinition {
    let months = [
        ("First Tide", 15),
        ("Long Dark", 28),
        ("Greenrise", 30),
        ("Highsun", 31),
        ("Emberfall", 30),
        ("Second Tide", 15),
    ];
    let units = vec![
        TimeUnit::fixed("hour", HOUR),
        TimeUnit::multiple("day", 20).with_display_base(1),
        TimeUnit::months(
            "month",
            months.iter().map(|(n, l)| MonthDef::new(*n, *l)).collect(),
        )
        .with_display_base(1),
        TimeUnit::multiple("year", 1).with_display_base(1),
    ];
    build_with_months(
        "two-moons",
        units,
        HOUR as f64,
        "{day} {month:name}, year {year}",
        &[(0, &[1, 5, 10][..]), (1, &[1, 5][..])],
    )
}

/// Builds a month-based preset. `fixed_steps` lists step candidates for the
/// units below the month; months step by 1, 2 and 3 (when the table allows)
/// and years by a 1-2-5 ladder.
fn build_with_months(
    name: &str,
    units: Vec<TimeUnit>,
    base_time_per_pixel: f64,
    label_format: &str,
    fixed_steps: &[(usize, &[i64])],
) -> CalendarDefinition {
    let calendar = match CalendarDefinition::new(name, 0, units) {
        Ok(calendar) => calendar,
        Err(err) => unreachable!("preset calendar `{name}` is invalid: {err}"),
    };
    let calendar = calendar.with_scale(ScaleSettings {
        min_level: -3,
        max_level: 10,
        base_time_per_pixel,
    });

    let mut candidates = Vec::new();
    for (unit, steps) in fixed_steps {
        for step in *steps {
            candidates.push(PresentationUnit::new(UnitRef(*unit), *step));
        }
    }
    if let Some(month) = calendar.month_unit() {
        candidates.push(PresentationUnit::new(month, 1).with_label_format("{month:name}"));
        candidates.push(PresentationUnit::new(month, 3).with_label_format("{month:name} {year}"));
        let year = UnitRef(month.0 + 1);
        let mut magnitude = 1;
        while magnitude <= 100_000 {
            for m in [1, 2, 5] {
                candidates.push(PresentationUnit::new(year, m * magnitude).with_label_format("{year}"));
            }
            magnitude *= 10;
        }
    }
    calendar
        .with_label_format(label_format)
        .with_auto_presentation(&candidates, SpacingTargets::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_cover_every_scale_level() {
        for calendar in [countup(), earth(), two_moons()] {
            let scale = *calendar.scale();
            for level in scale.min_level..=scale.max_level {
                let units = calendar.presentation().level(level);
                assert!(!units.is_empty(), "{} has no dividers at level {level}", calendar.name());
                assert!(units.len() <= 4);
            }
        }
    }

    #[test]
    fn countup_presentation_is_coarse_to_fine() {
        let calendar = countup();
        let units = calendar.presentation().level(0);
        for pair in units.windows(2) {
            assert!(pair[0].step > pair[1].step, "{units:?}");
        }
        // One tick per pixel: the smallest dividers are 20 ticks apart.
        assert_eq!(units.last().map(|u| u.step), Some(20));
    }

    #[test]
    fn two_moons_year_has_149_days() {
        let calendar = two_moons();
        let year = calendar.unit_by_name("year").unwrap();
        assert_eq!(calendar.unit_span(year).unwrap(), 149 * 20 * HOUR);
    }
}

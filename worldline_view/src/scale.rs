// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use worldline_calendar::{ScaleSettings, Timestamp, clamp_to_safe};

/// A discrete zoom step. Higher levels show more time per pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaleLevel(pub i32);

impl ScaleLevel {
    /// The level `switches` steps away, saturating.
    #[must_use]
    pub const fn offset(self, switches: i32) -> Self {
        Self(self.0.saturating_add(switches))
    }
}

/// Maps scale levels to milliseconds per pixel: `base * 2^level`.
///
/// Levels are clamped into `[min, max]` before use, so every conversion is
/// defined for every input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTable {
    min: ScaleLevel,
    max: ScaleLevel,
    base: f64,
}

impl ScaleTable {
    /// Creates a table; the bounds are swapped if given in the wrong order
    /// and a non-positive or non-finite base falls back to `1.0`.
    #[must_use]
    pub fn new(min: ScaleLevel, max: ScaleLevel, base: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let base = if base.is_finite() && base > 0.0 {
            base
        } else {
            1.0
        };
        Self { min, max, base }
    }

    /// Builds the table described by a calendar's scale settings.
    #[must_use]
    pub fn from_settings(settings: &ScaleSettings) -> Self {
        Self::new(
            ScaleLevel(settings.min_level),
            ScaleLevel(settings.max_level),
            settings.base_time_per_pixel,
        )
    }

    /// Most zoomed-in level.
    #[must_use]
    pub fn min(&self) -> ScaleLevel {
        self.min
    }

    /// Most zoomed-out level.
    #[must_use]
    pub fn max(&self) -> ScaleLevel {
        self.max
    }

    /// Milliseconds per pixel at level zero.
    #[must_use]
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Clamps `level` into the table's range.
    #[must_use]
    pub fn clamp(&self, level: ScaleLevel) -> ScaleLevel {
        level.clamp(self.min, self.max)
    }

    /// Milliseconds of world time per pixel at `level`.
    #[must_use]
    pub fn time_per_pixel(&self, level: ScaleLevel) -> f64 {
        self.base * libm::exp2(f64::from(self.clamp(level).0))
    }

    /// The level whose time-per-pixel is nearest to `time_per_pixel`
    /// (nearest in log space), clamped into range.
    #[must_use]
    pub fn level_for_time_per_pixel(&self, time_per_pixel: f64) -> ScaleLevel {
        if time_per_pixel.is_nan() || time_per_pixel <= 0.0 {
            return self.min;
        }
        let exact = libm::log2(time_per_pixel / self.base);
        if !exact.is_finite() {
            return if exact > 0.0 { self.max } else { self.min };
        }
        let lo = f64::from(self.min.0);
        let hi = f64::from(self.max.0);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "rounded and clamped into the i32 level range first"
        )]
        let level = libm::round(exact).clamp(lo, hi) as i32;
        ScaleLevel(level)
    }

    /// Pixel distance covered by `time` at `level`.
    #[must_use]
    pub fn real_time_to_scaled_time(&self, time: f64, level: ScaleLevel) -> f64 {
        time / self.time_per_pixel(level)
    }

    /// World time covered by `pixels` at `level`; the exact inverse of
    /// [`real_time_to_scaled_time`](Self::real_time_to_scaled_time).
    #[must_use]
    pub fn scaled_time_to_real_time(&self, pixels: f64, level: ScaleLevel) -> f64 {
        pixels * self.time_per_pixel(level)
    }

    /// Like [`scaled_time_to_real_time`](Self::scaled_time_to_real_time),
    /// rounded to a timestamp inside the safe range.
    #[must_use]
    pub fn scaled_time_to_timestamp(&self, pixels: f64, level: ScaleLevel) -> Timestamp {
        time_from_f64(self.scaled_time_to_real_time(pixels, level))
    }
}

impl Default for ScaleTable {
    fn default() -> Self {
        Self::from_settings(&ScaleSettings::default())
    }
}

/// Rounds a floating-point time to the nearest safe timestamp.
pub(crate) fn time_from_f64(time: f64) -> Timestamp {
    if time.is_nan() {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float to int casts saturate and the result is clamped"
    )]
    let time = libm::round(time) as Timestamp;
    clamp_to_safe(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_per_pixel_doubles_per_level() {
        let table = ScaleTable::new(ScaleLevel(-3), ScaleLevel(10), 1.0);
        assert_eq!(table.time_per_pixel(ScaleLevel(0)), 1.0);
        assert_eq!(table.time_per_pixel(ScaleLevel(3)), 8.0);
        assert_eq!(table.time_per_pixel(ScaleLevel(-3)), 0.125);
        // Out-of-range levels are clamped.
        assert_eq!(table.time_per_pixel(ScaleLevel(40)), 1024.0);
    }

    #[test]
    fn nearest_level_snaps_in_log_space() {
        let table = ScaleTable::new(ScaleLevel(-3), ScaleLevel(10), 60_000.0);
        assert_eq!(table.level_for_time_per_pixel(60_000.0), ScaleLevel(0));
        assert_eq!(table.level_for_time_per_pixel(60_000.0 * 5.0), ScaleLevel(2));
        assert_eq!(table.level_for_time_per_pixel(1e30), ScaleLevel(10));
        assert_eq!(table.level_for_time_per_pixel(0.0), ScaleLevel(-3));
        assert_eq!(table.level_for_time_per_pixel(f64::NAN), ScaleLevel(-3));
    }

    #[test]
    fn swapped_bounds_and_bad_base_are_normalized() {
        let table = ScaleTable::new(ScaleLevel(4), ScaleLevel(-2), -1.0);
        assert_eq!(table.min(), ScaleLevel(-2));
        assert_eq!(table.max(), ScaleLevel(4));
        assert_eq!(table.base(), 1.0);
    }

    #[test]
    fn timestamps_are_rounded_and_clamped() {
        let table = ScaleTable::default();
        assert_eq!(table.scaled_time_to_timestamp(2.6, ScaleLevel(0)), 3);
        assert_eq!(
            table.scaled_time_to_timestamp(f64::MAX, ScaleLevel(0)),
            worldline_calendar::MAX_SAFE_TIME
        );
    }
}

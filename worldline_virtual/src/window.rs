// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use worldline_calendar::Timestamp;
use worldline_view::{ScaleLevel, ScrollSnapshot};

/// The view a culler filters against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CullView {
    /// Displayed scroll offset in pixels.
    pub scroll_pixels: f64,
    /// Current scale level.
    pub scale_level: ScaleLevel,
    /// Milliseconds per pixel at that level.
    pub time_per_pixel: f64,
    /// Viewport width in pixels.
    pub width: f64,
}

impl From<&ScrollSnapshot> for CullView {
    fn from(snapshot: &ScrollSnapshot) -> Self {
        Self {
            scroll_pixels: snapshot.displayed_scroll,
            scale_level: snapshot.scale_level,
            time_per_pixel: snapshot.time_per_pixel,
            width: snapshot.viewport_width,
        }
    }
}

impl CullView {
    /// Projected x of `time`.
    #[must_use]
    pub fn view_x(&self, time: Timestamp) -> f64 {
        time as f64 / self.time_per_pixel + self.scroll_pixels
    }

    /// Returns `true` if `time` projects into `[-padding, width + padding]`.
    #[must_use]
    pub fn contains(&self, time: Timestamp, padding_px: f64) -> bool {
        let x = self.view_x(time);
        x >= -padding_px && x <= self.width + padding_px
    }

    /// Whether a view change since `previous` calls for a fresh pass.
    pub(crate) fn moved_from(&self, previous: &Self, hysteresis_px: f64) -> bool {
        previous.scale_level != self.scale_level
            || previous.time_per_pixel != self.time_per_pixel
            || previous.width != self.width
            || (previous.scroll_pixels - self.scroll_pixels).abs() >= hysteresis_px
    }
}

/// Culling tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CullConfig {
    /// Pixels kept beyond each viewport edge.
    pub padding_px: f64,
    /// Scroll distance below which the previous result is kept.
    pub hysteresis_px: f64,
    /// Skip a marker whose following same-height marker projects closer
    /// than this. Zero disables occlusion.
    pub occlusion_px: f64,
}

impl CullConfig {
    /// Marker defaults: 1250 px padding, 100 px hysteresis, no occlusion.
    #[must_use]
    pub const fn markers() -> Self {
        Self {
            padding_px: 1250.0,
            hysteresis_px: 100.0,
            occlusion_px: 0.0,
        }
    }

    /// Divider defaults: 100 px padding and hysteresis.
    #[must_use]
    pub const fn dividers() -> Self {
        Self {
            padding_px: 100.0,
            hysteresis_px: 100.0,
            occlusion_px: 0.0,
        }
    }
}

impl Default for CullConfig {
    fn default() -> Self {
        Self::markers()
    }
}

/// The run of `items`, sorted by `time`, that projects into the padded view.
pub(crate) fn visible_range<T>(
    items: &[T],
    time: impl Fn(&T) -> Timestamp,
    view: &CullView,
    padding_px: f64,
) -> Range<usize> {
    let start = items.partition_point(|item| view.view_x(time(item)) < -padding_px);
    let end = start
        + items[start..].partition_point(|item| view.view_x(time(item)) <= view.width + padding_px);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(scroll: f64) -> CullView {
        CullView {
            scroll_pixels: scroll,
            scale_level: ScaleLevel(0),
            time_per_pixel: 1.0,
            width: 800.0,
        }
    }

    #[test]
    fn range_is_inclusive_of_padding_edges() {
        let times = [-200, -100, 0, 500, 900, 1_000];
        let range = visible_range(&times, |t| *t, &view(0.0), 100.0);
        assert_eq!(&times[range], &[-100, 0, 500, 900]);
    }

    #[test]
    fn scroll_shifts_the_window() {
        let times = [-200, -100, 0, 500, 900, 1_000];
        let range = visible_range(&times, |t| *t, &view(-150.0), 0.0);
        assert_eq!(&times[range], &[500, 900]);
    }

    #[test]
    fn hysteresis_gates_scroll_only() {
        let base = view(0.0);
        assert!(!view(99.0).moved_from(&base, 100.0));
        assert!(view(100.0).moved_from(&base, 100.0));
        let wider = CullView {
            width: 801.0,
            ..base
        };
        assert!(wider.moved_from(&base, 100.0));
    }
}

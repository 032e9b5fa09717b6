// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use worldline_calendar::{Timestamp, UnitRef};
use worldline_view::{ScaleLevel, ScrollSnapshot};

/// Visual weight of a divider, from the outermost presentation unit down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeClass {
    /// First presentation unit of the level.
    Large,
    /// Second presentation unit.
    Medium,
    /// Third presentation unit.
    Small,
    /// Fourth presentation unit.
    Smallest,
}

impl SizeClass {
    /// All classes, large first.
    pub const ALL: [Self; 4] = [Self::Large, Self::Medium, Self::Small, Self::Smallest];

    /// Class of the presentation unit at `index` within a level.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// A calendar-aligned gridline with its label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divider {
    /// Where the divider sits.
    pub timestamp: Timestamp,
    /// Visual weight.
    pub size_class: SizeClass,
    /// The calendar unit this divider marks.
    pub unit: UnitRef,
    /// Formatted label.
    pub label: String,
}

/// The visible stretch of the axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisWindow {
    /// Scroll offset in pixels.
    pub scroll_pixels: f64,
    /// Current scale level.
    pub scale_level: ScaleLevel,
    /// Milliseconds per pixel at `scale_level`.
    pub time_per_pixel: f64,
    /// Viewport width in pixels.
    pub width: f64,
}

impl AxisWindow {
    /// Times at the left and right viewport edges, widened by `padding_px`
    /// on each side.
    #[must_use]
    pub fn time_range(&self, padding_px: f64) -> (Timestamp, Timestamp) {
        let left = (-self.scroll_pixels - padding_px) * self.time_per_pixel;
        let right = (self.width - self.scroll_pixels + padding_px) * self.time_per_pixel;
        (to_time(left), to_time(right))
    }
}

impl From<&ScrollSnapshot> for AxisWindow {
    fn from(snapshot: &ScrollSnapshot) -> Self {
        Self {
            scroll_pixels: snapshot.displayed_scroll,
            scale_level: snapshot.scale_level,
            time_per_pixel: snapshot.time_per_pixel,
            width: snapshot.viewport_width,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate and the result is clamped"
)]
fn to_time(time: f64) -> Timestamp {
    worldline_calendar::clamp_to_safe(time as Timestamp)
}

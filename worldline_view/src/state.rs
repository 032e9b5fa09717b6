// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ScaleLevel;

/// The authoritative scroll position.
///
/// A screen x coordinate relates to world time `t` as
/// `x = t / time_per_pixel + scroll_pixels`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Scroll offset in pixels, always inside the current bounds.
    pub scroll_pixels: f64,
    /// Current zoom step.
    pub scale_level: ScaleLevel,
    /// Drag excess past the bounds, decaying to zero once released.
    pub overscroll_pixels: f64,
}

impl ScrollState {
    /// The offset a renderer should draw with: the scroll plus an elastic
    /// `sign(o) * |o|^exponent` share of the overscroll.
    #[must_use]
    pub fn displayed_scroll(&self, exponent: f64) -> f64 {
        let over = self.overscroll_pixels;
        if over == 0.0 {
            return self.scroll_pixels;
        }
        self.scroll_pixels + libm::copysign(libm::pow(libm::fabs(over), exponent), over)
    }
}

/// Valid range of [`ScrollState::scroll_pixels`] at one scale level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollBounds {
    /// Smallest scroll, which shows the latest representable time at x = 0.
    pub min: f64,
    /// Largest scroll, which shows the earliest representable time at x = 0.
    pub max: f64,
}

impl ScrollBounds {
    /// Bounds `∓max_time / time_per_pixel`.
    #[must_use]
    pub fn for_max_time(max_time: f64, time_per_pixel: f64) -> Self {
        let extent = libm::fabs(max_time / time_per_pixel);
        Self {
            min: -extent,
            max: extent,
        }
    }

    /// Clamps `scroll` into the bounds. NaN maps to zero.
    #[must_use]
    pub fn clamp(&self, scroll: f64) -> f64 {
        if scroll.is_nan() {
            return 0.0;
        }
        scroll.clamp(self.min, self.max)
    }

    /// Returns `true` if `scroll` lies inside the bounds.
    #[must_use]
    pub fn contains(&self, scroll: f64) -> bool {
        (self.min..=self.max).contains(&scroll)
    }
}

/// Read-only view of the scroll state handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSnapshot {
    /// Scroll offset inside the bounds.
    pub scroll_pixels: f64,
    /// Scroll including the elastic overscroll share; draw with this.
    pub displayed_scroll: f64,
    /// Raw overscroll excess.
    pub overscroll_pixels: f64,
    /// Current zoom step.
    pub scale_level: ScaleLevel,
    /// Milliseconds per pixel at `scale_level`.
    pub time_per_pixel: f64,
    /// Viewport width in pixels.
    pub viewport_width: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displayed_scroll_softens_overscroll() {
        let state = ScrollState {
            scroll_pixels: 100.0,
            scale_level: ScaleLevel(0),
            overscroll_pixels: 50.0,
        };
        let shown = state.displayed_scroll(0.85);
        assert!(shown > 100.0 && shown < 150.0, "{shown}");

        let below = ScrollState {
            overscroll_pixels: -50.0,
            ..state
        };
        assert!((below.displayed_scroll(0.85) - (200.0 - shown)).abs() < 1e-9);
    }

    #[test]
    fn bounds_are_symmetric() {
        let bounds = ScrollBounds::for_max_time(1_000.0, 4.0);
        assert_eq!(bounds.min, -250.0);
        assert_eq!(bounds.max, 250.0);
        assert_eq!(bounds.clamp(300.0), 250.0);
        assert_eq!(bounds.clamp(f64::NAN), 0.0);
        assert!(bounds.contains(-250.0));
    }
}

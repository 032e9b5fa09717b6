// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use worldline_axis::DividerConfig;
use worldline_layout::LayoutConfig;
use worldline_timing::CubicBezier;
use worldline_view::{ControllerConfig, WheelZoomConfig};
use worldline_virtual::CullConfig;

use crate::TimelineError;

/// Every tunable of a [`Timeline`](crate::Timeline).
///
/// Defaults match the usual feel: 300 ms zoom debounce and scroll
/// animation, 0.9 overscroll decay every 16 ms, 1250 px marker padding.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimelineConfig {
    /// Scale level at construction, clamped to the calendar's range.
    pub initial_scale_level: i32,
    /// Markers within this many pixels of the viewport are rendered.
    pub marker_padding_px: f64,
    /// Dividers are generated this far beyond the viewport.
    pub divider_padding_px: f64,
    /// Dividers within this many pixels of the viewport are rendered.
    pub divider_cull_padding_px: f64,
    /// Scroll distance before markers and rendered dividers are re-culled.
    pub culling_hysteresis_px: f64,
    /// Scroll distance before dividers are extended.
    pub divider_hysteresis_px: f64,
    /// Step limit per presentation unit and divider pass.
    pub divider_iteration_cap: usize,
    /// Height of one marker row.
    pub marker_row_height_px: f64,
    /// Minimum gap to the next same-height marker; zero keeps every marker.
    pub marker_occlusion_px: f64,
    /// Quiet period before accumulated zoom switches commit.
    pub zoom_debounce_ms: u64,
    /// Length of programmatic scroll animations.
    pub scroll_animation_ms: u64,
    /// Overscroll multiplier per decay tick.
    pub overscroll_decay_factor: f64,
    /// Time between decay ticks.
    pub overscroll_decay_interval_ms: u64,
    /// Exponent of the elastic overscroll curve.
    pub overscroll_exponent: f64,
    /// Wheel zoom sensitivity.
    pub wheel_zoom: WheelZoomConfig,
    /// Frame interval while animating.
    pub frame_interval_ms: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        let controller = ControllerConfig::default();
        let divider = DividerConfig::default();
        Self {
            initial_scale_level: 0,
            marker_padding_px: CullConfig::markers().padding_px,
            divider_padding_px: divider.padding_px,
            divider_cull_padding_px: CullConfig::dividers().padding_px,
            culling_hysteresis_px: CullConfig::markers().hysteresis_px,
            divider_hysteresis_px: divider.hysteresis_px,
            divider_iteration_cap: divider.iteration_cap,
            marker_row_height_px: LayoutConfig::default().marker_row_height_px,
            marker_occlusion_px: 0.0,
            zoom_debounce_ms: controller.zoom_debounce_ms,
            scroll_animation_ms: controller.scroll_animation_ms,
            overscroll_decay_factor: controller.overscroll_decay_factor,
            overscroll_decay_interval_ms: controller.overscroll_decay_interval_ms,
            overscroll_exponent: controller.overscroll_exponent,
            wheel_zoom: controller.wheel_zoom,
            frame_interval_ms: controller.frame_interval_ms,
        }
    }
}

impl TimelineConfig {
    /// Sets the initial scale level.
    #[must_use]
    pub fn with_initial_scale_level(mut self, level: i32) -> Self {
        self.initial_scale_level = level;
        self
    }

    /// Sets the marker culling padding.
    #[must_use]
    pub fn with_marker_padding(mut self, padding_px: f64) -> Self {
        self.marker_padding_px = padding_px;
        self
    }

    /// Sets the marker row height.
    #[must_use]
    pub fn with_marker_row_height(mut self, height_px: f64) -> Self {
        self.marker_row_height_px = height_px;
        self
    }

    /// Sets the zoom debounce period.
    #[must_use]
    pub fn with_zoom_debounce_ms(mut self, delay: u64) -> Self {
        self.zoom_debounce_ms = delay;
        self
    }

    /// Sets the scroll animation length; zero snaps.
    #[must_use]
    pub fn with_scroll_animation_ms(mut self, duration: u64) -> Self {
        self.scroll_animation_ms = duration;
        self
    }

    /// Sets the wheel zoom sensitivity.
    #[must_use]
    pub fn with_wheel_zoom(mut self, wheel_zoom: WheelZoomConfig) -> Self {
        self.wheel_zoom = wheel_zoom;
        self
    }

    /// Checks every value.
    ///
    /// # Errors
    ///
    /// [`TimelineError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> Result<(), TimelineError> {
        let checks: [(bool, &'static str); 12] = [
            (
                non_negative(self.marker_padding_px),
                "marker_padding_px must be finite and non-negative",
            ),
            (
                non_negative(self.divider_padding_px),
                "divider_padding_px must be finite and non-negative",
            ),
            (
                non_negative(self.divider_cull_padding_px),
                "divider_cull_padding_px must be finite and non-negative",
            ),
            (
                non_negative(self.culling_hysteresis_px),
                "culling_hysteresis_px must be finite and non-negative",
            ),
            (
                non_negative(self.divider_hysteresis_px),
                "divider_hysteresis_px must be finite and non-negative",
            ),
            (
                self.divider_iteration_cap > 0,
                "divider_iteration_cap must be positive",
            ),
            (
                positive(self.marker_row_height_px),
                "marker_row_height_px must be finite and positive",
            ),
            (
                non_negative(self.marker_occlusion_px),
                "marker_occlusion_px must be finite and non-negative",
            ),
            (
                (0.0..1.0).contains(&self.overscroll_decay_factor),
                "overscroll_decay_factor must be in [0, 1)",
            ),
            (
                positive(self.overscroll_exponent) && self.overscroll_exponent <= 1.0,
                "overscroll_exponent must be in (0, 1]",
            ),
            (
                self.overscroll_decay_interval_ms > 0 && self.frame_interval_ms > 0,
                "decay and frame intervals must be positive",
            ),
            (
                positive(self.wheel_zoom.pixels_per_switch)
                    && positive(self.wheel_zoom.line_multiplier)
                    && positive(self.wheel_zoom.page_multiplier),
                "wheel zoom sensitivity must be finite and positive",
            ),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(TimelineError::InvalidConfig { reason: *reason }),
            None => Ok(()),
        }
    }

    /// Settings for the scroll/zoom controller.
    #[must_use]
    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            zoom_debounce_ms: self.zoom_debounce_ms,
            scroll_animation_ms: self.scroll_animation_ms,
            overscroll_decay_factor: self.overscroll_decay_factor,
            overscroll_decay_interval_ms: self.overscroll_decay_interval_ms,
            overscroll_exponent: self.overscroll_exponent,
            frame_interval_ms: self.frame_interval_ms,
            wheel_zoom: self.wheel_zoom,
            easing: CubicBezier::SCROLL,
        }
    }

    /// Settings for the divider generator.
    #[must_use]
    pub fn dividers(&self) -> DividerConfig {
        DividerConfig {
            padding_px: self.divider_padding_px,
            hysteresis_px: self.divider_hysteresis_px,
            iteration_cap: self.divider_iteration_cap,
        }
    }

    /// Settings for marker culling.
    #[must_use]
    pub fn marker_culling(&self) -> CullConfig {
        CullConfig {
            padding_px: self.marker_padding_px,
            hysteresis_px: self.culling_hysteresis_px,
            occlusion_px: self.marker_occlusion_px,
        }
    }

    /// Settings for divider culling.
    #[must_use]
    pub fn divider_culling(&self) -> CullConfig {
        CullConfig {
            padding_px: self.divider_cull_padding_px,
            hysteresis_px: self.culling_hysteresis_px,
            occlusion_px: 0.0,
        }
    }

    /// Settings for the layout engine.
    #[must_use]
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            marker_row_height_px: self.marker_row_height_px,
        }
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(TimelineConfig::default().validate(), Ok(()));
        assert_eq!(TimelineConfig::default().controller(), ControllerConfig::default());
        assert_eq!(TimelineConfig::default().dividers(), DividerConfig::default());
        assert_eq!(TimelineConfig::default().marker_culling(), CullConfig::markers());
    }

    #[test]
    fn rejects_bad_values() {
        let nan = TimelineConfig::default().with_marker_padding(f64::NAN);
        assert!(matches!(
            nan.validate(),
            Err(TimelineError::InvalidConfig { reason }) if reason.starts_with("marker_padding_px")
        ));
        let flat = TimelineConfig::default().with_marker_row_height(0.0);
        assert!(flat.validate().is_err());
        let sticky = TimelineConfig {
            overscroll_decay_factor: 1.0,
            ..TimelineConfig::default()
        };
        assert!(sticky.validate().is_err());
        let numb = TimelineConfig::default().with_wheel_zoom(WheelZoomConfig {
            pixels_per_switch: -1.0,
            ..WheelZoomConfig::default()
        });
        assert!(numb.validate().is_err());
    }
}

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use worldline_axis::{Divider, DividerGenerator, SizeClass};

use crate::window::visible_range;
use crate::{CullConfig, CullView};

/// Picks the dividers worth rendering from a [`DividerGenerator`].
///
/// The generator keeps a wider padded run; this narrows it to the view with
/// its own padding. Call [`invalidate`](Self::invalidate) whenever the
/// generator reports a change.
#[derive(Clone, Debug)]
pub struct DividerCuller {
    config: CullConfig,
    visible: Vec<Divider>,
    last: Option<CullView>,
}

impl Default for DividerCuller {
    fn default() -> Self {
        Self::new(CullConfig::dividers())
    }
}

impl DividerCuller {
    /// Creates an empty culler.
    #[must_use]
    pub fn new(config: CullConfig) -> Self {
        Self {
            config,
            visible: Vec::new(),
            last: None,
        }
    }

    /// Forces the next [`update`](Self::update) to recompute.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Visible dividers, large level first, each level in time order.
    #[must_use]
    pub fn visible(&self) -> &[Divider] {
        &self.visible
    }

    /// Recomputes past the hysteresis or after [`invalidate`](Self::invalidate).
    ///
    /// Returns `true` if the visible set changed.
    pub fn update(&mut self, generator: &DividerGenerator, view: CullView) -> bool {
        if let Some(last) = &self.last {
            if !view.moved_from(last, self.config.hysteresis_px) {
                return false;
            }
        }
        let mut visible = Vec::with_capacity(self.visible.len());
        let mut level: Vec<&Divider> = Vec::new();
        for class in SizeClass::ALL {
            level.clear();
            level.extend(generator.level(class));
            let range = visible_range(&level, |d| d.timestamp, &view, self.config.padding_px);
            visible.extend(level[range].iter().map(|d| (*d).clone()));
        }
        self.last = Some(view);
        if visible == self.visible {
            return false;
        }
        tracing::trace!(count = visible.len(), "visible dividers recomputed");
        self.visible = visible;
        true
    }
}

#[cfg(test)]
mod tests {
    use worldline_axis::{AxisWindow, DividerConfig};
    use worldline_calendar::{PatternFormatter, presets};
    use worldline_view::ScaleLevel;

    use super::*;

    #[test]
    fn narrows_the_generated_run() {
        let calendar = presets::countup();
        let mut generator = DividerGenerator::new(DividerConfig::default());
        generator.regenerate(
            &calendar,
            &PatternFormatter,
            AxisWindow {
                scroll_pixels: 0.0,
                scale_level: ScaleLevel(0),
                time_per_pixel: 1.0,
                width: 800.0,
            },
        );
        let mut culler = DividerCuller::new(CullConfig {
            padding_px: 0.0,
            ..CullConfig::dividers()
        });
        let view = CullView {
            scroll_pixels: 0.0,
            scale_level: ScaleLevel(0),
            time_per_pixel: 1.0,
            width: 800.0,
        };
        assert!(culler.update(&generator, view));
        let large: Vec<_> = culler
            .visible()
            .iter()
            .filter(|d| d.size_class == SizeClass::Large)
            .map(|d| d.timestamp)
            .collect();
        assert_eq!(large, [0, 500]);
        assert!(culler.visible().iter().all(|d| (0..=800).contains(&d.timestamp)));
        assert!(!culler.update(&generator, view), "same view");
    }
}

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::CubicBezier;

/// Eased interpolation of a scalar over a time window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Value at `start`.
    pub from: f64,
    /// Value at `start + duration` and after.
    pub to: f64,
    /// Start time in milliseconds.
    pub start: u64,
    /// Length of the window in milliseconds.
    pub duration: u64,
    /// Timing curve.
    pub easing: CubicBezier,
}

impl Tween {
    /// Creates a tween from `from` to `to` starting at `start`.
    #[must_use]
    pub const fn new(from: f64, to: f64, start: u64, duration: u64, easing: CubicBezier) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Linear progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: u64) -> f64 {
        if self.duration == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        if elapsed >= self.duration {
            return 1.0;
        }
        elapsed as f64 / self.duration as f64
    }

    /// The interpolated value at `now`.
    #[must_use]
    pub fn value_at(&self, now: u64) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.ease(progress)
    }

    /// Returns `true` once the window has elapsed.
    #[must_use]
    pub fn is_finished(&self, now: u64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Heads for a new target, continuing from the value at `now` with a
    /// fresh window of the same duration.
    pub fn retarget(&mut self, now: u64, to: f64) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
    }
}

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A CSS-style cubic Bézier timing curve from `(0, 0)` to `(1, 1)`.
///
/// Control point x coordinates are clamped into `[0, 1]` so the curve stays
/// a function of time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl CubicBezier {
    /// Straight line.
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Symmetric ease-in-out used for scroll animations.
    pub const SCROLL: Self = Self::new(0.5, 0.0, 0.5, 1.0);

    /// Creates a curve with control points `(x1, y1)` and `(x2, y2)`.
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let x1 = x1.clamp(0.0, 1.0);
        let x2 = x2.clamp(0.0, 1.0);
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    /// Eased progress for linear progress `t`, clamped into `[0, 1]`.
    #[must_use]
    pub fn ease(&self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = self.solve_x(t);
        ((self.ay * s + self.by) * s + self.cy) * s
    }

    fn x_at(&self, s: f64) -> f64 {
        ((self.ax * s + self.bx) * s + self.cx) * s
    }

    fn dx_at(&self, s: f64) -> f64 {
        (3.0 * self.ax * s + 2.0 * self.bx) * s + self.cx
    }

    /// Parameter `s` with `x(s) == x`: Newton first, bisection as fallback.
    fn solve_x(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-9;
        let mut s = x;
        for _ in 0..8 {
            let err = self.x_at(s) - x;
            if libm::fabs(err) < EPSILON {
                return s;
            }
            let slope = self.dx_at(s);
            if libm::fabs(slope) < 1e-6 {
                break;
            }
            s -= err / slope;
            if !(0.0..=1.0).contains(&s) {
                break;
            }
        }
        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..64 {
            let value = self.x_at(s);
            if libm::fabs(value - x) < EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        s
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::LINEAR
    }
}

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariants for the scroll/zoom controller.
//!
//! 1. Pixel/time conversion round-trips at every scale level.
//! 2. A drag inside the bounds moves the scroll by exactly the drag delta.
//! 3. A drag past the bounds shows a softened overscroll that decays.
//! 4. Committing a zoom keeps the anchor time under the anchor pixel.

use proptest::prelude::*;
use worldline_view::{
    ControllerConfig, PointerInput, ScaleLevel, ScaleTable, ScrollController, ScrollTarget,
    ZoomAnchor, ZoomDirection,
};

const MAX_TIME: i64 = 1_000_000_000_000;

fn controller(level: i32) -> ScrollController {
    let scale = ScaleTable::new(ScaleLevel(-3), ScaleLevel(10), 60_000.0);
    let mut controller =
        ScrollController::new(scale, MAX_TIME, ScaleLevel(level), ControllerConfig::default());
    controller.set_viewport_width(1_000.0);
    controller
}

proptest! {
    #[test]
    fn conversion_round_trips(pixels in -1e9_f64..1e9, level in -3_i32..=10) {
        let table = ScaleTable::new(ScaleLevel(-3), ScaleLevel(10), 60_000.0);
        let level = ScaleLevel(level);
        let time = table.scaled_time_to_real_time(pixels, level);
        let back = table.real_time_to_scaled_time(time, level);
        prop_assert!((back - pixels).abs() <= 1e-6 * pixels.abs().max(1.0), "{} -> {}", pixels, back);
    }
}

proptest! {
    #[test]
    fn drag_within_bounds_moves_by_delta(
        start in -1e5_f64..1e5,
        moves in prop::collection::vec(-500.0_f64..500.0, 1..20),
    ) {
        let mut c = controller(0);
        c.scroll_to(ScrollTarget::Pixels(start), true, 0);
        let before = c.state().scroll_pixels;
        c.pointer_down(PointerInput::at(0.0, 0.0, 0));
        let mut x = 0.0;
        for dx in &moves {
            x += dx;
            c.pointer_move(PointerInput::at(x, 0.0, 1));
        }
        c.pointer_up(2);
        prop_assert!((c.state().scroll_pixels - (before + x)).abs() < 1e-6);
        prop_assert_eq!(c.state().overscroll_pixels, 0.0);
    }
}

proptest! {
    #[test]
    fn overscroll_is_soft_and_decays(excess in 2.0_f64..5_000.0, upward in any::<bool>()) {
        let mut c = controller(0);
        let bounds = c.bounds();
        let (bound, target) = if upward {
            (bounds.max, bounds.max + excess)
        } else {
            (bounds.min, bounds.min - excess)
        };
        c.pointer_down(PointerInput::at(0.0, 0.0, 0));
        c.pointer_move(PointerInput::at(target, 0.0, 1));
        let shown = c.displayed_scroll();
        let (lo, hi) = if upward { (bound, target) } else { (target, bound) };
        prop_assert!(shown > lo && shown < hi, "{} not strictly inside ({}, {})", shown, lo, hi);

        c.pointer_up(10);
        let mut now = 10;
        let mut gap = (c.displayed_scroll() - bound).abs();
        while c.state().overscroll_pixels != 0.0 {
            now += 16;
            c.tick(now);
            let next = (c.displayed_scroll() - bound).abs();
            prop_assert!(next <= gap);
            gap = next;
            prop_assert!(now < 100_000);
        }
        prop_assert_eq!(c.displayed_scroll(), bound);
    }
}

proptest! {
    #[test]
    fn zoom_keeps_anchor_pixel(
        level in -3_i32..=10,
        scroll in -1e6_f64..1e6,
        anchor_x in 0.0_f64..1_000.0,
        zoom_in in any::<bool>(),
        steps in 1_usize..4,
    ) {
        let mut c = controller(level);
        c.scroll_to(ScrollTarget::Pixels(scroll), true, 0);
        c.tick(0);
        let anchor_time = c.time_at_view_x(anchor_x);
        let direction = if zoom_in { ZoomDirection::In } else { ZoomDirection::Out };
        for _ in 0..steps {
            c.request_zoom(direction, ZoomAnchor::ViewX(anchor_x), 0);
        }
        c.tick(1_000);
        let bounds = c.bounds();
        let scroll = c.state().scroll_pixels;
        // Only meaningful when the new scroll was not clamped.
        if scroll > bounds.min && scroll < bounds.max {
            prop_assert!((c.view_x_of_time(anchor_time) - anchor_x).abs() <= 1.0);
        }
    }
}

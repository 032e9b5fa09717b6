// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Worldline View: the timeline's scale table and scroll/zoom controller.
//!
//! World time maps to viewport pixels as
//! `x = t / time_per_pixel(level) + scroll_pixels`, where
//! `time_per_pixel(level) = base * 2^level`. This crate owns that mapping:
//!
//! - [`ScaleTable`]: bounded scale levels and their time-per-pixel.
//! - [`ScrollController`]: the single writer of [`ScrollState`]. It handles
//!   pointer drags with elastic overscroll, wheel panning and zooming,
//!   debounced zoom commits that keep an anchor point fixed, and eased
//!   programmatic scrolling.
//! - [`HoverSet`]: the small set of hovered markers.
//!
//! The controller never reads a clock. Input handlers record intent and
//! [`ScrollController::tick`] performs time-driven work, returning at most one
//! coalesced notification per call.
//!
//! ## Example
//!
//! ```rust
//! use worldline_view::{
//!     ControllerConfig, PointerInput, ScaleLevel, ScaleTable, ScrollController, ZoomAnchor,
//!     ZoomDirection,
//! };
//!
//! let scale = ScaleTable::new(ScaleLevel(-3), ScaleLevel(10), 1.0);
//! let mut view = ScrollController::new(scale, 1_000_000, ScaleLevel(0), ControllerConfig::default());
//! view.set_viewport_width(800.0);
//!
//! // Drag 50 px to the right: earlier times come into view.
//! view.pointer_down(PointerInput::at(100.0, 10.0, 0));
//! view.pointer_move(PointerInput::at(150.0, 10.0, 8));
//! view.pointer_up(16);
//! assert_eq!(view.tick(16).scroll.map(|s| s.scroll_pixels), Some(50.0));
//!
//! // Zoom out around the cursor; the commit happens after the debounce.
//! let under_cursor = view.time_at_view_x(400.0);
//! view.request_zoom(ZoomDirection::Out, ZoomAnchor::ViewX(400.0), 20);
//! let update = view.tick(320);
//! assert_eq!(update.scale.map(|change| change.to), Some(ScaleLevel(1)));
//! assert!((view.view_x_of_time(under_cursor) - 400.0).abs() <= 1.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod controller;
mod drag;
mod hover;
mod input;
mod scale;
mod state;

pub use controller::{
    ControllerConfig, ControllerUpdate, Phase, ScaleChange, ScrollController,
    ScrollControllerDebugInfo, WheelZoomConfig,
};
pub use hover::HoverSet;
pub use input::{
    DeltaMode, Modifiers, PointerInput, ScrollTarget, WheelInput, ZoomAnchor, ZoomDirection,
};
pub use scale::{ScaleLevel, ScaleTable};
pub use state::{ScrollBounds, ScrollSnapshot, ScrollState};

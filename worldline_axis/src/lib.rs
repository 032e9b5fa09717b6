// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Worldline Axis: calendar-aligned dividers for a scrolling timeline.
//!
//! Each scale level of a calendar's presentation table names up to four
//! units, drawn as [`SizeClass::Large`] through [`SizeClass::Smallest`]
//! dividers. [`DividerGenerator`] produces them for the padded visible window
//! and keeps them current as the view scrolls:
//!
//! - Small scroll changes (below the hysteresis) are ignored.
//! - Moderate changes trim dividers that left the window and extend both ends.
//! - Scale, width, or calendar changes and long jumps regenerate everything.
//!
//! Every pass is bounded by an iteration cap, so a pathological calendar
//! cannot stall a frame.
//!
//! ## Example
//!
//! ```rust
//! use worldline_axis::{AxisWindow, DividerConfig, DividerGenerator, SizeClass};
//! use worldline_calendar::{PatternFormatter, presets};
//! use worldline_view::ScaleLevel;
//!
//! let calendar = presets::countup();
//! let mut axis = DividerGenerator::new(DividerConfig::default());
//! let window = AxisWindow {
//!     scroll_pixels: 0.0,
//!     scale_level: ScaleLevel(0),
//!     time_per_pixel: 1.0,
//!     width: 800.0,
//! };
//! axis.update(&calendar, &PatternFormatter, window);
//!
//! let large: Vec<_> = axis.level(SizeClass::Large).map(|d| d.label.as_str()).collect();
//! assert_eq!(large, ["0", "500", "1000"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod divider;
mod generator;

pub use divider::{AxisWindow, Divider, SizeClass};
pub use generator::{DividerConfig, DividerGenerator, DividerUpdate};

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Worldline Virtual: deciding which markers and dividers to render.
//!
//! A marker at time `t` projects to `x = t / time_per_pixel + scroll`. It is
//! rendered when `x` falls within `[-padding, width + padding]`, or when the
//! other end of one of its chain links does, so a chain running off screen
//! still shows its visible half. The window is found by binary search over
//! the layout's global position order.
//!
//! Both cullers cache their last result and only recompute once the scroll
//! moved by at least the hysteresis, or when the scale, viewport width or
//! input changed.
//!
//! ## Example
//!
//! ```rust
//! use worldline_layout::{EventInput, LayoutEngine};
//! use worldline_view::ScaleLevel;
//! use worldline_virtual::{CullConfig, CullView, MarkerCuller};
//!
//! let events = [EventInput::new("near", 0), EventInput::new("far", 100_000)];
//! let layout = LayoutEngine::default().layout(&events, &[], None);
//!
//! let mut culler = MarkerCuller::new(CullConfig::markers());
//! let view = CullView { scroll_pixels: 0.0, scale_level: ScaleLevel(0), time_per_pixel: 1.0, width: 800.0 };
//! culler.update(&layout, view);
//! assert_eq!(culler.visible().len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dividers;
mod markers;
mod window;

pub use dividers::DividerCuller;
pub use markers::MarkerCuller;
pub use window::{CullConfig, CullView};

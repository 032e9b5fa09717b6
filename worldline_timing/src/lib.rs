// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Worldline Timing: host-agnostic timers and easing.
//!
//! Nothing in this crate reads a system clock on its own. Every operation
//! takes the current time as a `now: u64` in milliseconds, usually obtained
//! from a [`Clock`]. Hosts drive the primitives from their event loop and
//! use [`TimerQueue::next_deadline`] to decide when to wake up next.
//!
//! - [`TimerQueue`]: cancellable one-shot timers carrying a payload.
//! - [`Debounce`]: keeps a single timer in a [`TimerQueue`] re-armed until
//!   a quiet period elapses.
//! - [`CubicBezier`] and [`Tween`]: eased interpolation of a scalar.
//!
//! ## Example
//!
//! ```rust
//! use worldline_timing::{Clock, CubicBezier, Debounce, ManualClock, TimerQueue, Tween};
//!
//! let clock = ManualClock::new(0);
//! let mut timers = TimerQueue::new();
//! let mut zoom = Debounce::new(300);
//! zoom.poke(&mut timers, clock.now_ms(), "commit zoom");
//! clock.advance(200);
//! zoom.poke(&mut timers, clock.now_ms(), "commit zoom");
//! clock.advance(200);
//! // Only 200 ms of quiet so far.
//! assert!(timers.pop_due(clock.now_ms()).is_none());
//! clock.advance(100);
//! let (id, action) = timers.pop_due(clock.now_ms()).unwrap();
//! assert!(zoom.fired(id));
//! assert_eq!(action, "commit zoom");
//!
//! let tween = Tween::new(0.0, 100.0, clock.now_ms(), 300, CubicBezier::SCROLL);
//! assert_eq!(tween.value_at(clock.now_ms() + 150), 50.0);
//! assert_eq!(tween.value_at(clock.now_ms() + 300), 100.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod clock;
mod debounce;
mod easing;
mod queue;
mod tween;

#[cfg(feature = "std")]
pub use clock::MonotonicClock;
pub use clock::{Clock, ManualClock};
pub use debounce::Debounce;
pub use easing::CubicBezier;
pub use queue::{TimerId, TimerQueue};
pub use tween::Tween;

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Worldline Timeline: a zoomable, scrollable timeline over fictional
//! calendars, as one context object.
//!
//! [`Timeline`] owns everything a timeline view needs and hands renderers
//! read-only results:
//!
//! - the calendar and a [`LabelFormatter`](worldline_calendar::LabelFormatter),
//! - the scroll/zoom controller from `worldline_view`,
//! - the divider generator from `worldline_axis`,
//! - the track and marker layout from `worldline_layout`,
//! - the marker and divider cullers from `worldline_virtual`,
//! - the hovered-marker set and a typed [`EventBus`].
//!
//! Nothing reads a wall clock directly. The host injects a
//! [`Clock`](worldline_timing::Clock), forwards input, and calls
//! [`Timeline::frame`] when [`Timeline::next_deadline`] is due. Each frame
//! publishes at most one event of each [`TimelineEventKind`], however many
//! pointer moves happened in between.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use worldline_calendar::presets;
//! use worldline_layout::EventInput;
//! use worldline_timeline::{Timeline, TimelineConfig, TimelineEvent, TimelineEventKind};
//! use worldline_timing::ManualClock;
//! use worldline_view::PointerInput;
//!
//! let clock = ManualClock::new(0);
//! let mut timeline = Timeline::new(presets::countup(), TimelineConfig::default(), &clock).unwrap();
//! timeline.set_viewport_width(800.0);
//! timeline.set_data(vec![EventInput::new("a", 0), EventInput::new("b", 100)], vec![]);
//!
//! timeline.frame();
//! assert_eq!(timeline.visible_markers().count(), 2);
//!
//! let scrolls = Rc::new(RefCell::new(Vec::new()));
//! let sink = scrolls.clone();
//! timeline.subscribe(TimelineEventKind::ScrollChanged, move |event| {
//!     if let TimelineEvent::ScrollChanged(snapshot) = event {
//!         sink.borrow_mut().push(snapshot.scroll_pixels);
//!     }
//! });
//!
//! // Three moves, one notification.
//! timeline.pointer_down(PointerInput::at(400.0, 20.0, 0));
//! for x in [410.0, 420.0, 430.0] {
//!     timeline.pointer_move(PointerInput::at(x, 20.0, 0));
//! }
//! clock.advance(16);
//! timeline.frame();
//! assert_eq!(*scrolls.borrow(), [30.0]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bus;
mod config;
mod error;
mod event;
mod timeline;

pub use bus::{BusEvent, EventBus, SubscriptionId};
pub use config::TimelineConfig;
pub use error::TimelineError;
pub use event::{TimelineEvent, TimelineEventKind};
pub use timeline::{FrameReport, Timeline};

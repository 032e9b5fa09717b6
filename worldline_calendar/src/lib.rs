// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Worldline Calendar: fictional calendars over millisecond timestamps.
//!
//! A calendar is an ordered list of [`TimeUnit`]s, smallest first. Each unit is
//! either a fixed number of milliseconds, a multiple of the unit below it, or a
//! table of variable-length months counted in the unit below. Timestamps are
//! signed 64-bit milliseconds, and negative times are first-class: splitting a
//! timestamp into fields always floors toward negative infinity.
//!
//! The crate provides:
//! - [`CalendarDefinition`]: a validated calendar with `to_fields` /
//!   `from_fields`, `floor`, `floor_aligned` and `step`.
//! - [`PresentationTable`]: which units are drawn as axis dividers at each
//!   scale level, in up to four size classes.
//! - [`LabelFormatter`] and the default [`PatternFormatter`].
//! - [`presets`]: ready-made calendars for tests and demos.
//!
//! ## Example
//!
//! ```rust
//! use worldline_calendar::{CalendarDefinition, MonthDef, TimeUnit, UnitRef};
//!
//! const DAY: i64 = 86_400_000;
//! let calendar = CalendarDefinition::new(
//!     "short",
//!     0,
//!     vec![
//!         TimeUnit::fixed("day", DAY),
//!         TimeUnit::months(
//!             "month",
//!             vec![MonthDef::new("Long", 31), MonthDef::new("Short", 15)],
//!         ),
//!         TimeUnit::multiple("year", 1),
//!     ],
//! )
//! .unwrap();
//!
//! let month = calendar.unit_by_name("month").unwrap();
//! // Day 40 falls into the second month.
//! let fields = calendar.to_fields(40 * DAY);
//! assert_eq!(fields.value(month), 1);
//! assert_eq!(calendar.floor(40 * DAY, month), 31 * DAY);
//! // Times before the epoch land in year -1.
//! assert_eq!(calendar.to_fields(-DAY).value(UnitRef(2)), -1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod calendar;
mod error;
mod fields;
mod label;
mod presentation;
mod unit;

pub mod presets;

/// Signed milliseconds of world time.
pub type Timestamp = i64;

pub use calendar::{CalendarDefinition, CalendarSpec, MAX_SAFE_TIME, ScaleSettings, clamp_to_safe};
pub use error::CalendarError;
pub use fields::CalendarFields;
pub use label::{LabelFormatter, PatternFormatter};
pub use presentation::{
    MAX_PRESENTATION_UNITS, PresentationLevel, PresentationTable, PresentationUnit, SpacingTargets,
};
pub use unit::{MonthDef, TimeUnit, UnitLength, UnitRef};

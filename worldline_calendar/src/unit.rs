// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time unit descriptions.

use alloc::string::String;
use alloc::vec::Vec;

/// Index of a unit inside a [`CalendarDefinition`](crate::CalendarDefinition).
///
/// Units are ordered smallest first, so `UnitRef(0)` is the finest unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnitRef(pub usize);

impl UnitRef {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One entry of a month table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthDef {
    /// Display name of the month.
    pub name: String,
    /// Length of the month, counted in the unit directly below the month unit.
    pub length: i64,
}

impl MonthDef {
    /// Creates a month entry.
    #[must_use]
    pub fn new(name: impl Into<String>, length: i64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// How long a unit is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitLength {
    /// A fixed duration in milliseconds.
    Fixed(i64),
    /// `n` times the previous (smaller) unit.
    ///
    /// When the previous unit is a month table this counts whole cycles of
    /// that table, which is how a "year" is expressed.
    Multiple(i64),
    /// A table of months whose lengths are counted in the previous unit.
    Months(Vec<MonthDef>),
}

/// A named unit of a calendar.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeUnit {
    /// Name used in label patterns, e.g. `"day"`.
    pub name: String,
    /// Length of the unit.
    pub length: UnitLength,
    /// Added to the zero-based field value when the value is displayed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_base: i64,
}

impl TimeUnit {
    /// A unit with a fixed duration in milliseconds.
    #[must_use]
    pub fn fixed(name: impl Into<String>, millis: i64) -> Self {
        Self {
            name: name.into(),
            length: UnitLength::Fixed(millis),
            display_base: 0,
        }
    }

    /// A unit spanning `count` of the previous unit.
    #[must_use]
    pub fn multiple(name: impl Into<String>, count: i64) -> Self {
        Self {
            name: name.into(),
            length: UnitLength::Multiple(count),
            display_base: 0,
        }
    }

    /// A month unit with the given table.
    #[must_use]
    pub fn months(name: impl Into<String>, months: Vec<MonthDef>) -> Self {
        Self {
            name: name.into(),
            length: UnitLength::Months(months),
            display_base: 0,
        }
    }

    /// Sets the display base.
    #[must_use]
    pub fn with_display_base(mut self, base: i64) -> Self {
        self.display_base = base;
        self
    }

    /// Returns `true` for the variable-length month unit.
    #[must_use]
    pub fn is_month(&self) -> bool {
        matches!(self.length, UnitLength::Months(_))
    }
}

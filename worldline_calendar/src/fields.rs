// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

use crate::{Timestamp, UnitRef};

/// Zero-based field values of a timestamp, one per calendar unit.
///
/// Values are indexed like the calendar's units (smallest first). The
/// remainder holds the milliseconds below the smallest unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CalendarFields {
    values: SmallVec<[i64; 8]>,
    remainder: Timestamp,
}

impl CalendarFields {
    /// Creates fields from raw values and a sub-unit remainder.
    #[must_use]
    pub fn from_parts(values: impl Into<SmallVec<[i64; 8]>>, remainder: Timestamp) -> Self {
        Self {
            values: values.into(),
            remainder,
        }
    }

    /// All values, smallest unit first.
    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Value of one unit, zero if the unit is out of range.
    #[must_use]
    pub fn value(&self, unit: UnitRef) -> i64 {
        self.values.get(unit.0).copied().unwrap_or(0)
    }

    /// Sets the value of one unit. Out-of-range units are ignored.
    pub fn set(&mut self, unit: UnitRef, value: i64) {
        if let Some(slot) = self.values.get_mut(unit.0) {
            *slot = value;
        }
    }

    /// Milliseconds below the smallest unit.
    #[must_use]
    pub fn remainder(&self) -> Timestamp {
        self.remainder
    }

    /// Zeroes every unit smaller than `unit`, and the remainder.
    pub fn truncate_below(&mut self, unit: UnitRef) {
        let end = unit.0.min(self.values.len());
        for value in &mut self.values[..end] {
            *value = 0;
        }
        self.remainder = 0;
    }
}

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Errors produced while validating a calendar or composing timestamps.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The configured time origin cannot be represented without precision loss.
    #[error("time origin too large: {origin} is not a safe integer")]
    OriginTooLarge {
        /// The rejected origin.
        origin: i64,
    },
    /// The configured maximum representable time is outside the safe range.
    #[error("maximum time {max_time} is outside the safe integer range")]
    MaxTimeOutOfRange {
        /// The rejected maximum.
        max_time: i64,
    },
    /// The calendar has no units at all.
    #[error("calendar defines no time units")]
    EmptyCalendar,
    /// A fixed or multiple unit has a zero or negative length.
    #[error("unit `{unit}` has a non-positive duration")]
    NonPositiveDuration {
        /// Name of the offending unit.
        unit: String,
    },
    /// The month unit has an empty month table.
    #[error("month unit `{unit}` has no months")]
    EmptyMonthTable {
        /// Name of the offending unit.
        unit: String,
    },
    /// A month entry has a zero or negative length.
    #[error("month `{month}` has a non-positive length")]
    NonPositiveMonthLength {
        /// Name of the offending month.
        month: String,
    },
    /// The month unit is the smallest unit, so there is no "day" to count in.
    #[error("month unit `{unit}` has no smaller unit to measure its lengths in")]
    MonthWithoutDayUnit {
        /// Name of the month unit.
        unit: String,
    },
    /// More than one unit is a month table.
    #[error("calendar defines more than one month unit")]
    MultipleMonthUnits,
    /// The unit right above the month table must count whole month cycles.
    #[error("unit `{unit}` above the month table must be a multiple of the month cycle")]
    MonthCycleMismatch {
        /// Name of the unit above the month table.
        unit: String,
    },
    /// A unit reference does not exist in this calendar.
    #[error("unit index {index} is out of range")]
    UnknownUnit {
        /// The rejected index.
        index: usize,
    },
    /// Composing a timestamp overflowed 64-bit arithmetic.
    #[error("timestamp arithmetic overflowed")]
    Overflow,
}

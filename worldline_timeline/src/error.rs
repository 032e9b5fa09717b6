// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use worldline_calendar::CalendarError;

/// Errors raised while setting up a [`Timeline`](crate::Timeline).
///
/// Once constructed, a timeline never fails: out-of-range input is clamped
/// and malformed data is laid out anyway.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    /// The calendar did not validate.
    #[error("invalid calendar: {0}")]
    Calendar(#[from] CalendarError),
    /// A configuration value is out of range.
    #[error("invalid timeline configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: &'static str,
    },
}

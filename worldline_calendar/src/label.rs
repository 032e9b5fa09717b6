// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning timestamps into display labels.
//!
//! Patterns contain `{unit}` placeholders, where `unit` is a unit name. A
//! placeholder may carry one modifier after a colon:
//!
//! - `{month:name}` prints the month name instead of its number.
//! - `{hour:02}` zero-pads the number to the given width.
//!
//! Unknown placeholders are copied through verbatim, and `{{` / `}}` print
//! literal braces.

use alloc::string::String;
use core::fmt::Write as _;

use crate::{CalendarDefinition, CalendarFields, Timestamp, UnitRef};

/// Formats a timestamp for display.
///
/// Hosts plug their own formatter into the timeline; [`PatternFormatter`] is
/// the default.
pub trait LabelFormatter {
    /// Formats `time` using `format`, or the calendar default when `None`.
    fn label(&self, calendar: &CalendarDefinition, time: Timestamp, format: Option<&str>)
    -> String;
}

impl<F> LabelFormatter for F
where
    F: Fn(&CalendarDefinition, Timestamp, Option<&str>) -> String,
{
    fn label(
        &self,
        calendar: &CalendarDefinition,
        time: Timestamp,
        format: Option<&str>,
    ) -> String {
        self(calendar, time, format)
    }
}

/// Expands `{unit}` placeholders against the calendar's fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct PatternFormatter;

impl LabelFormatter for PatternFormatter {
    fn label(
        &self,
        calendar: &CalendarDefinition,
        time: Timestamp,
        format: Option<&str>,
    ) -> String {
        let fields = calendar.to_fields(time);
        expand(calendar, &fields, format.unwrap_or(calendar.label_format()))
    }
}

fn expand(calendar: &CalendarDefinition, fields: &CalendarFields, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    while let Some(open) = rest.find(['{', '}']) {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        let placeholder = &tail[1..close];
        if !write_placeholder(&mut out, calendar, fields, placeholder) {
            out.push_str(&tail[..=close]);
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

fn write_placeholder(
    out: &mut String,
    calendar: &CalendarDefinition,
    fields: &CalendarFields,
    placeholder: &str,
) -> bool {
    let (name, modifier) = match placeholder.split_once(':') {
        Some((name, modifier)) => (name, Some(modifier)),
        None => (placeholder, None),
    };
    let Some(unit) = calendar.unit_by_name(name) else {
        return false;
    };
    let value = fields.value(unit);
    match modifier {
        Some("name") => {
            if let Some(month) = month_label(calendar, unit, value) {
                out.push_str(month);
                return true;
            }
            false
        }
        Some(width) => match width.parse::<usize>() {
            Ok(width) => {
                let shown = value + display_base(calendar, unit);
                let _ = write!(out, "{shown:0width$}");
                true
            }
            Err(_) => false,
        },
        None => {
            let shown = value + display_base(calendar, unit);
            let _ = write!(out, "{shown}");
            true
        }
    }
}

fn display_base(calendar: &CalendarDefinition, unit: UnitRef) -> i64 {
    calendar.unit(unit).map_or(0, |u| u.display_base)
}

fn month_label(calendar: &CalendarDefinition, unit: UnitRef, value: i64) -> Option<&str> {
    if calendar.month_unit() != Some(unit) {
        return None;
    }
    calendar.month_name(value)
}

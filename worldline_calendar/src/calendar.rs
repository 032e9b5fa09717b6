// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::presentation::{PresentationTable, PresentationUnit, SpacingTargets};
use crate::{CalendarError, CalendarFields, TimeUnit, Timestamp, UnitLength, UnitRef};

/// Largest magnitude a timestamp may have without losing precision when it
/// is projected through `f64` pixel math (`2^53 - 1`).
pub const MAX_SAFE_TIME: Timestamp = 9_007_199_254_740_991;

/// Clamps a timestamp into `[-MAX_SAFE_TIME, MAX_SAFE_TIME]`.
#[must_use]
pub fn clamp_to_safe(time: Timestamp) -> Timestamp {
    time.clamp(-MAX_SAFE_TIME, MAX_SAFE_TIME)
}

/// Scale level bounds and the time-per-pixel of level zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleSettings {
    /// Most zoomed-in level.
    pub min_level: i32,
    /// Most zoomed-out level.
    pub max_level: i32,
    /// Milliseconds of world time per pixel at level zero.
    pub base_time_per_pixel: f64,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            min_level: -3,
            max_level: 10,
            base_time_per_pixel: 1.0,
        }
    }
}

impl ScaleSettings {
    /// Milliseconds per pixel at `level`: `base * 2^level`.
    #[must_use]
    pub fn time_per_pixel(&self, level: i32) -> f64 {
        self.base_time_per_pixel * libm::exp2(f64::from(level))
    }
}

/// Month table lookups prepared at validation time.
#[derive(Clone, Debug, PartialEq, Eq)]
struct MonthCache {
    unit: usize,
    /// Start offset of every month inside one cycle, plus the cycle length.
    starts: Vec<Timestamp>,
}

impl MonthCache {
    fn len(&self) -> i64 {
        (self.starts.len() - 1) as i64
    }

    fn cycle(&self) -> Timestamp {
        self.starts[self.starts.len() - 1]
    }

    /// Month index containing `within`, which must lie in `[0, cycle)`.
    fn index_of(&self, within: Timestamp) -> usize {
        self.starts.partition_point(|start| *start <= within) - 1
    }
}

/// Serializable description of a calendar, validated into a [`CalendarDefinition`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarSpec {
    /// Calendar name.
    pub name: String,
    /// Timestamp of the calendar epoch (all fields zero).
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_offset: Timestamp,
    /// Units, smallest first.
    pub units: Vec<TimeUnit>,
    /// Scale level bounds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale: ScaleSettings,
    /// Largest representable time magnitude; defaults to [`MAX_SAFE_TIME`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_time: Option<Timestamp>,
    /// Default label pattern.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label_format: Option<String>,
    /// Divider units per scale level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub presentation: PresentationTable,
}

/// A validated, immutable calendar.
///
/// Timestamps are signed milliseconds. Field values are zero-based; see
/// [`TimeUnit::display_base`] for the value shown to users.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "CalendarSpec", into = "CalendarSpec")
)]
pub struct CalendarDefinition {
    name: String,
    base_offset: Timestamp,
    units: Vec<TimeUnit>,
    scale: ScaleSettings,
    max_time: Timestamp,
    label_format: String,
    presentation: PresentationTable,
    /// Span of each unit in milliseconds; the month unit holds its cycle.
    spans: Vec<Timestamp>,
    months: Option<MonthCache>,
}

impl TryFrom<CalendarSpec> for CalendarDefinition {
    type Error = CalendarError;

    fn try_from(spec: CalendarSpec) -> Result<Self, Self::Error> {
        let mut calendar = Self::new(spec.name, spec.base_offset, spec.units)?;
        calendar.scale = spec.scale;
        if let Some(max_time) = spec.max_time {
            calendar = calendar.with_max_time(max_time)?;
        }
        if let Some(format) = spec.label_format {
            calendar.label_format = format;
        }
        calendar.presentation = spec.presentation;
        Ok(calendar)
    }
}

impl From<CalendarDefinition> for CalendarSpec {
    fn from(calendar: CalendarDefinition) -> Self {
        Self {
            name: calendar.name,
            base_offset: calendar.base_offset,
            units: calendar.units,
            scale: calendar.scale,
            max_time: Some(calendar.max_time),
            label_format: Some(calendar.label_format),
            presentation: calendar.presentation,
        }
    }
}

impl CalendarDefinition {
    /// Validates units and builds a calendar.
    ///
    /// # Errors
    ///
    /// - [`CalendarError::OriginTooLarge`] if `base_offset` is not a safe integer.
    /// - A structural error if the unit list is empty, has non-positive lengths,
    ///   more than one month table, or a month table that cannot be measured.
    pub fn new(
        name: impl Into<String>,
        base_offset: Timestamp,
        units: Vec<TimeUnit>,
    ) -> Result<Self, CalendarError> {
        if base_offset.unsigned_abs() > MAX_SAFE_TIME.unsigned_abs() {
            return Err(CalendarError::OriginTooLarge {
                origin: base_offset,
            });
        }
        if units.is_empty() {
            return Err(CalendarError::EmptyCalendar);
        }

        let mut spans: Vec<Timestamp> = Vec::with_capacity(units.len());
        let mut months: Option<MonthCache> = None;
        for (index, unit) in units.iter().enumerate() {
            let span = match &unit.length {
                UnitLength::Fixed(millis) => {
                    if *millis <= 0 {
                        return Err(non_positive(unit));
                    }
                    *millis
                }
                UnitLength::Multiple(count) => {
                    if *count <= 0 || index == 0 {
                        return Err(non_positive(unit));
                    }
                    spans[index - 1]
                        .checked_mul(*count)
                        .ok_or(CalendarError::Overflow)?
                }
                UnitLength::Months(table) => {
                    if months.is_some() {
                        return Err(CalendarError::MultipleMonthUnits);
                    }
                    if index == 0 {
                        return Err(CalendarError::MonthWithoutDayUnit {
                            unit: unit.name.clone(),
                        });
                    }
                    if table.is_empty() {
                        return Err(CalendarError::EmptyMonthTable {
                            unit: unit.name.clone(),
                        });
                    }
                    let day = spans[index - 1];
                    let mut starts = Vec::with_capacity(table.len() + 1);
                    let mut offset: Timestamp = 0;
                    for month in table {
                        if month.length <= 0 {
                            return Err(CalendarError::NonPositiveMonthLength {
                                month: month.name.clone(),
                            });
                        }
                        starts.push(offset);
                        offset = month
                            .length
                            .checked_mul(day)
                            .and_then(|len| offset.checked_add(len))
                            .ok_or(CalendarError::Overflow)?;
                    }
                    starts.push(offset);
                    months = Some(MonthCache {
                        unit: index,
                        starts,
                    });
                    offset
                }
            };
            spans.push(span);
        }

        if let Some(cache) = &months {
            if let Some(above) = units.get(cache.unit + 1) {
                if !matches!(above.length, UnitLength::Multiple(_)) {
                    return Err(CalendarError::MonthCycleMismatch {
                        unit: above.name.clone(),
                    });
                }
            }
        }

        let label_format = default_label_format(&units);
        Ok(Self {
            name: name.into(),
            base_offset,
            units,
            scale: ScaleSettings::default(),
            max_time: MAX_SAFE_TIME,
            label_format,
            presentation: PresentationTable::new(),
            spans,
            months,
        })
    }

    /// Replaces the scale settings.
    #[must_use]
    pub fn with_scale(mut self, scale: ScaleSettings) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the largest representable time magnitude.
    ///
    /// # Errors
    ///
    /// [`CalendarError::MaxTimeOutOfRange`] if `max_time` is not positive or
    /// exceeds [`MAX_SAFE_TIME`].
    pub fn with_max_time(mut self, max_time: Timestamp) -> Result<Self, CalendarError> {
        if max_time <= 0 || max_time > MAX_SAFE_TIME {
            return Err(CalendarError::MaxTimeOutOfRange { max_time });
        }
        self.max_time = max_time;
        Ok(self)
    }

    /// Sets the default label pattern.
    #[must_use]
    pub fn with_label_format(mut self, format: impl Into<String>) -> Self {
        self.label_format = format.into();
        self
    }

    /// Replaces the presentation table.
    #[must_use]
    pub fn with_presentation(mut self, presentation: PresentationTable) -> Self {
        self.presentation = presentation;
        self
    }

    /// Derives the presentation table from candidates, see [`PresentationTable::auto`].
    #[must_use]
    pub fn with_auto_presentation(
        mut self,
        candidates: &[PresentationUnit],
        spacing: SpacingTargets,
    ) -> Self {
        self.presentation = PresentationTable::auto(&self, candidates, spacing);
        self
    }

    /// Calendar name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Timestamp at which every field is zero.
    #[must_use]
    pub fn base_offset(&self) -> Timestamp {
        self.base_offset
    }

    /// Units, smallest first.
    #[must_use]
    pub fn units(&self) -> &[TimeUnit] {
        &self.units
    }

    /// Looks up a unit.
    #[must_use]
    pub fn unit(&self, unit: UnitRef) -> Option<&TimeUnit> {
        self.units.get(unit.0)
    }

    /// Finds a unit by name.
    #[must_use]
    pub fn unit_by_name(&self, name: &str) -> Option<UnitRef> {
        self.units.iter().position(|u| u.name == name).map(UnitRef)
    }

    /// The month unit, if this calendar has one.
    #[must_use]
    pub fn month_unit(&self) -> Option<UnitRef> {
        self.months.as_ref().map(|m| UnitRef(m.unit))
    }

    /// Name of the month at `index` within its cycle.
    #[must_use]
    pub fn month_name(&self, index: i64) -> Option<&str> {
        let cache = self.months.as_ref()?;
        let UnitLength::Months(table) = &self.units[cache.unit].length else {
            return None;
        };
        let index = usize::try_from(index.rem_euclid(cache.len())).ok()?;
        table.get(index).map(|m| m.name.as_str())
    }

    /// Scale level bounds.
    #[must_use]
    pub fn scale(&self) -> &ScaleSettings {
        &self.scale
    }

    /// Largest representable time magnitude.
    #[must_use]
    pub fn max_time(&self) -> Timestamp {
        self.max_time
    }

    /// Default label pattern.
    #[must_use]
    pub fn label_format(&self) -> &str {
        &self.label_format
    }

    /// Divider units per scale level.
    #[must_use]
    pub fn presentation(&self) -> &PresentationTable {
        &self.presentation
    }

    /// Typical span of `unit` in milliseconds.
    ///
    /// Exact for fixed units; the average month length for the month unit.
    ///
    /// # Errors
    ///
    /// [`CalendarError::UnknownUnit`] for an out-of-range reference.
    pub fn unit_span(&self, unit: UnitRef) -> Result<Timestamp, CalendarError> {
        let span = *self
            .spans
            .get(unit.0)
            .ok_or(CalendarError::UnknownUnit { index: unit.0 })?;
        match &self.months {
            Some(cache) if cache.unit == unit.0 => Ok(span / cache.len()),
            _ => Ok(span),
        }
    }

    /// Splits a timestamp into zero-based field values.
    ///
    /// Each value counts units within the next larger unit: with a year
    /// above the month table, the month is its index within the year. Only
    /// the largest unit is an absolute count.
    #[must_use]
    pub fn to_fields(&self, time: Timestamp) -> CalendarFields {
        let mut values: SmallVec<[i64; 8]> = SmallVec::from_elem(0, self.units.len());
        let mut rem = time.saturating_sub(self.base_offset);
        for index in (0..self.units.len()).rev() {
            let span = self.spans[index];
            match &self.months {
                Some(cache) if cache.unit == index => {
                    let cycles = rem.div_euclid(span);
                    let within = rem.rem_euclid(span);
                    let month = cache.index_of(within);
                    values[index] = cycles * cache.len() + month as i64;
                    rem = within - cache.starts[month];
                }
                _ => {
                    values[index] = rem.div_euclid(span);
                    rem = rem.rem_euclid(span);
                }
            }
        }
        CalendarFields::from_parts(values, rem)
    }

    /// Value of one field at `time`, as matched by
    /// [`PresentationUnit::labeled_indices`].
    ///
    /// Same as the [`to_fields`](Self::to_fields) value, except that a month
    /// unit with no larger unit above it is reduced to its index within the
    /// month table.
    #[must_use]
    pub fn unit_value(&self, time: Timestamp, unit: UnitRef) -> i64 {
        let value = self.to_fields(time).value(unit);
        match &self.months {
            Some(cache) if cache.unit == unit.0 => value.rem_euclid(cache.len()),
            _ => value,
        }
    }

    /// Composes field values back into a timestamp.
    ///
    /// Values outside their natural range carry into larger units, so
    /// `from_fields` accepts month 13 or day 40.
    ///
    /// # Errors
    ///
    /// - [`CalendarError::UnknownUnit`] if `fields` has more values than units.
    /// - [`CalendarError::Overflow`] if the result does not fit in 64 bits.
    pub fn from_fields(&self, fields: &CalendarFields) -> Result<Timestamp, CalendarError> {
        let values = fields.values();
        if values.len() > self.units.len() {
            return Err(CalendarError::UnknownUnit {
                index: values.len() - 1,
            });
        }
        let mut total = self
            .base_offset
            .checked_add(fields.remainder())
            .ok_or(CalendarError::Overflow)?;
        for (index, value) in values.iter().enumerate() {
            let contribution = match &self.months {
                Some(cache) if cache.unit == index => {
                    let cycles = value.div_euclid(cache.len());
                    let month = value.rem_euclid(cache.len()) as usize;
                    cycles
                        .checked_mul(cache.cycle())
                        .and_then(|c| c.checked_add(cache.starts[month]))
                }
                _ => value.checked_mul(self.spans[index]),
            };
            total = contribution
                .and_then(|c| total.checked_add(c))
                .ok_or(CalendarError::Overflow)?;
        }
        Ok(total)
    }

    /// Start of the `unit` containing `time`.
    #[must_use]
    pub fn floor(&self, time: Timestamp, unit: UnitRef) -> Timestamp {
        self.floor_aligned(time, unit, 1)
    }

    /// Start of the `unit` containing `time`, with the unit's own field
    /// rounded down to a multiple of `step`.
    ///
    /// For the month unit the alignment is applied within the month cycle,
    /// so quarters always start at month indices 0, 3, 6 and 9.
    #[must_use]
    pub fn floor_aligned(&self, time: Timestamp, unit: UnitRef, step: i64) -> Timestamp {
        if unit.0 >= self.units.len() {
            return time;
        }
        let mut fields = self.to_fields(time);
        fields.truncate_below(unit);
        if step > 1 {
            let value = fields.value(unit);
            let aligned = match &self.months {
                Some(cache) if cache.unit == unit.0 => {
                    let within = value.rem_euclid(cache.len());
                    value - within.rem_euclid(step)
                }
                _ => value - value.rem_euclid(step),
            };
            fields.set(unit, aligned);
        }
        self.from_fields(&fields).unwrap_or(time)
    }

    /// Moves `time` by `count` units.
    ///
    /// Fixed units add a constant span. Stepping the month unit keeps the
    /// offset into the month; when the target month is shorter the excess
    /// spills into the month after it. Saturates instead of overflowing.
    #[must_use]
    pub fn step(&self, time: Timestamp, unit: UnitRef, count: i64) -> Timestamp {
        let Some(span) = self.spans.get(unit.0).copied() else {
            return time;
        };
        match &self.months {
            Some(cache) if cache.unit == unit.0 => {
                let mut fields = self.to_fields(time);
                fields.truncate_below(unit);
                let month_start = self.from_fields(&fields).unwrap_or(time);
                let offset = time.saturating_sub(month_start);
                fields.set(unit, fields.value(unit).saturating_add(count));
                match self.from_fields(&fields) {
                    Ok(target) => target.saturating_add(offset),
                    Err(_) if count < 0 => Timestamp::MIN,
                    Err(_) => Timestamp::MAX,
                }
            }
            _ => time.saturating_add(count.saturating_mul(span)),
        }
    }
}

fn non_positive(unit: &TimeUnit) -> CalendarError {
    CalendarError::NonPositiveDuration {
        unit: unit.name.clone(),
    }
}

/// Largest unit first, separated by spaces, e.g. `"{year} {month} {day}"`.
fn default_label_format(units: &[TimeUnit]) -> String {
    let mut format = String::new();
    for unit in units.iter().rev() {
        if !format.is_empty() {
            format.push(' ');
        }
        format.push('{');
        format.push_str(&unit.name);
        if unit.is_month() {
            format.push_str(":name");
        }
        format.push('}');
    }
    format
}

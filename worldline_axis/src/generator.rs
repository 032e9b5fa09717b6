// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::VecDeque;

use smallvec::SmallVec;
use worldline_calendar::{
    CalendarDefinition, LabelFormatter, MAX_PRESENTATION_UNITS, PresentationUnit, Timestamp,
};

use crate::{AxisWindow, Divider, SizeClass};

/// Tuning of a [`DividerGenerator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DividerConfig {
    /// Extra pixels generated beyond each viewport edge.
    pub padding_px: f64,
    /// Scroll distance below which [`DividerGenerator::update`] does nothing.
    pub hysteresis_px: f64,
    /// Maximum calendar steps per presentation unit and pass.
    pub iteration_cap: usize,
}

impl Default for DividerConfig {
    fn default() -> Self {
        Self {
            padding_px: 250.0,
            hysteresis_px: 100.0,
            iteration_cap: 1000,
        }
    }
}

/// What an [`update`](DividerGenerator::update) did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DividerUpdate {
    /// The scroll moved less than the hysteresis; nothing changed.
    Unchanged,
    /// Dividers were appended or dropped at the edges.
    Extended {
        /// Dividers added.
        added: usize,
        /// Dividers dropped.
        removed: usize,
    },
    /// Every level was rebuilt.
    Regenerated,
}

#[derive(Clone, Debug)]
struct Level {
    size_class: SizeClass,
    unit: PresentationUnit,
    dividers: VecDeque<Divider>,
}

/// Generates calendar-aligned dividers for the visible window.
///
/// Each scale level of the calendar's presentation table lists up to four
/// units. For every unit the generator keeps a strictly increasing run of
/// dividers covering the padded window, so a timestamp never repeats within
/// one size class, though two classes may share one.
#[derive(Clone, Debug, Default)]
pub struct DividerGenerator {
    config: DividerConfig,
    levels: SmallVec<[Level; MAX_PRESENTATION_UNITS]>,
    last: Option<AxisWindow>,
}

impl DividerGenerator {
    /// Creates an empty generator.
    #[must_use]
    pub fn new(config: DividerConfig) -> Self {
        Self {
            config,
            levels: SmallVec::new(),
            last: None,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &DividerConfig {
        &self.config
    }

    /// Forces the next [`update`](Self::update) to regenerate, e.g. after a
    /// calendar change.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// The window the dividers were last computed for.
    #[must_use]
    pub fn window(&self) -> Option<&AxisWindow> {
        self.last.as_ref()
    }

    /// Rebuilds every level for `window`.
    pub fn regenerate(
        &mut self,
        calendar: &CalendarDefinition,
        formatter: &dyn LabelFormatter,
        window: AxisWindow,
    ) {
        self.levels.clear();
        let (start, end) = window.time_range(self.config.padding_px);
        let units = calendar.presentation().level(window.scale_level.0);
        for (index, unit) in units.iter().enumerate() {
            let Some(size_class) = SizeClass::from_index(index) else {
                break;
            };
            let mut level = Level {
                size_class,
                unit: unit.clone(),
                dividers: VecDeque::new(),
            };
            let mut walk = Walk::new(calendar, formatter, self.config.iteration_cap, size_class);
            walk.fill(&mut level, start, end);
            self.levels.push(level);
        }
        self.last = Some(window);
        tracing::debug!(
            level = window.scale_level.0,
            units = self.levels.len(),
            dividers = self.len(),
            "dividers regenerated"
        );
    }

    /// Brings the dividers up to date with `window`.
    ///
    /// Regenerates when the scale level or width changed, after
    /// [`invalidate`](Self::invalidate), or when the scroll jumped further
    /// than a padded viewport. Otherwise scroll changes below the hysteresis
    /// are ignored and larger ones extend and trim the existing runs.
    pub fn update(
        &mut self,
        calendar: &CalendarDefinition,
        formatter: &dyn LabelFormatter,
        window: AxisWindow,
    ) -> DividerUpdate {
        let Some(last) = self.last else {
            self.regenerate(calendar, formatter, window);
            return DividerUpdate::Regenerated;
        };
        if last.scale_level != window.scale_level
            || last.width != window.width
            || last.time_per_pixel != window.time_per_pixel
        {
            self.regenerate(calendar, formatter, window);
            return DividerUpdate::Regenerated;
        }
        let moved = (window.scroll_pixels - last.scroll_pixels).abs();
        if moved < self.config.hysteresis_px {
            return DividerUpdate::Unchanged;
        }
        if moved > window.width + 2.0 * self.config.padding_px {
            self.regenerate(calendar, formatter, window);
            return DividerUpdate::Regenerated;
        }

        let (start, end) = window.time_range(self.config.padding_px);
        let mut added = 0;
        let mut removed = 0;
        for level in &mut self.levels {
            let before = level.dividers.len();
            level.dividers.retain(|d| d.timestamp >= start && d.timestamp <= end);
            removed += before - level.dividers.len();

            let mut walk =
                Walk::new(calendar, formatter, self.config.iteration_cap, level.size_class);
            let kept = level.dividers.len();
            if kept == 0 {
                walk.fill(level, start, end);
            } else {
                walk.extend_back(level, end);
                walk.extend_front(level, start);
            }
            added += level.dividers.len() - kept;
        }
        self.last = Some(window);
        tracing::trace!(added, removed, "dividers extended");
        DividerUpdate::Extended { added, removed }
    }

    /// All dividers, large level first, each level in time order.
    pub fn dividers(&self) -> impl Iterator<Item = &Divider> + '_ {
        self.levels.iter().flat_map(|level| level.dividers.iter())
    }

    /// Dividers of one size class in time order.
    pub fn level(&self, size_class: SizeClass) -> impl Iterator<Item = &Divider> + '_ {
        self.levels
            .iter()
            .filter(move |level| level.size_class == size_class)
            .flat_map(|level| level.dividers.iter())
    }

    /// The presentation unit drawn at `size_class`, if any.
    #[must_use]
    pub fn unit(&self, size_class: SizeClass) -> Option<&PresentationUnit> {
        self.levels
            .iter()
            .find(|level| level.size_class == size_class)
            .map(|level| &level.unit)
    }

    /// Total number of dividers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.iter().map(|level| level.dividers.len()).sum()
    }

    /// Returns `true` if there are no dividers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One pass over one presentation unit, bounded by the iteration cap.
struct Walk<'a> {
    calendar: &'a CalendarDefinition,
    formatter: &'a dyn LabelFormatter,
    cap: usize,
    size_class: SizeClass,
    steps: usize,
    warned: bool,
}

impl<'a> Walk<'a> {
    fn new(
        calendar: &'a CalendarDefinition,
        formatter: &'a dyn LabelFormatter,
        cap: usize,
        size_class: SizeClass,
    ) -> Self {
        Self {
            calendar,
            formatter,
            cap,
            size_class,
            steps: 0,
            warned: false,
        }
    }

    /// Counts one step. Returns `false` once the cap is reached.
    fn step(&mut self) -> bool {
        self.steps += 1;
        if self.steps >= self.cap {
            tracing::warn!(
                cap = self.cap,
                size_class = ?self.size_class,
                "divider generation stopped at its iteration cap"
            );
            return false;
        }
        if !self.warned && self.steps * 10 >= self.cap * 9 {
            self.warned = true;
            tracing::warn!(
                steps = self.steps,
                cap = self.cap,
                size_class = ?self.size_class,
                "divider generation is approaching its iteration cap"
            );
        }
        true
    }

    fn fill(&mut self, level: &mut Level, start: Timestamp, end: Timestamp) {
        let unit = &level.unit;
        let mut time = self.calendar.floor_aligned(start, unit.unit, unit.step);
        while time <= end {
            if time >= start {
                if let Some(divider) = self.divider(unit, time) {
                    level.dividers.push_back(divider);
                }
            }
            if !self.step() {
                break;
            }
            let Some(next) = self.next_after(unit, time) else {
                break;
            };
            time = next;
        }
    }

    fn extend_back(&mut self, level: &mut Level, end: Timestamp) {
        let Some(mut time) = level.dividers.back().map(|d| d.timestamp) else {
            return;
        };
        let unit = &level.unit;
        while self.step() {
            let Some(next) = self.next_after(unit, time) else {
                break;
            };
            if next > end {
                break;
            }
            if let Some(divider) = self.divider(unit, next) {
                level.dividers.push_back(divider);
            }
            time = next;
        }
    }

    fn extend_front(&mut self, level: &mut Level, start: Timestamp) {
        let Some(mut time) = level.dividers.front().map(|d| d.timestamp) else {
            return;
        };
        let unit = &level.unit;
        while self.step() {
            let Some(previous) = time.checked_sub(1) else {
                break;
            };
            let previous = self.calendar.floor_aligned(previous, unit.unit, unit.step);
            if previous < start {
                break;
            }
            if let Some(divider) = self.divider(unit, previous) {
                level.dividers.push_front(divider);
            }
            time = previous;
        }
    }

    /// The next aligned divider time strictly after `time`.
    fn next_after(&self, unit: &PresentationUnit, time: Timestamp) -> Option<Timestamp> {
        let stepped = self.calendar.step(time, unit.unit, unit.step);
        let aligned = self.calendar.floor_aligned(stepped, unit.unit, unit.step);
        if aligned > time {
            Some(aligned)
        } else if stepped > time {
            Some(stepped)
        } else {
            tracing::warn!(time, step = unit.step, "calendar step did not advance");
            None
        }
    }

    fn divider(&self, unit: &PresentationUnit, time: Timestamp) -> Option<Divider> {
        if !unit.accepts(self.calendar.unit_value(time, unit.unit)) {
            return None;
        }
        Some(Divider {
            timestamp: time,
            size_class: self.size_class,
            unit: unit.unit,
            label: self
                .formatter
                .label(self.calendar, time, unit.label_format.as_deref()),
        })
    }
}

impl core::fmt::Debug for Walk<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Walk")
            .field("cap", &self.cap)
            .field("size_class", &self.size_class)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

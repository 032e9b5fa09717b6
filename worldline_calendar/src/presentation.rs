// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which units are drawn as axis dividers at each scale level.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::{CalendarDefinition, UnitRef};

/// Maximum number of nested presentation units per scale level.
pub const MAX_PRESENTATION_UNITS: usize = 4;

/// Presentation units for one scale level, ordered large to smallest.
pub type PresentationLevel = SmallVec<[PresentationUnit; MAX_PRESENTATION_UNITS]>;

/// A unit drawn as dividers, stepped `step` at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresentationUnit {
    /// The calendar unit.
    pub unit: UnitRef,
    /// How many units lie between two dividers. Always at least 1.
    #[cfg_attr(feature = "serde", serde(default = "default_step"))]
    pub step: i64,
    /// When non-empty, only field values in this list produce a divider.
    #[cfg_attr(feature = "serde", serde(default))]
    pub labeled_indices: Vec<i64>,
    /// Label pattern overriding the calendar default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label_format: Option<String>,
}

#[cfg(feature = "serde")]
fn default_step() -> i64 {
    1
}

impl PresentationUnit {
    /// Dividers at every `step` of `unit`.
    #[must_use]
    pub fn new(unit: UnitRef, step: i64) -> Self {
        Self {
            unit,
            step: step.max(1),
            labeled_indices: Vec::new(),
            label_format: None,
        }
    }

    /// Restricts dividers to the listed field values.
    #[must_use]
    pub fn with_labeled_indices(mut self, indices: impl IntoIterator<Item = i64>) -> Self {
        self.labeled_indices = indices.into_iter().collect();
        self
    }

    /// Sets a label pattern for this unit.
    #[must_use]
    pub fn with_label_format(mut self, format: impl Into<String>) -> Self {
        self.label_format = Some(format.into());
        self
    }

    /// Returns `true` if a divider with the given field value should be emitted.
    #[must_use]
    pub fn accepts(&self, value: i64) -> bool {
        self.labeled_indices.is_empty() || self.labeled_indices.contains(&value)
    }
}

/// Target on-screen spacing, in pixels, for the four size classes.
///
/// Used by [`PresentationTable::auto`] to pick, for each scale level, the
/// finest candidate whose dividers are at least this far apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpacingTargets {
    /// Minimum spacing of the large dividers.
    pub large: f64,
    /// Minimum spacing of the medium dividers.
    pub medium: f64,
    /// Minimum spacing of the small dividers.
    pub small: f64,
    /// Minimum spacing of the smallest dividers.
    pub smallest: f64,
}

impl Default for SpacingTargets {
    fn default() -> Self {
        Self {
            large: 400.0,
            medium: 160.0,
            small: 60.0,
            smallest: 15.0,
        }
    }
}

impl SpacingTargets {
    fn as_array(&self) -> [f64; MAX_PRESENTATION_UNITS] {
        [self.large, self.medium, self.small, self.smallest]
    }
}

/// Presentation units keyed by scale level.
///
/// Levels with no entry produce no dividers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PresentationTable {
    levels: BTreeMap<i32, PresentationLevel>,
}

impl PresentationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the units for one scale level. Entries past the fourth are dropped.
    pub fn set_level(&mut self, level: i32, units: impl IntoIterator<Item = PresentationUnit>) {
        let units: PresentationLevel = units.into_iter().take(MAX_PRESENTATION_UNITS).collect();
        if units.is_empty() {
            self.levels.remove(&level);
        } else {
            self.levels.insert(level, units);
        }
    }

    /// Returns the units configured for `level`, large first.
    #[must_use]
    pub fn level(&self, level: i32) -> &[PresentationUnit] {
        self.levels.get(&level).map_or(&[], |units| units.as_slice())
    }

    /// Returns `true` if no level has any unit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterates configured levels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &[PresentationUnit])> + '_ {
        self.levels.iter().map(|(level, units)| (*level, units.as_slice()))
    }

    /// Derives a table for every scale level of `calendar`.
    ///
    /// `candidates` should be ordered from the finest to the coarsest spacing.
    /// For each level and size class the finest candidate whose projected
    /// spacing reaches the class target is chosen; a candidate is used for at
    /// most one class per level.
    #[must_use]
    pub fn auto(
        calendar: &CalendarDefinition,
        candidates: &[PresentationUnit],
        spacing: SpacingTargets,
    ) -> Self {
        let mut table = Self::new();
        let scale = calendar.scale();
        for level in scale.min_level..=scale.max_level {
            let time_per_pixel = scale.time_per_pixel(level);
            let mut picked: Vec<usize> = Vec::new();
            for target in spacing.as_array() {
                let choice = candidates.iter().position(|candidate| {
                    let span = calendar.unit_span(candidate.unit).unwrap_or(0);
                    let pixels = (span.saturating_mul(candidate.step)) as f64 / time_per_pixel;
                    pixels >= target
                });
                if let Some(index) = choice {
                    if !picked.contains(&index) {
                        picked.push(index);
                    }
                }
            }
            table.set_level(level, picked.into_iter().map(|i| candidates[i].clone()));
        }
        table
    }
}

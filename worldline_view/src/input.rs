// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture input types, in viewport-relative pixels.

use kurbo::Point;
use worldline_calendar::Timestamp;

bitflags::bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CTRL = 0b0010;
        /// Alt / Option.
        const ALT = 0b0100;
        /// Meta / Command / Super.
        const META = 0b1000;
    }
}

impl Modifiers {
    /// Returns `true` if a wheel event with these modifiers should zoom.
    #[must_use]
    pub fn zooms_wheel(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }
}

/// A pointer down or move event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Position relative to the timeline viewport.
    pub position: Point,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Event time in milliseconds.
    pub time: u64,
}

impl PointerInput {
    /// A pointer event at `(x, y)` with no modifiers.
    #[must_use]
    pub fn at(x: f64, y: f64, time: u64) -> Self {
        Self {
            position: Point::new(x, y),
            modifiers: Modifiers::empty(),
            time,
        }
    }
}

/// Unit of wheel deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    /// Deltas are pixels.
    #[default]
    Pixel,
    /// Deltas are lines.
    Line,
    /// Deltas are pages.
    Page,
}

/// A wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Pointer position relative to the timeline viewport.
    pub position: Point,
    /// Horizontal delta; positive moves toward later time.
    pub delta_x: f64,
    /// Vertical delta; positive moves toward later time, or zooms out.
    pub delta_y: f64,
    /// Unit of the deltas.
    pub delta_mode: DeltaMode,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Event time in milliseconds.
    pub time: u64,
}

impl WheelInput {
    /// A pixel-mode wheel event at `x` with the given deltas and no modifiers.
    #[must_use]
    pub fn pixels(x: f64, delta_x: f64, delta_y: f64, time: u64) -> Self {
        Self {
            position: Point::new(x, 0.0),
            delta_x,
            delta_y,
            delta_mode: DeltaMode::Pixel,
            modifiers: Modifiers::empty(),
            time,
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the delta mode.
    #[must_use]
    pub fn with_delta_mode(mut self, mode: DeltaMode) -> Self {
        self.delta_mode = mode;
        self
    }
}

/// Direction of a discrete zoom request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Less time per pixel.
    In,
    /// More time per pixel.
    Out,
}

impl ZoomDirection {
    /// Scale level change for one switch in this direction.
    #[must_use]
    pub fn switches(self) -> i32 {
        match self {
            Self::In => -1,
            Self::Out => 1,
        }
    }
}

/// Point that stays fixed on screen while a zoom commits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomAnchor {
    /// A viewport x coordinate, typically the cursor.
    ViewX(f64),
    /// The selected time, or the viewport centre when nothing is selected.
    Selection,
}

/// Target of a programmatic scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollTarget {
    /// Centre this time in the viewport.
    Timestamp(Timestamp),
    /// Set this raw scroll offset.
    Pixels(f64),
}

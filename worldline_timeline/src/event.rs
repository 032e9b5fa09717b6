// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use worldline_view::{ScaleChange, ScrollSnapshot};

use crate::BusEvent;

/// Notifications published by a [`Timeline`](crate::Timeline) frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimelineEvent {
    /// Scroll offset, overscroll or viewport width changed.
    ScrollChanged(ScrollSnapshot),
    /// The scale level was committed.
    ScaleChanged(ScaleChange),
    /// A new layout is in place.
    LayoutChanged {
        /// Revision of the new layout.
        revision: u64,
    },
    /// The rendered divider set changed.
    DividersChanged {
        /// Number of rendered dividers.
        count: usize,
    },
    /// The rendered marker set changed.
    MarkersChanged {
        /// Number of rendered markers.
        count: usize,
    },
    /// The hovered marker set changed.
    HoverChanged,
}

/// The kinds of [`TimelineEvent`], used to subscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimelineEventKind {
    /// See [`TimelineEvent::ScrollChanged`].
    ScrollChanged,
    /// See [`TimelineEvent::ScaleChanged`].
    ScaleChanged,
    /// See [`TimelineEvent::LayoutChanged`].
    LayoutChanged,
    /// See [`TimelineEvent::DividersChanged`].
    DividersChanged,
    /// See [`TimelineEvent::MarkersChanged`].
    MarkersChanged,
    /// See [`TimelineEvent::HoverChanged`].
    HoverChanged,
}

impl BusEvent for TimelineEvent {
    type Kind = TimelineEventKind;

    fn kind(&self) -> TimelineEventKind {
        match self {
            Self::ScrollChanged(_) => TimelineEventKind::ScrollChanged,
            Self::ScaleChanged(_) => TimelineEventKind::ScaleChanged,
            Self::LayoutChanged { .. } => TimelineEventKind::LayoutChanged,
            Self::DividersChanged { .. } => TimelineEventKind::DividersChanged,
            Self::MarkersChanged { .. } => TimelineEventKind::MarkersChanged,
            Self::HoverChanged => TimelineEventKind::HoverChanged,
        }
    }
}

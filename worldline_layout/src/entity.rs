// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use worldline_calendar::Timestamp;

/// Stable index of an entity within one [`TimelineLayout`](crate::TimelineLayout).
///
/// Indices are only meaningful for the layout that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityIndex(pub u32);

impl EntityIndex {
    /// The index as a `usize`.
    #[must_use]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

/// What point of an event's life a marker shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerType {
    /// The event was issued.
    IssuedAt,
    /// The event changed.
    DeltaState,
    /// The event was revoked.
    RevokedAt,
    /// Drag preview.
    Ghost,
}

impl MarkerType {
    /// The name used in entity keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IssuedAt => "issuedAt",
            Self::DeltaState => "deltaState",
            Self::RevokedAt => "revokedAt",
            Self::Ghost => "ghost",
        }
    }
}

/// A track identifier. The default track sorts before every named track.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TrackId {
    /// The implicit track for unassigned entities.
    Default,
    /// A user-defined track.
    Named(String),
}

impl TrackId {
    /// The id as host code spells it, with `"default"` for the default track.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Named(id) => id,
        }
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One marker on the timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineEntity {
    /// Id of the issued event, delta, or ghost this marker stands for.
    pub id: String,
    /// Id of the owning event.
    pub event_id: String,
    /// Key unique within the layout, e.g. `"e1:delta:d2"`.
    pub key: String,
    /// Kind of marker.
    pub marker_type: MarkerType,
    /// Where the marker sits.
    pub marker_position: Timestamp,
    /// Vertical slot within the track.
    pub marker_height: u32,
    /// Track the marker is drawn on.
    pub track_id: TrackId,
    /// Causally next marker of the same event.
    pub chain_entity: Option<EntityIndex>,
    /// Causally previous marker of the same event.
    pub chain_parent: Option<EntityIndex>,
    /// Next marker in time on the same track and height.
    pub following_entity: Option<EntityIndex>,
}

/// A laid-out track.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    /// Track id.
    pub id: TrackId,
    /// Display name.
    pub name: String,
    /// Sort key; the default track is `-inf`.
    pub position: f64,
    /// Whether markers on this track may be shown.
    pub visible: bool,
    /// Pixel height, `(max marker height + 2) * row height`.
    pub height: f64,
    /// Largest marker height on the track.
    pub max_marker_height: Option<u32>,
    /// Entities on this track in time order.
    pub entities: Vec<EntityIndex>,
}

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use worldline_calendar::Timestamp;

/// A domain event as supplied by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventInput {
    /// Event id, unique among events.
    pub id: String,
    /// Track the event belongs to; `None` is the default track.
    pub track_id: Option<String>,
    /// When the event was issued.
    pub timestamp: Timestamp,
    /// When the event was revoked, if it was.
    pub revoked_at: Option<Timestamp>,
    /// Changes to the event, in chain order.
    pub delta_states: Vec<DeltaInput>,
    /// Icon name, passed through to renderers.
    pub icon: Option<String>,
    /// Color, passed through to renderers.
    pub color: Option<String>,
    /// Display name.
    pub name: String,
}

impl EventInput {
    /// Creates an event on the default track.
    pub fn new(id: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            id: id.into(),
            timestamp,
            ..Self::default()
        }
    }

    /// Assigns the event to a track.
    #[must_use]
    pub fn on_track(mut self, track_id: impl Into<String>) -> Self {
        self.track_id = Some(track_id.into());
        self
    }

    /// Marks the event as revoked at `time`.
    #[must_use]
    pub fn revoked(mut self, time: Timestamp) -> Self {
        self.revoked_at = Some(time);
        self
    }

    /// Appends a delta state on the event's own track.
    #[must_use]
    pub fn with_delta(mut self, id: impl Into<String>, timestamp: Timestamp) -> Self {
        self.delta_states.push(DeltaInput {
            id: id.into(),
            timestamp,
            track_id: None,
        });
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// One change of an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeltaInput {
    /// Delta id, unique within its event.
    pub id: String,
    /// When the change happened.
    pub timestamp: Timestamp,
    /// Track override. `None` follows the event; a different id places the
    /// delta on that track.
    pub track_id: Option<String>,
}

/// A user-defined track.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackInput {
    /// Track id. The id `"default"` configures the implicit default track.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Sort key; lower positions come first.
    pub position: f64,
    /// Hidden tracks are laid out but never culled into view.
    #[cfg_attr(feature = "serde", serde(default = "visible_default"))]
    pub visible: bool,
}

#[cfg(feature = "serde")]
fn visible_default() -> bool {
    true
}

impl TrackInput {
    /// Creates a visible track.
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            visible: true,
        }
    }

    /// Sets visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A drag preview of an event at a new position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GhostMarker {
    /// The event being dragged.
    pub event_id: String,
    /// Track under the pointer; `None` is the default track.
    pub track_id: Option<String>,
    /// Where the event would land.
    pub position: Timestamp,
}

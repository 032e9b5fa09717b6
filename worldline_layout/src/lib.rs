// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Worldline Layout: tracks, event chains and marker heights.
//!
//! A layout pass expands every [`EventInput`] into timeline entities: one
//! `issuedAt` marker, one marker per delta state and an optional `revokedAt`
//! marker, chained in that order. Entities are grouped by track and stacked
//! into integer height slots so that no two chains on a track whose time
//! spans overlap share a slot, using the lowest free slot each time.
//!
//! The result, [`TimelineLayout`], is an arena: chain, parent and following
//! links are [`EntityIndex`]es, so a fresh pass never leaves stale references.
//!
//! Inputs are never rejected. Unknown track ids land on the default track,
//! a revoke before the issue still gets a slot, and a delta on a different
//! track than its event starts its own run there at the height of its
//! nearest placed ancestor.
//!
//! ## Example
//!
//! ```rust
//! use worldline_layout::{EventInput, LayoutConfig, LayoutEngine, MarkerType, TrackInput};
//!
//! let events = [
//!     EventInput::new("war", 0).with_delta("truce", 50).revoked(100),
//!     EventInput::new("famine", 40),
//!     EventInput::new("comet", 500).on_track("sky"),
//! ];
//! let tracks = [TrackInput::new("sky", "Sky", 1.0)];
//!
//! let mut engine = LayoutEngine::new(LayoutConfig::default());
//! let layout = engine.layout(&events, &tracks, None);
//!
//! let default = layout.track("default").unwrap();
//! let heights: Vec<_> = default
//!     .entities
//!     .iter()
//!     .map(|i| layout.entity(*i).unwrap())
//!     .map(|e| (e.key.as_str(), e.marker_height))
//!     .collect();
//! assert_eq!(
//!     heights,
//!     [
//!         ("war:issuedAt", 0),
//!         ("famine:issuedAt", 1),
//!         ("war:delta:truce", 0),
//!         ("war:revokedAt", 0),
//!     ]
//! );
//! // Two rows of padding above the highest slot.
//! assert_eq!(default.height, 3.0 * 40.0);
//!
//! let war = layout.entities_for_event("war").next().unwrap();
//! let kinds: Vec<_> = layout.chain(war).map(|i| layout.entity(i).unwrap().marker_type).collect();
//! assert_eq!(kinds, [MarkerType::IssuedAt, MarkerType::DeltaState, MarkerType::RevokedAt]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod entity;
mod heights;
mod input;
mod layout;

pub use entity::{EntityIndex, MarkerType, TimelineEntity, Track, TrackId};
pub use input::{DeltaInput, EventInput, GhostMarker, TrackInput};
pub use layout::{Chain, LayoutConfig, LayoutEngine, TimelineLayout};

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use worldline_calendar::Timestamp;

use crate::{
    EntityIndex, EventInput, GhostMarker, MarkerType, TimelineEntity, Track, TrackId, TrackInput,
    heights,
};

/// Layout tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Pixel height of one marker row.
    pub marker_row_height_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            marker_row_height_px: 40.0,
        }
    }
}

/// Produces [`TimelineLayout`]s and numbers them.
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
    revision: u64,
}

impl LayoutEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            revision: 0,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out `events` on `tracks`, plus an optional drag preview.
    ///
    /// Never fails: dangling track ids fall back to the default track and
    /// malformed events still receive a deterministic height.
    pub fn layout(
        &mut self,
        events: &[EventInput],
        tracks: &[TrackInput],
        ghost: Option<&GhostMarker>,
    ) -> TimelineLayout {
        self.revision += 1;
        let mut builder = Builder::new(tracks, self.config);
        for event in events {
            builder.push_event(event);
        }
        if let Some(ghost) = ghost {
            builder.push_ghost(ghost);
        }
        let layout = builder.finish(self.revision);
        tracing::debug!(
            revision = layout.revision,
            entities = layout.entities.len(),
            tracks = layout.tracks.len(),
            "layout pass"
        );
        layout
    }
}

/// The result of one layout pass.
///
/// Entities live in an arena; chain and following links are
/// [`EntityIndex`]es into it.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineLayout {
    revision: u64,
    entities: Vec<TimelineEntity>,
    tracks: Vec<Track>,
    by_position: Vec<EntityIndex>,
    by_event: HashMap<String, Vec<EntityIndex>>,
    max_link_span: u64,
}

impl TimelineLayout {
    /// Number of the pass that produced this layout; later passes are higher.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// One entity.
    #[must_use]
    pub fn entity(&self, index: EntityIndex) -> Option<&TimelineEntity> {
        self.entities.get(index.get())
    }

    /// All entities in arena order.
    #[must_use]
    pub fn entities(&self) -> &[TimelineEntity] {
        &self.entities
    }

    /// Every entity sorted by position, ties in arena order.
    #[must_use]
    pub fn by_position(&self) -> &[EntityIndex] {
        &self.by_position
    }

    /// Longest time distance between an entity and its chain successor.
    ///
    /// Zero when no entity is chained.
    #[must_use]
    pub fn max_link_span(&self) -> u64 {
        self.max_link_span
    }

    /// Tracks, default first, then by position.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Looks a track up by the id host code uses (`"default"` included).
    #[must_use]
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id.as_str() == id)
    }

    /// The track an entity is drawn on.
    #[must_use]
    pub fn track_of(&self, index: EntityIndex) -> Option<&Track> {
        let entity = self.entity(index)?;
        self.tracks.iter().find(|track| track.id == entity.track_id)
    }

    /// Walks a chain starting at `index` (inclusive).
    pub fn chain(&self, index: EntityIndex) -> Chain<'_> {
        Chain {
            layout: self,
            next: self.entity(index).map(|_| index),
        }
    }

    /// Entities of one event in chain order, ghost last.
    pub fn entities_for_event(&self, event_id: &str) -> impl Iterator<Item = EntityIndex> + '_ {
        self.by_event
            .get(event_id)
            .into_iter()
            .flat_map(|indices| indices.iter().copied())
    }

    /// Sum of all track heights.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.tracks.iter().map(|track| track.height).sum()
    }
}

/// Iterator over a chain. See [`TimelineLayout::chain`].
#[derive(Clone, Debug)]
pub struct Chain<'a> {
    layout: &'a TimelineLayout,
    next: Option<EntityIndex>,
}

impl Iterator for Chain<'_> {
    type Item = EntityIndex;

    fn next(&mut self) -> Option<EntityIndex> {
        let current = self.next?;
        self.next = self
            .layout
            .entity(current)
            .and_then(|entity| entity.chain_entity);
        Some(current)
    }
}

struct Builder<'a> {
    config: LayoutConfig,
    tracks: Vec<Track>,
    slots: HashMap<&'a str, usize>,
    entities: Vec<TimelineEntity>,
    track_of: Vec<usize>,
    by_event: HashMap<String, Vec<EntityIndex>>,
}

impl<'a> Builder<'a> {
    fn new(inputs: &'a [TrackInput], config: LayoutConfig) -> Self {
        let mut default = Track {
            id: TrackId::Default,
            name: String::from("Default"),
            position: f64::NEG_INFINITY,
            visible: true,
            height: 0.0,
            max_marker_height: None,
            entities: Vec::new(),
        };
        let mut named: Vec<&TrackInput> = Vec::new();
        for input in inputs {
            if input.id == TrackId::Default.as_str() {
                default.name.clone_from(&input.name);
                default.visible = input.visible;
            } else if named.iter().any(|other| other.id == input.id) {
                tracing::debug!(track = %input.id, "duplicate track id ignored");
            } else {
                named.push(input);
            }
        }
        named.sort_by(|a, b| a.position.total_cmp(&b.position).then_with(|| a.id.cmp(&b.id)));

        let mut tracks = Vec::with_capacity(named.len() + 1);
        tracks.push(default);
        let mut slots = HashMap::with_capacity(named.len());
        for input in named {
            slots.insert(input.id.as_str(), tracks.len());
            tracks.push(Track {
                id: TrackId::Named(input.id.clone()),
                name: input.name.clone(),
                position: input.position,
                visible: input.visible,
                height: 0.0,
                max_marker_height: None,
                entities: Vec::new(),
            });
        }
        Self {
            config,
            tracks,
            slots,
            entities: Vec::new(),
            track_of: Vec::new(),
            by_event: HashMap::new(),
        }
    }

    fn slot(&self, track_id: Option<&str>) -> usize {
        match track_id {
            None => 0,
            Some(id) if id == TrackId::Default.as_str() => 0,
            Some(id) => match self.slots.get(id) {
                Some(slot) => *slot,
                None => {
                    tracing::debug!(track = id, "unknown track, using the default track");
                    0
                }
            },
        }
    }

    fn push(
        &mut self,
        event_id: &str,
        id: &str,
        key: String,
        marker_type: MarkerType,
        position: Timestamp,
        slot: usize,
        parent: Option<EntityIndex>,
    ) -> EntityIndex {
        let index = entity_index(self.entities.len());
        if let Some(parent) = parent {
            self.entities[parent.get()].chain_entity = Some(index);
        }
        self.entities.push(TimelineEntity {
            id: id.to_string(),
            event_id: event_id.to_string(),
            key,
            marker_type,
            marker_position: position,
            marker_height: 0,
            track_id: self.tracks[slot].id.clone(),
            chain_entity: None,
            chain_parent: parent,
            following_entity: None,
        });
        self.track_of.push(slot);
        match self.by_event.get_mut(event_id) {
            Some(indices) => indices.push(index),
            None => {
                self.by_event.insert(event_id.to_string(), alloc::vec![index]);
            }
        }
        index
    }

    fn push_event(&mut self, event: &EventInput) {
        let id = event.id.as_str();
        let slot = self.slot(event.track_id.as_deref());
        let mut previous = self.push(
            id,
            id,
            format!("{id}:issuedAt"),
            MarkerType::IssuedAt,
            event.timestamp,
            slot,
            None,
        );
        for delta in &event.delta_states {
            let delta_slot = match delta.track_id.as_deref() {
                Some(own) if Some(own) != event.track_id.as_deref() => self.slot(Some(own)),
                _ => slot,
            };
            previous = self.push(
                id,
                &delta.id,
                format!("{id}:delta:{}", delta.id),
                MarkerType::DeltaState,
                delta.timestamp,
                delta_slot,
                Some(previous),
            );
        }
        if let Some(revoked_at) = event.revoked_at {
            self.push(
                id,
                id,
                format!("{id}:revokedAt"),
                MarkerType::RevokedAt,
                revoked_at,
                slot,
                Some(previous),
            );
        }
    }

    fn push_ghost(&mut self, ghost: &GhostMarker) {
        let id = ghost.event_id.as_str();
        let slot = self.slot(ghost.track_id.as_deref());
        self.push(
            id,
            id,
            format!("{id}:ghost"),
            MarkerType::Ghost,
            ghost.position,
            slot,
            None,
        );
    }

    fn finish(mut self, revision: u64) -> TimelineLayout {
        for (index, slot) in self.track_of.iter().enumerate() {
            if let Some(track) = self.tracks.get_mut(*slot) {
                track.entities.push(entity_index(index));
            }
        }
        let entities = &self.entities;
        for track in &mut self.tracks {
            track
                .entities
                .sort_by_key(|index| (entities[index.get()].marker_position, *index));
        }

        heights::assign(&mut self.entities, &self.track_of, &self.tracks);

        let row = self.config.marker_row_height_px;
        for track in &mut self.tracks {
            let max = track
                .entities
                .iter()
                .map(|index| self.entities[index.get()].marker_height)
                .max();
            track.max_marker_height = max;
            let rows = max.unwrap_or(0).saturating_add(2);
            track.height = f64::from(rows) * row;

            let mut last_at_height: HashMap<u32, EntityIndex> = HashMap::new();
            for index in track.entities.iter().rev() {
                let entity = &mut self.entities[index.get()];
                entity.following_entity = last_at_height.insert(entity.marker_height, *index);
            }
        }

        let mut by_position: Vec<EntityIndex> =
            (0..self.entities.len()).map(entity_index).collect();
        let entities = &self.entities;
        by_position.sort_by_key(|index| (entities[index.get()].marker_position, *index));
        let max_link_span = entities
            .iter()
            .filter_map(|entity| {
                let next = entities.get(entity.chain_entity?.get())?;
                Some(entity.marker_position.abs_diff(next.marker_position))
            })
            .max()
            .unwrap_or(0);

        TimelineLayout {
            revision,
            entities: self.entities,
            tracks: self.tracks,
            by_position,
            by_event: self.by_event,
            max_link_span,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "a layout never holds 2^32 entities"
)]
fn entity_index(index: usize) -> EntityIndex {
    EntityIndex(index as u32)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::DeltaInput;

    fn keys(layout: &TimelineLayout, track: &str) -> Vec<(String, u32)> {
        layout
            .track(track)
            .unwrap()
            .entities
            .iter()
            .map(|i| {
                let entity = layout.entity(*i).unwrap();
                (entity.key.clone(), entity.marker_height)
            })
            .collect()
    }

    #[test]
    fn tracks_sort_default_first_then_position() {
        let tracks = [
            TrackInput::new("b", "B", 2.0),
            TrackInput::new("a", "A", -5.0),
            TrackInput::new("c", "C", 2.0),
        ];
        let layout = LayoutEngine::default().layout(&[], &tracks, None);
        let ids: Vec<_> = layout.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["default", "a", "b", "c"]);
        for track in layout.tracks() {
            assert_eq!(track.height, 80.0, "empty tracks keep two rows");
            assert_eq!(track.max_marker_height, None);
        }
    }

    #[test]
    fn default_track_can_be_configured() {
        let tracks = [TrackInput::new("default", "Misc", 0.0).with_visible(false)];
        let layout = LayoutEngine::default().layout(&[], &tracks, None);
        assert_eq!(layout.tracks().len(), 1);
        assert_eq!(layout.tracks()[0].name, "Misc");
        assert!(!layout.tracks()[0].visible);
    }

    #[test]
    fn dangling_track_falls_back_to_default() {
        let events = [EventInput::new("e", 10).on_track("gone")];
        let layout = LayoutEngine::default().layout(&events, &[], None);
        assert_eq!(keys(&layout, "default"), [("e:issuedAt".to_string(), 0)]);
        assert_eq!(layout.entities()[0].track_id, TrackId::Default);
    }

    #[test]
    fn revoke_before_issue_still_gets_a_slot() {
        let events = [
            EventInput::new("odd", 100).revoked(20),
            EventInput::new("mid", 50),
            EventInput::new("late", 150),
        ];
        let layout = LayoutEngine::default().layout(&events, &[], None);
        assert_eq!(
            keys(&layout, "default"),
            [
                ("odd:revokedAt".to_string(), 0),
                ("mid:issuedAt".to_string(), 1),
                ("odd:issuedAt".to_string(), 0),
                ("late:issuedAt".to_string(), 0),
            ]
        );
    }

    #[test]
    fn delta_on_another_track_inherits_height() {
        let tracks = [TrackInput::new("other", "Other", 1.0)];
        let mut event = EventInput::new("e", 0).with_delta("d1", 10).revoked(30);
        event.delta_states.push(DeltaInput {
            id: "d2".into(),
            timestamp: 20,
            track_id: Some("other".into()),
        });
        let events = [EventInput::new("blocker", 0).revoked(5), event];
        let layout = LayoutEngine::default().layout(&events, &tracks, None);
        // `e` takes slot 1 on the default track because `blocker` holds 0.
        assert_eq!(
            keys(&layout, "default"),
            [
                ("blocker:issuedAt".to_string(), 0),
                ("e:issuedAt".to_string(), 1),
                ("blocker:revokedAt".to_string(), 0),
                ("e:delta:d1".to_string(), 1),
                ("e:revokedAt".to_string(), 1),
            ]
        );
        assert_eq!(keys(&layout, "other"), [("e:delta:d2".to_string(), 1)]);
        // The chain still runs through the other track.
        let issued = layout.entities_for_event("e").next().unwrap();
        assert_eq!(layout.chain(issued).count(), 4);
    }

    #[test]
    fn following_links_same_height() {
        let events = [
            EventInput::new("a", 0).revoked(100),
            EventInput::new("b", 50),
            EventInput::new("c", 200),
        ];
        let layout = LayoutEngine::default().layout(&events, &[], None);
        let by_key = |key: &str| {
            layout
                .entities()
                .iter()
                .position(|e| e.key == key)
                .map(entity_index)
                .unwrap()
        };
        let a = layout.entity(by_key("a:issuedAt")).unwrap();
        assert_eq!(a.following_entity, Some(by_key("a:revokedAt")));
        let revoked = layout.entity(by_key("a:revokedAt")).unwrap();
        assert_eq!(revoked.following_entity, Some(by_key("c:issuedAt")));
        let b = layout.entity(by_key("b:issuedAt")).unwrap();
        assert_eq!(b.marker_height, 1);
        assert_eq!(b.following_entity, None);
    }

    #[test]
    fn ghost_is_laid_out_unchained() {
        let ghost = GhostMarker {
            event_id: "a".into(),
            track_id: None,
            position: 10,
        };
        let events = [EventInput::new("a", 0).revoked(100)];
        let layout = LayoutEngine::default().layout(&events, &[], Some(&ghost));
        let ghost_index = layout.entities_for_event("a").last().unwrap();
        let ghost = layout.entity(ghost_index).unwrap();
        assert_eq!(ghost.marker_type, MarkerType::Ghost);
        assert_eq!(ghost.key, "a:ghost");
        assert_eq!(ghost.chain_parent, None);
        assert_eq!(ghost.marker_height, 1);
    }

    #[test]
    fn max_link_span_covers_the_longest_chain_step() {
        let events = [
            EventInput::new("short", 0).with_delta("d", 10).revoked(15),
            EventInput::new("backwards", 500).revoked(-200),
            EventInput::new("single", 9_000),
        ];
        let layout = LayoutEngine::default().layout(&events, &[], None);
        assert_eq!(layout.max_link_span(), 700);

        let unchained = LayoutEngine::default().layout(&[EventInput::new("a", 5)], &[], None);
        assert_eq!(unchained.max_link_span(), 0);
    }

    #[test]
    fn revisions_increase() {
        let mut engine = LayoutEngine::new(LayoutConfig {
            marker_row_height_px: 10.0,
        });
        let first = engine.layout(&[], &[], None);
        let second = engine.layout(&[], &[], None);
        assert!(second.revision() > first.revision());
        assert_eq!(second.total_height(), 20.0);
    }

    #[test]
    fn by_position_is_global() {
        let tracks = [TrackInput::new("t", "T", 0.0)];
        let events = [
            EventInput::new("x", 30).on_track("t"),
            EventInput::new("y", 10),
            EventInput::new("z", 20).on_track("t"),
        ];
        let layout = LayoutEngine::default().layout(&events, &tracks, None);
        let positions: Vec<_> = layout
            .by_position()
            .iter()
            .map(|i| layout.entity(*i).unwrap().marker_position)
            .collect();
        assert_eq!(positions, vec![10, 20, 30]);
    }
}

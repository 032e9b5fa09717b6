// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker height assignment.
//!
//! Within a track, a chain is cut into segments: maximal runs of chained
//! entities that stay on the track. A segment whose first entity has no
//! chain parent is free and gets the lowest height not held by any segment
//! whose time span overlaps its own. Every other segment is an orphan (its
//! parent lives on another track) and reuses the height of its nearest
//! ancestor.

use alloc::vec::Vec;

use smallvec::SmallVec;
use worldline_calendar::Timestamp;

use crate::{EntityIndex, TimelineEntity, Track};

struct Segment {
    start: Timestamp,
    end: Timestamp,
    members: SmallVec<[EntityIndex; 8]>,
}

pub(crate) fn assign(entities: &mut [TimelineEntity], track_of: &[usize], tracks: &[Track]) {
    let mut assigned = alloc::vec![false; entities.len()];
    let mut orphans: Vec<Segment> = Vec::new();

    for (slot, track) in tracks.iter().enumerate() {
        let mut free: Vec<Segment> = Vec::new();
        for &index in &track.entities {
            let parent = entities[index.get()].chain_parent;
            let starts_segment = parent.is_none_or(|p| track_of[p.get()] != slot);
            if !starts_segment {
                continue;
            }
            let segment = collect_segment(entities, track_of, slot, index);
            if parent.is_none() {
                free.push(segment);
            } else {
                orphans.push(segment);
            }
        }

        free.sort_by_key(|segment| (segment.start, segment.members[0]));
        let mut active: Vec<(Timestamp, u32)> = Vec::new();
        for segment in free {
            active.retain(|(end, _)| *end >= segment.start);
            let height = lowest_free(&active);
            for member in &segment.members {
                entities[member.get()].marker_height = height;
                assigned[member.get()] = true;
            }
            active.push((segment.end, height));
        }
    }

    for segment in orphans {
        let height = inherited_height(entities, &assigned, segment.members[0]);
        for member in &segment.members {
            entities[member.get()].marker_height = height;
            assigned[member.get()] = true;
        }
    }
}

fn collect_segment(
    entities: &[TimelineEntity],
    track_of: &[usize],
    slot: usize,
    first: EntityIndex,
) -> Segment {
    let position = entities[first.get()].marker_position;
    let mut segment = Segment {
        start: position,
        end: position,
        members: SmallVec::new(),
    };
    let mut cursor = Some(first);
    while let Some(index) = cursor {
        if track_of[index.get()] != slot {
            break;
        }
        let entity = &entities[index.get()];
        segment.start = segment.start.min(entity.marker_position);
        segment.end = segment.end.max(entity.marker_position);
        segment.members.push(index);
        cursor = entity.chain_entity;
    }
    segment
}

fn lowest_free(active: &[(Timestamp, u32)]) -> u32 {
    let mut taken: SmallVec<[u32; 16]> = active.iter().map(|(_, height)| *height).collect();
    taken.sort_unstable();
    let mut candidate = 0;
    for height in taken {
        if height == candidate {
            candidate += 1;
        } else if height > candidate {
            break;
        }
    }
    candidate
}

/// Height of the nearest already placed ancestor, or 0.
fn inherited_height(entities: &[TimelineEntity], assigned: &[bool], first: EntityIndex) -> u32 {
    let mut cursor = entities[first.get()].chain_parent;
    while let Some(index) = cursor {
        if assigned[index.get()] {
            return entities[index.get()].marker_height;
        }
        cursor = entities[index.get()].chain_parent;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::lowest_free;

    #[test]
    fn lowest_free_fills_gaps() {
        assert_eq!(lowest_free(&[]), 0);
        assert_eq!(lowest_free(&[(5, 0), (9, 1)]), 2);
        assert_eq!(lowest_free(&[(5, 2), (9, 0), (3, 0)]), 1);
    }
}

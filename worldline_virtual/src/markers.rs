// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use worldline_layout::{EntityIndex, TimelineLayout};

use crate::window::visible_range;
use crate::{CullConfig, CullView};

/// Picks the markers worth rendering.
///
/// A marker is kept when it projects into the padded view, when its chain
/// partner does, or when the link to its partner crosses the whole view.
/// Markers on hidden tracks are dropped.
#[derive(Clone, Debug, Default)]
pub struct MarkerCuller {
    config: CullConfig,
    visible: Vec<EntityIndex>,
    last: Option<(CullView, u64)>,
}

impl MarkerCuller {
    /// Creates an empty culler.
    #[must_use]
    pub fn new(config: CullConfig) -> Self {
        Self {
            config,
            visible: Vec::new(),
            last: None,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &CullConfig {
        &self.config
    }

    /// Forces the next [`update`](Self::update) to recompute.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Visible markers in time order.
    #[must_use]
    pub fn visible(&self) -> &[EntityIndex] {
        &self.visible
    }

    /// Recomputes the visible set if the view moved past the hysteresis or
    /// its scale, width or the layout changed.
    ///
    /// Returns `true` if the visible set changed.
    pub fn update(&mut self, layout: &TimelineLayout, view: CullView) -> bool {
        if let Some((last, revision)) = &self.last {
            if *revision == layout.revision() && !view.moved_from(last, self.config.hysteresis_px)
            {
                return false;
            }
        }
        let visible = self.compute(layout, &view);
        self.last = Some((view, layout.revision()));
        if visible == self.visible {
            return false;
        }
        tracing::trace!(
            before = self.visible.len(),
            after = visible.len(),
            "visible markers recomputed"
        );
        self.visible = visible;
        true
    }

    fn compute(&self, layout: &TimelineLayout, view: &CullView) -> Vec<EntityIndex> {
        let padding = self.config.padding_px;
        let order = layout.by_position();
        let position = |index: &EntityIndex| {
            layout
                .entity(*index)
                .map_or(0, |entity| entity.marker_position)
        };
        let range = visible_range(order, position, view, padding);

        let mut visible: Vec<EntityIndex> = order[range.clone()].to_vec();
        for index in &order[range.clone()] {
            let Some(entity) = layout.entity(*index) else {
                continue;
            };
            for partner in [entity.chain_parent, entity.chain_entity].into_iter().flatten() {
                let partner_position = position(&partner);
                if !view.contains(partner_position, padding) {
                    visible.push(partner);
                }
            }
        }
        // A link can only cross the whole window if its left end lies within
        // the longest link span of the far edge, so only that stretch of
        // each side is scanned.
        let span_px = layout.max_link_span() as f64 / view.time_per_pixel;
        let right_edge = view.width + padding;
        let left = &order[..range.start];
        let from =
            left.partition_point(|index| view.view_x(position(index)) < right_edge - span_px);
        // Links that jump over the window from left to right.
        for index in &left[from..] {
            let Some(next) = layout.entity(*index).and_then(|entity| entity.chain_entity) else {
                continue;
            };
            if view.view_x(position(&next)) > right_edge {
                visible.push(*index);
                visible.push(next);
            }
        }
        let right = &order[range.end..];
        let to = right.partition_point(|index| view.view_x(position(index)) <= span_px - padding);
        // Revoked-before-issued links run the other way.
        for index in &right[..to] {
            let Some(next) = layout.entity(*index).and_then(|entity| entity.chain_entity) else {
                continue;
            };
            if view.view_x(position(&next)) < -padding {
                visible.push(*index);
                visible.push(next);
            }
        }

        visible.retain(|index| {
            layout
                .track_of(*index)
                .is_none_or(|track| track.visible)
        });
        if self.config.occlusion_px > 0.0 {
            visible.retain(|index| !self.occluded(layout, view, *index));
        }
        visible.sort_by_key(|index| (position(index), *index));
        visible.dedup();
        visible
    }

    fn occluded(&self, layout: &TimelineLayout, view: &CullView, index: EntityIndex) -> bool {
        let Some(entity) = layout.entity(index) else {
            return false;
        };
        let Some(next) = entity.following_entity.and_then(|next| layout.entity(next)) else {
            return false;
        };
        let gap = view.view_x(next.marker_position) - view.view_x(entity.marker_position);
        gap < self.config.occlusion_px
    }
}

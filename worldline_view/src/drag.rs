// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Pointer positions of the drag in progress.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DragTracker {
    start_pos: Option<Point>,
    last_pos: Option<Point>,
}

impl DragTracker {
    pub(crate) fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Movement since the previous update, or `None` when not dragging.
    pub(crate) fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        Some(pos - last)
    }

    pub(crate) fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

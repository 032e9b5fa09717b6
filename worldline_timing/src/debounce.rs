// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{TimerId, TimerQueue};

/// Fires once after `delay` milliseconds without a [`poke`](Self::poke).
///
/// The debouncer owns at most one timer in a caller's [`TimerQueue`]. Poking
/// cancels that timer and schedules a fresh one, so the queue only ever holds
/// the latest deadline. When the owner pops a timer it hands the id to
/// [`fired`](Self::fired) to learn whether it belongs to this debouncer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debounce {
    /// Quiet period in milliseconds.
    pub delay: u64,
    timer: Option<TimerId>,
}

impl Debounce {
    /// Creates an idle debouncer.
    #[must_use]
    pub const fn new(delay: u64) -> Self {
        Self { delay, timer: None }
    }

    /// Re-arms the debouncer so `payload` becomes due `delay` after `now`.
    pub fn poke<T>(&mut self, queue: &mut TimerQueue<T>, now: u64, payload: T) -> TimerId {
        self.cancel(queue);
        let id = queue.schedule(now.saturating_add(self.delay), payload);
        self.timer = Some(id);
        id
    }

    /// Claims a timer popped from the queue.
    ///
    /// Returns `true` exactly once, when `id` is the debouncer's armed timer.
    pub fn fired(&mut self, id: TimerId) -> bool {
        if self.timer == Some(id) {
            self.timer = None;
            true
        } else {
            false
        }
    }

    /// Disarms the debouncer and removes its timer from `queue`.
    pub fn cancel<T>(&mut self, queue: &mut TimerQueue<T>) {
        if let Some(id) = self.timer.take() {
            queue.cancel(id);
        }
    }

    /// Returns `true` while armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Handle of the armed timer.
    #[must_use]
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// When the debouncer will fire, if armed.
    #[must_use]
    pub fn deadline<T>(&self, queue: &TimerQueue<T>) -> Option<u64> {
        self.timer.and_then(|id| queue.deadline(id))
    }
}

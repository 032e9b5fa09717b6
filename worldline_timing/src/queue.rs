// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BinaryHeap;
use core::cmp::Reverse;

use hashbrown::HashMap;

/// Handle returned by [`TimerQueue::schedule`], used to cancel a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// One-shot timers ordered by deadline.
///
/// Timers with equal deadlines fire in scheduling order. Cancelled timers are
/// dropped lazily when they reach the front of the queue.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<Reverse<(u64, u64)>>,
    live: HashMap<u64, (u64, T)>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `payload` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.heap.push(Reverse((deadline, id)));
        self.live.insert(id, (deadline, payload));
        TimerId(id)
    }

    /// Cancels a pending timer, returning its payload if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let payload = self.live.remove(&id.0).map(|(_, payload)| payload);
        self.prune();
        payload
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(TimerId, T)> {
        let Reverse((deadline, id)) = *self.heap.peek()?;
        if deadline > now {
            return None;
        }
        self.heap.pop();
        let payload = self.live.remove(&id);
        self.prune();
        tracing::trace!(id, deadline, now, "timer fired");
        payload.map(|(_, payload)| (TimerId(id), payload))
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse((deadline, _))| *deadline)
    }

    /// Deadline of a pending timer, or `None` once it fired or was cancelled.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<u64> {
        self.live.get(&id.0).map(|(deadline, _)| *deadline)
    }

    /// Returns `true` if `id` is still pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.live.contains_key(&id.0)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    /// Pops cancelled entries off the front so `next_deadline` stays exact.
    fn prune(&mut self) {
        while let Some(Reverse((_, id))) = self.heap.peek() {
            if self.live.contains_key(id) {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(30, "c");
        queue.schedule(10, "a");
        queue.schedule(10, "b");
        let mut fired = Vec::new();
        while let Some((_, payload)) = queue.pop_due(100) {
            fired.push(payload);
        }
        assert_eq!(fired, ["a", "b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn nothing_is_due_before_its_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(50, ());
        assert!(queue.pop_due(49).is_none());
        assert_eq!(queue.next_deadline(), Some(50));
        assert!(queue.pop_due(50).is_some());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn cancelled_timers_never_fire_or_block_the_deadline() {
        let mut queue = TimerQueue::new();
        let early = queue.schedule(10, 1);
        let late = queue.schedule(20, 2);
        assert_eq!(queue.cancel(early), Some(1));
        assert_eq!(queue.cancel(early), None);
        assert_eq!(queue.next_deadline(), Some(20));
        assert_eq!(queue.deadline(early), None);
        assert_eq!(queue.deadline(late), Some(20));
        assert_eq!(queue.len(), 1);
        assert!(queue.contains(late));
        assert_eq!(queue.pop_due(100), Some((late, 2)));
        assert!(!queue.contains(late));
    }
}

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::hash::Hash;

use hashbrown::HashSet;

/// The set of currently hovered items.
///
/// Every mutation reports whether the set changed, so callers only notify
/// when something actually happened.
#[derive(Clone, Debug)]
pub struct HoverSet<K> {
    items: HashSet<K>,
}

impl<K> Default for HoverSet<K> {
    fn default() -> Self {
        Self {
            items: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> HoverSet<K> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as hovered.
    pub fn enter(&mut self, key: K) -> bool {
        self.items.insert(key)
    }

    /// Marks `key` as no longer hovered.
    pub fn leave(&mut self, key: &K) -> bool {
        self.items.remove(key)
    }

    /// Clears the set.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    /// Drops every key for which `keep` returns `false`.
    pub fn retain(&mut self, keep: impl FnMut(&K) -> bool) -> bool {
        let before = self.items.len();
        self.items.retain(keep);
        before != self.items.len()
    }

    /// Returns `true` if `key` is hovered.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.items.contains(key)
    }

    /// Iterates hovered keys in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.items.iter()
    }

    /// Number of hovered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is hovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutations_report_changes() {
        let mut hover = HoverSet::new();
        assert!(hover.enter(3_u32));
        assert!(!hover.enter(3));
        assert!(hover.contains(&3));
        assert!(hover.enter(4));
        assert!(hover.retain(|k| *k != 4));
        assert!(!hover.leave(&4));
        assert!(hover.leave(&3));
        assert!(!hover.clear());
        assert!(hover.is_empty());
    }
}

// Copyright 2025 the Worldline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A typed publish/subscribe bus.
//!
//! Events declare a [`kind`](BusEvent::kind); handlers subscribe to one kind
//! and only see events of that kind, in subscription order.
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use worldline_timeline::{EventBus, TimelineEvent, TimelineEventKind};
//!
//! let mut bus = EventBus::new();
//! let seen = Rc::new(Cell::new(0));
//! let counter = seen.clone();
//! let id = bus.subscribe(TimelineEventKind::HoverChanged, move |_: &TimelineEvent| {
//!     counter.set(counter.get() + 1);
//! });
//!
//! bus.publish(&TimelineEvent::HoverChanged);
//! bus.publish(&TimelineEvent::LayoutChanged { revision: 1 });
//! assert_eq!(seen.get(), 1);
//!
//! assert!(bus.unsubscribe(id));
//! bus.publish(&TimelineEvent::HoverChanged);
//! assert_eq!(seen.get(), 1);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

/// An event that can travel over an [`EventBus`].
pub trait BusEvent {
    /// The discriminant handlers subscribe to.
    type Kind: Copy + Eq + Hash + fmt::Debug;

    /// This event's kind.
    fn kind(&self) -> Self::Kind;
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

/// Dispatches events to the handlers subscribed to their kind.
pub struct EventBus<E: BusEvent> {
    next_id: u64,
    handlers: HashMap<E::Kind, Vec<(SubscriptionId, Handler<E>)>>,
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            handlers: HashMap::new(),
        }
    }
}

impl<E: BusEvent> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self
            .handlers
            .iter()
            .map(|(kind, handlers)| (*kind, handlers.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("handlers", &kinds)
            .finish()
    }
}

impl<E: BusEvent> EventBus<E> {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `handler` for every later event of `kind`.
    pub fn subscribe(&mut self, kind: E::Kind, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(position) = handlers.iter().position(|(other, _)| *other == id) {
                handlers.remove(position);
                return true;
            }
        }
        false
    }

    /// Delivers `event` to the handlers of its kind and returns how many ran.
    pub fn publish(&mut self, event: &E) -> usize {
        let Some(handlers) = self.handlers.get_mut(&event.kind()) else {
            return 0;
        };
        for (_, handler) in handlers.iter_mut() {
            handler(event);
        }
        handlers.len()
    }

    /// Number of handlers subscribed to `kind`.
    #[must_use]
    pub fn subscribers(&self, kind: E::Kind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Total number of subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Returns `true` if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Kind {
        Ping,
        Pong,
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Ping(u8),
        Pong,
    }

    impl BusEvent for Event {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            match self {
                Self::Ping(_) => Kind::Ping,
                Self::Pong => Kind::Pong,
            }
        }
    }

    #[test]
    fn handlers_run_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ['a', 'b'] {
            let log = log.clone();
            bus.subscribe(Kind::Ping, move |event: &Event| {
                if let Event::Ping(n) = event {
                    log.borrow_mut().push((tag, *n));
                }
            });
        }
        assert_eq!(bus.publish(&Event::Ping(7)), 2);
        assert_eq!(bus.publish(&Event::Pong), 0);
        assert_eq!(*log.borrow(), vec![('a', 7), ('b', 7)]);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut bus: EventBus<Event> = EventBus::new();
        let id = bus.subscribe(Kind::Pong, |_| {});
        bus.subscribe(Kind::Pong, |_| {});
        assert_eq!(bus.subscribers(Kind::Pong), 2);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.len(), 1);
        assert!(!bus.is_empty());
    }
}

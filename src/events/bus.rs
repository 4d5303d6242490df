//! Synchronous topic-keyed publish/subscribe registry.
//!
//! Subscribers of a topic are invoked in subscription order on the
//! publisher's stack. Dispatch iterates a snapshot of the subscriber list, so
//! handlers may subscribe, unsubscribe or publish while being dispatched
//! without affecting the delivery in progress.

use crate::events::{Event, Topic};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler = Rc<dyn Fn(&Event)>;
type SubscriptionId = u64;

#[derive(Default)]
struct Registry {
    next_id: SubscriptionId,
    topics: FxHashMap<Topic, Vec<(SubscriptionId, Handler)>>,
}

/// Shared handle to an event registry.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

/// Non-owning handle to an [`EventBus`], for handlers that publish
#[derive(Clone)]
pub struct WeakEventBus {
    registry: Weak<RefCell<Registry>>,
}

impl WeakEventBus {
    pub fn upgrade(&self) -> Option<EventBus> {
        self.registry.upgrade().map(|registry| EventBus { registry })
    }
}

/// Handle returned by [`EventBus::subscribe`]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    topic: Topic,
    id: SubscriptionId,
}

impl Subscription {
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Remove the handler from its topic.
    ///
    /// Safe to call from inside a handler; a dispatch already in progress
    /// still completes over its snapshot.
    pub fn unsubscribe(self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        if let Some(handlers) = registry.topics.get_mut(&self.topic) {
            handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downgrade(&self) -> WeakEventBus {
        WeakEventBus {
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Register `handler` for `topic`
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Event) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .topics
            .entry(topic)
            .or_default()
            .push((id, Rc::new(handler)));

        Subscription {
            registry: Rc::downgrade(&self.registry),
            topic,
            id,
        }
    }

    /// Deliver `event` to every current subscriber of its topic.
    ///
    /// Returns the number of handlers invoked.
    pub fn publish(&self, event: &Event) -> usize {
        let snapshot: Vec<Handler> = {
            let registry = self.registry.borrow();
            match registry.topics.get(&event.topic()) {
                Some(handlers) => handlers.iter().map(|(_, h)| Rc::clone(h)).collect(),
                None => return 0,
            }
        };

        for handler in &snapshot {
            handler(event);
        }
        snapshot.len()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.registry
            .borrow()
            .topics
            .get(&topic)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, name: &'static str) -> impl Fn(&Event) + 'static {
        let log = Rc::clone(log);
        move |event: &Event| log.borrow_mut().push(format!("{}:{}", name, event.topic()))
    }

    #[test]
    fn test_publish_in_subscription_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(Topic::TextSearch, recorder(&log, "a"));
        bus.subscribe(Topic::TextSearch, recorder(&log, "b"));
        bus.subscribe(Topic::AddTag, recorder(&log, "c"));

        assert_eq!(bus.publish(&Event::text_search("x")), 2);
        assert_eq!(*log.borrow(), ["a:text-search", "b:text-search"]);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(&Event::text_search("x")), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = bus.subscribe(Topic::TextSearch, recorder(&log, "a"));
        bus.subscribe(Topic::TextSearch, recorder(&log, "b"));

        a.unsubscribe();
        bus.publish(&Event::text_search("x"));
        assert_eq!(*log.borrow(), ["b:text-search"]);
        assert_eq!(bus.subscriber_count(Topic::TextSearch), 1);
    }

    #[test]
    fn test_unsubscribe_during_dispatch_keeps_other_subscribers() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let self_slot = Rc::clone(&slot);
        let first_log = Rc::clone(&log);
        let first = bus.subscribe(Topic::TextSearch, move |_| {
            first_log.borrow_mut().push("first".to_string());
            if let Some(sub) = self_slot.borrow_mut().take() {
                sub.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(first);
        bus.subscribe(Topic::TextSearch, recorder(&log, "second"));
        bus.subscribe(Topic::TextSearch, recorder(&log, "third"));

        bus.publish(&Event::text_search("x"));
        bus.publish(&Event::text_search("y"));

        assert_eq!(
            *log.borrow(),
            [
                "first",
                "second:text-search",
                "third:text-search",
                "second:text-search",
                "third:text-search",
            ]
        );
    }

    #[test]
    fn test_publish_from_handler() {
        let bus = EventBus::new();
        let counted = Rc::new(Cell::new(0));

        let weak = bus.downgrade();
        bus.subscribe(Topic::TextSearch, move |_| {
            if let Some(bus) = weak.upgrade() {
                bus.publish(&Event::add_tag("utensils", "fouet"));
            }
        });
        let seen = Rc::clone(&counted);
        bus.subscribe(Topic::AddTag, move |_| seen.set(seen.get() + 1));

        bus.publish(&Event::text_search("x"));
        assert_eq!(counted.get(), 1);
    }

    #[test]
    fn test_unsubscribe_after_bus_dropped() {
        let bus = EventBus::new();
        let sub = bus.subscribe(Topic::CountChanged, |_| {});
        drop(bus);
        assert!(sub.registry.upgrade().is_none());
        sub.unsubscribe();
    }
}

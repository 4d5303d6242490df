//! Attach a [`SearchEngine`] to an [`EventBus`].
//!
//! The session subscribes to the inbound topics and publishes every event the
//! engine emits back onto the bus as soon as it is produced, so a partial
//! result batch reaches subscribers before the scan finishes. While a
//! transaction is in flight the session is busy: inbound events published by
//! subscribers in the meantime are rejected rather than nested.

use crate::engine::SearchEngine;
use crate::error::{EngineError, Result};
use crate::events::{Event, EventBus, Subscription, Topic, WeakEventBus};
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

/// Clears the busy flag when the transaction ends
struct BusyGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> BusyGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Shared state captured by every bus handler
#[derive(Clone)]
struct Shared {
    engine: Rc<RefCell<SearchEngine>>,
    busy: Rc<Cell<bool>>,
    bus: WeakEventBus,
}

impl Shared {
    fn apply(&self, event: &Event) -> Result<()> {
        let Some(_guard) = BusyGuard::enter(&self.busy) else {
            log::warn!("Rejected {} event: a transaction is in flight", event.topic());
            return Err(EngineError::Busy);
        };

        let bus = self.bus.upgrade();
        let mut engine = self.engine.borrow_mut();
        engine.handle(event, &mut |out: Event| {
            if let Some(bus) = &bus {
                bus.publish(&out);
            }
        })
    }
}

/// One engine serving one bus
pub struct Session {
    shared: Shared,
    subscriptions: Vec<Subscription>,
}

impl Session {
    /// Subscribe `engine` to the inbound topics of `bus` and publish the
    /// initial options and count.
    pub fn attach(engine: SearchEngine, bus: &EventBus) -> Self {
        let shared = Shared {
            engine: Rc::new(RefCell::new(engine)),
            busy: Rc::new(Cell::new(false)),
            bus: bus.downgrade(),
        };

        let subscriptions = Topic::INPUTS
            .into_iter()
            .map(|topic| {
                let handler = shared.clone();
                bus.subscribe(topic, move |event| {
                    if let Err(err) = handler.apply(event) {
                        log::debug!("Dropped {} event: {}", event.topic(), err);
                    }
                })
            })
            .collect();

        {
            let _guard = BusyGuard::enter(&shared.busy);
            shared.engine.borrow().snapshot(&mut |out: Event| {
                bus.publish(&out);
            });
        }

        Self {
            shared,
            subscriptions,
        }
    }

    /// Apply `event` directly, publishing what it produces on the bus
    pub fn dispatch(&self, event: &Event) -> Result<()> {
        self.shared.apply(event)
    }

    pub fn is_busy(&self) -> bool {
        self.shared.busy.get()
    }

    /// Borrow the engine.
    ///
    /// Fails with [`EngineError::Busy`] while a transaction is in flight.
    pub fn engine(&self) -> Result<Ref<'_, SearchEngine>> {
        if self.is_busy() {
            return Err(EngineError::Busy);
        }
        self.shared.engine.try_borrow().map_err(|_| EngineError::Busy)
    }

    /// Unsubscribe from the bus
    pub fn detach(self) {}
}

impl Drop for Session {
    fn drop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }
}

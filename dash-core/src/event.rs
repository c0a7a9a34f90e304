//! Range-changed channel shared between a page and whatever produces ranges.
//!
//! `RangeBus` is a single-threaded publish/subscribe handle. Cloning it is
//! cheap (`Rc`) and every clone talks to the same subscriber list. The
//! controller that owns a page creates the bus and injects it, so two pages
//! never collide on a process-wide channel.

use crate::range::DateRange;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Handler = Rc<RefCell<dyn FnMut(DateRange)>>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    handlers: BTreeMap<u64, Handler>,
}

/// Cloneable handle to a range-changed channel.
#[derive(Clone, Default)]
pub struct RangeBus {
    inner: Rc<RefCell<Subscribers>>,
}

impl RangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`; it stays registered while the returned
    /// `Subscription` is alive.
    pub fn subscribe(&self, handler: impl FnMut(DateRange) + 'static) -> Subscription {
        let mut subscribers = self.inner.borrow_mut();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers
            .handlers
            .insert(id, Rc::new(RefCell::new(handler)));
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `range` to every subscriber in subscription order.
    ///
    /// Returns the number of handlers called. A handler that is already
    /// running (a publish from inside itself) is skipped, as is one whose
    /// subscription an earlier handler dropped.
    pub fn publish(&self, range: DateRange) -> usize {
        // Snapshot so handlers may subscribe or unsubscribe while we iterate.
        let handlers: Vec<(u64, Handler)> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();
        let mut delivered = 0;
        for (id, handler) in handlers {
            if !self.inner.borrow().handlers.contains_key(&id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (&mut *handler)(range);
                    delivered += 1;
                }
                Err(_) => log::warn!("Skipping re-entrant range handler"),
            }
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

/// Keeps a handler registered on a `RangeBus`; dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<Subscribers>>,
}

impl Subscription {
    /// Unsubscribe now. Equivalent to dropping the subscription.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().handlers.remove(&self.id);
        }
    }
}

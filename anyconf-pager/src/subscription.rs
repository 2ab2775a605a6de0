//! Document-level pointer listener registry.
//!
//! Views subscribe once on construction and hold the returned guard. The
//! guard unregisters itself when dropped, so a destroyed view can never be
//! reached by document events again.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct DocumentPointerHub {
    next_id: Cell<u64>,
    live: RefCell<BTreeSet<SubscriptionId>>,
}

impl DocumentPointerHub {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn subscribe(self: &Rc<Self>) -> DocumentSubscription {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.live.borrow_mut().insert(id);
        log::debug!("document pointer {id} registered");
        DocumentSubscription {
            id,
            hub: Rc::downgrade(self),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn is_live(&self, id: SubscriptionId) -> bool {
        self.live.borrow().contains(&id)
    }

    /// Live subscriptions in registration order; the host dispatches
    /// document events to the views holding these.
    pub fn listeners(&self) -> Vec<SubscriptionId> {
        self.live.borrow().iter().copied().collect()
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if self.live.borrow_mut().remove(&id) {
            log::debug!("document pointer {id} released");
        }
    }
}

/// Registration guard. Dropping it removes the listener.
#[derive(Debug)]
pub struct DocumentSubscription {
    id: SubscriptionId,
    hub: Weak<DocumentPointerHub>,
}

impl DocumentSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Still registered with a live hub.
    pub fn is_active(&self) -> bool {
        self.hub.upgrade().is_some_and(|hub| hub.is_live(self.id))
    }
}

impl Drop for DocumentSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.unsubscribe(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_the_guard_unregisters() {
        let hub = DocumentPointerHub::new();
        let first = hub.subscribe();
        let second = hub.subscribe();
        assert_eq!(hub.listener_count(), 2);
        assert!(first.is_active());

        let first_id = first.id();
        drop(first);
        assert!(!hub.is_live(first_id));
        assert_eq!(hub.listeners(), vec![second.id()]);
    }

    #[test]
    fn guard_outliving_hub_is_inactive() {
        let hub = DocumentPointerHub::new();
        let sub = hub.subscribe();
        drop(hub);
        assert!(!sub.is_active());
    }
}

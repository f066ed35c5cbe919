//! In-process subscription registry.
//!
//! # Invariants
//! - Handlers are invoked in subscription order.
//! - The registry is not borrowed while handlers run, so handlers may
//!   subscribe, unsubscribe or emit.
//! - A handler that is already running is skipped on re-entrant delivery.

use crate::events::{AppEvent, EventKind};
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Handler = Rc<RefCell<dyn FnMut(&AppEvent)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: BTreeMap<u64, (EventKind, Handler)>,
}

/// Shared event bus handle; clones address the same registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for one event kind.
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl FnMut(&AppEvent) + 'static,
    ) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let handler: Handler = Rc::new(RefCell::new(handler));
        registry.handlers.insert(id, (kind, handler));
        debug!("event=subscribe module=events kind={} id={id}", kind.name());

        Subscription {
            id,
            kind,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers `event` and returns how many handlers received it.
    pub fn emit(&self, event: &AppEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<(u64, Handler)> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .filter(|(_, (handler_kind, _))| *handler_kind == kind)
            .map(|(id, (_, handler))| (*id, Rc::clone(handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in targets {
            if !self.registry.borrow().handlers.contains_key(&id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (&mut *handler)(event);
                    delivered += 1;
                }
                Err(_) => warn!(
                    "event=reentrant_delivery_skipped module=events kind={} id={id}",
                    kind.name()
                ),
            }
        }
        delivered
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .handlers
            .values()
            .filter(|(handler_kind, _)| *handler_kind == kind)
            .count()
    }
}

/// Unsubscribe handle returned by [`EventBus::subscribe`].
///
/// Dropping the handle keeps the handler registered; call
/// [`Subscription::unsubscribe`] on teardown.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    kind: EventKind,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Removes the handler; returns false when the bus is gone or the handler
    /// was already removed.
    pub fn unsubscribe(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removed = registry.borrow_mut().handlers.remove(&self.id).is_some();
        debug!(
            "event=unsubscribe module=events kind={} id={} removed={removed}",
            self.kind.name(),
            self.id
        );
        removed
    }
}

//! Mutation notification bus.
//!
//! Each registration keeps its own record queue, filled at the moment a
//! change happens (only if the registration is interested in it). A flush
//! hands every non-empty queue to its subscriber as one batch, which matches
//! how a browser delivers observer callbacks at a microtask checkpoint.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tokio::sync::mpsc;

use super::{MutationSource, ObserveFilter, Subscription};
use crate::dom::{Element, MutationBatch, MutationRecord, NodeId};

struct Registration {
    scope: NodeId,
    filter: ObserveFilter,
    queue: MutationBatch,
    tx: mpsc::UnboundedSender<MutationBatch>,
}

impl Registration {
    #[inline]
    fn accepts(&self, record: &MutationRecord) -> bool {
        self.filter == record.filter() && self.scope == record.target.id()
    }
}

/// Keyed by registration id, so iteration follows registration order.
type Registry = RefCell<BTreeMap<u64, Registration>>;

/// In-process mutation notification service.
#[derive(Default)]
pub struct MutationBus {
    registry: Rc<Registry>,
    next_id: Cell<u64>,
}

impl MutationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    pub fn registrations(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Number of live registrations scoped to `scope` with `filter`.
    pub fn registrations_for(&self, scope: &Element, filter: ObserveFilter) -> usize {
        let id = scope.id();
        self.registry
            .borrow()
            .values()
            .filter(|r| r.scope == id && r.filter == filter)
            .count()
    }

    /// Queue a record for every interested registration.
    ///
    /// Called by the document on each change; records nobody observes are
    /// dropped immediately.
    pub fn queue(&self, record: MutationRecord) {
        let mut registry = self.registry.borrow_mut();
        for reg in registry.values_mut().filter(|r| r.accepts(&record)) {
            reg.queue.push(record.clone());
        }
    }

    /// Deliver all queued records, one batch per registration, in
    /// registration order.
    ///
    /// Returns the number of batches sent.
    pub fn flush(&self) -> usize {
        let mut registry = self.registry.borrow_mut();
        let mut sent = 0;
        let mut closed = Vec::new();

        for (id, reg) in registry.iter_mut() {
            if reg.queue.is_empty() {
                continue;
            }
            let batch = std::mem::take(&mut reg.queue);
            if reg.tx.send(batch).is_ok() {
                sent += 1;
            } else {
                closed.push(*id);
            }
        }

        for id in closed {
            registry.remove(&id);
        }
        sent
    }

    /// Push a synthetic batch straight to matching registrations, bypassing
    /// the queues. Each registration receives the records it would accept,
    /// in the given order.
    ///
    /// Returns the number of batches sent.
    pub fn deliver(&self, records: impl IntoIterator<Item = MutationRecord>) -> usize {
        let records: Vec<_> = records.into_iter().collect();
        let registry = self.registry.borrow();
        let mut sent = 0;

        for reg in registry.values() {
            let batch: MutationBatch = records
                .iter()
                .filter(|r| reg.accepts(r))
                .cloned()
                .collect();
            if !batch.is_empty() && reg.tx.send(batch).is_ok() {
                sent += 1;
            }
        }
        sent
    }

    fn register(&self, scope: &Element, filter: ObserveFilter) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let (tx, rx) = mpsc::unbounded_channel();
        self.registry.borrow_mut().insert(
            id,
            Registration {
                scope: scope.id(),
                filter,
                queue: MutationBatch::new(),
                tx,
            },
        );

        let registry: Weak<Registry> = Rc::downgrade(&self.registry);
        Subscription::new(rx, move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().remove(&id);
            }
        })
    }
}

impl MutationSource for MutationBus {
    fn observe(&self, scope: &Element, filter: ObserveFilter) -> Subscription {
        crate::debug!("observe"; "register {:?} on <{}> {}", filter, scope.tag(), scope.id());
        self.register(scope, filter)
    }
}

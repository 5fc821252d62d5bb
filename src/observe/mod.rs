//! Mutation observation.
//!
//! The host's change-notification mechanism, reduced to one seam:
//!
//! ```text
//! MutationSource::observe(scope, filter) -> Subscription
//!                                              |-- next_batch().await
//!                                              `-- cancel()
//! ```
//!
//! [`MutationBus`] is the in-crate implementation. It is fed by the
//! document's own change journal ([`crate::dom::Document::flush_mutations`])
//! or by synthetic batches pushed with [`MutationBus::deliver`].
//! [`OneShot`] wraps a subscription with resolve-once-then-disconnect state.

mod bus;
mod once;

pub use bus::MutationBus;
pub use once::OneShot;

use tokio::sync::mpsc;

use crate::dom::{Element, MutationBatch};

/// Which kind of change a registration listens to.
///
/// Both kinds are scoped to the observed element itself, not its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserveFilter {
    /// Attribute changes on the scope element.
    Attributes,
    /// Children added to or removed from the scope element.
    ChildList,
}

/// A source of mutation batches.
pub trait MutationSource {
    /// Start receiving batches for `scope`. Notification stops for good when
    /// the returned subscription is cancelled or dropped.
    fn observe(&self, scope: &Element, filter: ObserveFilter) -> Subscription;
}

impl<S: MutationSource + ?Sized> MutationSource for std::rc::Rc<S> {
    fn observe(&self, scope: &Element, filter: ObserveFilter) -> Subscription {
        (**self).observe(scope, filter)
    }
}

/// A live registration.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<MutationBatch>,
    disconnect: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(
        rx: mpsc::UnboundedReceiver<MutationBatch>,
        disconnect: impl FnOnce() + 'static,
    ) -> Self {
        Self {
            rx,
            disconnect: Some(Box::new(disconnect)),
        }
    }

    /// Wait for the next batch. `None` once the source has gone away.
    pub async fn next_batch(&mut self) -> Option<MutationBatch> {
        self.rx.recv().await
    }

    /// Permanently stop notification for this registration.
    pub fn cancel(mut self) {
        self.disconnect_now();
    }

    fn disconnect_now(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
        self.rx.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.disconnect_now();
    }
}

//! Resolve-once-then-disconnect listener state.

use super::Subscription;
use crate::dom::MutationBatch;

/// One-shot listener: a resolved flag plus the subscription to drop on
/// resolution.
///
/// Once resolved, the listener never reopens and processes no further
/// batches.
pub struct OneShot {
    resolved: bool,
    subscription: Option<Subscription>,
}

impl OneShot {
    /// Listener waiting on `subscription`.
    pub fn armed(subscription: Subscription) -> Self {
        Self {
            resolved: false,
            subscription: Some(subscription),
        }
    }

    /// Listener whose condition already held; nothing is observed.
    pub fn already_resolved() -> Self {
        Self {
            resolved: true,
            subscription: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// True while a registration is still live.
    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Mark resolved and disconnect. Returns true only on the first call.
    pub fn resolve(&mut self) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
        true
    }

    /// Next batch for an unresolved listener.
    ///
    /// Returns `None` when resolved or when the source closed; callers treat
    /// a closed source as "never resolves".
    pub async fn next_batch(&mut self) -> Option<MutationBatch> {
        if self.resolved {
            return None;
        }
        self.subscription.as_mut()?.next_batch().await
    }
}

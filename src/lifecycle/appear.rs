use crate::dom::{Element, MutationRecord};
use crate::observe::{MutationSource, ObserveFilter, OneShot};

/// Resolves the first time the target carries the visibility marker.
pub struct AppearDetector {
    target: Element,
    marker: String,
    once: OneShot,
}

impl AppearDetector {
    /// Check the marker now; observe the target's attributes only if it is
    /// not there yet.
    pub fn arm(target: &Element, marker: &str, source: &dyn MutationSource) -> Self {
        let once = if target.has_class(marker) {
            OneShot::already_resolved()
        } else {
            OneShot::armed(source.observe(target, ObserveFilter::Attributes))
        };

        Self {
            target: target.clone(),
            marker: marker.to_string(),
            once,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.once.is_resolved()
    }

    /// Inspect one batch. Returns true if this batch resolved the detector.
    pub fn scan(&mut self, batch: &[MutationRecord]) -> bool {
        if self.once.is_resolved() {
            return false;
        }
        let visible = batch
            .iter()
            .filter(|record| record.attribute_name() == Some("class"))
            .any(|_| self.target.has_class(&self.marker));

        visible && self.once.resolve()
    }

    /// Wait until resolved. Pends forever if the source goes away first.
    pub async fn wait(&mut self) {
        while !self.once.is_resolved() {
            match self.once.next_batch().await {
                Some(batch) => {
                    self.scan(&batch);
                }
                None => std::future::pending::<()>().await,
            }
        }
    }
}

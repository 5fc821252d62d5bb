use super::LifecycleError;
use crate::dom::{Element, MutationRecord};
use crate::observe::{MutationSource, ObserveFilter, OneShot};

/// Resolves when the target is removed from the parent it had at arm time.
///
/// The parent is captured once. If that parent is itself detached while
/// still holding the target, no removal of the target is ever reported and
/// the detector stays pending.
pub struct UnmountDetector {
    target: Element,
    parent: Element,
    once: OneShot,
}

impl UnmountDetector {
    pub fn arm(target: &Element, source: &dyn MutationSource) -> Result<Self, LifecycleError> {
        let parent = target.parent().ok_or_else(|| LifecycleError::Detached {
            tag: target.tag(),
            id: target.id(),
        })?;
        let subscription = source.observe(&parent, ObserveFilter::ChildList);

        Ok(Self {
            target: target.clone(),
            parent,
            once: OneShot::armed(subscription),
        })
    }

    /// The container being watched.
    pub fn parent(&self) -> &Element {
        &self.parent
    }

    pub fn is_resolved(&self) -> bool {
        self.once.is_resolved()
    }

    /// Inspect one batch. Returns true if this batch resolved the detector.
    pub fn scan(&mut self, batch: &[MutationRecord]) -> bool {
        if self.once.is_resolved() {
            return false;
        }
        let removed = batch
            .iter()
            .flat_map(|record| record.removed_nodes())
            .any(|node| node.is(&self.target));

        removed && self.once.resolve()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_arm_requires_parent() {
        let doc = Document::new();
        let orphan = doc.create_element("section");
        let bus = doc.mutations();

        let err = UnmountDetector::arm(&orphan, &bus).err().unwrap();
        assert!(matches!(err, LifecycleError::Detached { ref tag, .. } if tag == "section"));
        assert_eq!(bus.registrations(), 0);
    }

    #[test]
    fn test_watches_captured_parent() {
        let doc = Document::parse(r#"<main><section></section></main>"#).unwrap();
        let main = doc.root().child_elements().remove(0);
        let section = main.child_elements().remove(0);
        let bus = doc.mutations();

        let detector = UnmountDetector::arm(&section, &bus).unwrap();
        assert_eq!(*detector.parent(), main);
        assert_eq!(bus.registrations_for(&main, ObserveFilter::ChildList), 1);
    }

    #[test]
    fn test_scan_matches_only_target() {
        let doc = Document::parse(r#"<main><section></section><aside></aside></main>"#).unwrap();
        let main = doc.root().child_elements().remove(0);
        let section = main.child_elements().remove(0);
        let aside = main.child_elements().remove(1);
        let bus = doc.mutations();
        let mut detector = UnmountDetector::arm(&section, &bus).unwrap();

        let other = MutationRecord::child_list(main.clone(), vec![], vec![aside.into()]);
        assert!(!detector.scan(&[other.clone()]));

        let ours = MutationRecord::child_list(main.clone(), vec![], vec![section.clone().into()]);
        assert!(detector.scan(&[other, ours.clone()]));
        assert!(!detector.scan(&[ours]));
        assert_eq!(bus.registrations(), 0);
    }

    #[test]
    fn test_added_nodes_do_not_count() {
        let doc = Document::parse(r#"<main><section></section></main>"#).unwrap();
        let main = doc.root().child_elements().remove(0);
        let section = main.child_elements().remove(0);
        let bus = doc.mutations();
        let mut detector = UnmountDetector::arm(&section, &bus).unwrap();

        let added = MutationRecord::child_list(main, vec![section.into()], vec![]);
        assert!(!detector.scan(&[added]));
        assert!(!detector.is_resolved());
    }
}

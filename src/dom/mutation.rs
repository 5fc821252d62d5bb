//! Mutation records.
//!
//! A record describes one change to one element, the same shape a host
//! document hands to its mutation observers: either an attribute change
//! (with the previous value) or a child-list change (added / removed nodes).

use super::node::{Element, Node};
use crate::observe::ObserveFilter;

/// What changed.
#[derive(Debug, Clone)]
pub enum MutationKind {
    Attributes {
        name: String,
        old_value: Option<String>,
    },
    ChildList {
        added: Vec<Node>,
        removed: Vec<Node>,
    },
}

/// A single change record.
#[derive(Debug, Clone)]
pub struct MutationRecord {
    /// Element whose attributes or child list changed.
    pub target: Element,
    pub kind: MutationKind,
}

/// Records delivered together to one registration.
pub type MutationBatch = Vec<MutationRecord>;

impl MutationRecord {
    pub fn attributes(target: Element, name: &str, old_value: Option<String>) -> Self {
        Self {
            target,
            kind: MutationKind::Attributes {
                name: name.to_string(),
                old_value,
            },
        }
    }

    pub fn child_list(target: Element, added: Vec<Node>, removed: Vec<Node>) -> Self {
        Self {
            target,
            kind: MutationKind::ChildList { added, removed },
        }
    }

    /// Which registration filter this record belongs to.
    pub fn filter(&self) -> ObserveFilter {
        match self.kind {
            MutationKind::Attributes { .. } => ObserveFilter::Attributes,
            MutationKind::ChildList { .. } => ObserveFilter::ChildList,
        }
    }

    /// Changed attribute name (attribute records only).
    pub fn attribute_name(&self) -> Option<&str> {
        match &self.kind {
            MutationKind::Attributes { name, .. } => Some(name),
            MutationKind::ChildList { .. } => None,
        }
    }

    pub fn removed_nodes(&self) -> &[Node] {
        match &self.kind {
            MutationKind::ChildList { removed, .. } => removed,
            MutationKind::Attributes { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_child_list_record_shape() {
        let doc = Document::new();
        let parent = doc.create_element("main");
        let child = doc.create_element("section");

        let record = MutationRecord::child_list(parent, vec![child.clone().into()], Vec::new());
        assert_eq!(record.filter(), ObserveFilter::ChildList);
        assert_eq!(record.attribute_name(), None);
        // Insertions are not removals.
        assert!(record.removed_nodes().is_empty());
        assert!(matches!(&record.kind, MutationKind::ChildList { added, .. } if added[0].is(&child)));
    }

    #[test]
    fn test_attribute_record_has_no_nodes() {
        let doc = Document::new();
        let record = MutationRecord::attributes(doc.create_element("div"), "class", Some("a".into()));
        assert_eq!(record.filter(), ObserveFilter::Attributes);
        assert_eq!(record.attribute_name(), Some("class"));
        assert!(record.removed_nodes().is_empty());
    }
}

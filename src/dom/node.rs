//! Element and node handles.
//!
//! Nodes are reference-counted and single-threaded (`Rc<RefCell<..>>`).
//! Every structural or attribute change is reported to the owning
//! document's [`MutationBus`], which queues a [`MutationRecord`] for each
//! registration that observes the changed element.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use super::DomError;
use super::mutation::MutationRecord;
use crate::observe::MutationBus;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique element identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Attribute list in document order.
pub type Attrs = SmallVec<[(String, String); 4]>;

struct ElementData {
    id: NodeId,
    tag: String,
    attrs: Attrs,
    children: Vec<Node>,
    parent: Weak<RefCell<ElementData>>,
    bus: Rc<MutationBus>,
}

/// Handle to an element. Cloning the handle does not clone the element.
#[derive(Clone)]
pub struct Element(Rc<RefCell<ElementData>>);

/// A child node: either an element or a text run.
#[derive(Clone, Debug)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    /// True if this node is exactly `element` (identity, not structure).
    pub fn is(&self, element: &Element) -> bool {
        self.as_element().is_some_and(|e| e == element)
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        write!(f, "<{} {}", data.tag, data.id)?;
        for (k, v) in &data.attrs {
            write!(f, " {k}={v:?}")?;
        }
        write!(f, ">")
    }
}

impl Element {
    pub(super) fn new(tag: &str, bus: Rc<MutationBus>) -> Self {
        Self(Rc::new(RefCell::new(ElementData {
            id: NodeId::next(),
            tag: tag.to_ascii_lowercase(),
            attrs: Attrs::new(),
            children: Vec::new(),
            parent: Weak::new(),
            bus,
        })))
    }

    pub fn id(&self) -> NodeId {
        self.0.borrow().id
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    #[inline]
    pub fn is_tag(&self, tag: &str) -> bool {
        self.0.borrow().tag.eq_ignore_ascii_case(tag)
    }

    fn bus(&self) -> Rc<MutationBus> {
        Rc::clone(&self.0.borrow().bus)
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn get_attr(&self, name: &str) -> Option<String> {
        self.0
            .borrow()
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.0.borrow().attrs.iter().any(|(k, _)| k == name)
    }

    pub fn attrs(&self) -> Attrs {
        self.0.borrow().attrs.clone()
    }

    /// Set an attribute, recording the previous value.
    pub fn set_attr(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let old_value = {
            let mut data = self.0.borrow_mut();
            match data.attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => Some(std::mem::replace(v, value)),
                None => {
                    data.attrs.push((name.to_string(), value));
                    None
                }
            }
        };
        self.bus()
            .queue(MutationRecord::attributes(self.clone(), name, old_value));
    }

    /// Remove an attribute. Returns the removed value; absent attributes
    /// produce no mutation record.
    pub fn remove_attr(&self, name: &str) -> Option<String> {
        let removed = {
            let mut data = self.0.borrow_mut();
            let pos = data.attrs.iter().position(|(k, _)| k == name)?;
            data.attrs.remove(pos).1
        };
        self.bus().queue(MutationRecord::attributes(
            self.clone(),
            name,
            Some(removed.clone()),
        ));
        Some(removed)
    }

    // =========================================================================
    // Class list
    // =========================================================================

    pub fn classes(&self) -> Vec<String> {
        self.get_attr("class")
            .map(|c| c.split_ascii_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0
            .borrow()
            .attrs
            .iter()
            .find(|(k, _)| k == "class")
            .is_some_and(|(_, v)| v.split_ascii_whitespace().any(|c| c == class))
    }

    /// Add a class token. No-op (and no record) if already present.
    pub fn add_class(&self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut classes = self.classes();
        classes.push(class.to_string());
        self.set_attr("class", classes.join(" "));
    }

    /// Remove a class token. No-op (and no record) if absent.
    pub fn remove_class(&self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let classes: Vec<_> = self.classes().into_iter().filter(|c| c != class).collect();
        self.set_attr("class", classes.join(" "));
    }

    // =========================================================================
    // Tree
    // =========================================================================

    pub fn parent(&self) -> Option<Element> {
        self.0.borrow().parent.upgrade().map(Element)
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    pub fn child_elements(&self) -> Vec<Element> {
        self.0
            .borrow()
            .children
            .iter()
            .filter_map(|n| n.as_element().cloned())
            .collect()
    }

    /// True if `self` is `other` or one of its ancestors.
    pub fn contains(&self, other: &Element) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(node) = cursor {
            if &node == self {
                return true;
            }
            cursor = node.parent();
        }
        false
    }

    /// Append a child, moving it out of its current parent first.
    pub fn append_child(&self, node: impl Into<Node>) -> Result<(), DomError> {
        let node = node.into();
        if let Node::Element(child) = &node {
            if child.contains(self) {
                return Err(DomError::Hierarchy {
                    parent: self.tag(),
                    child: child.tag(),
                });
            }
            child.detach();
            child.adopt(&self.bus());
            child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        }
        self.0.borrow_mut().children.push(node.clone());
        self.bus()
            .queue(MutationRecord::child_list(self.clone(), vec![node], Vec::new()));
        Ok(())
    }

    pub fn append_text(&self, text: impl Into<String>) {
        let node = Node::Text(text.into());
        self.0.borrow_mut().children.push(node.clone());
        self.bus()
            .queue(MutationRecord::child_list(self.clone(), vec![node], Vec::new()));
    }

    /// Remove a direct child. Returns false if `child` is not a child of `self`.
    pub fn remove_child(&self, child: &Element) -> bool {
        let removed = {
            let mut data = self.0.borrow_mut();
            let Some(pos) = data.children.iter().position(|n| n.is(child)) else {
                return false;
            };
            data.children.remove(pos)
        };
        child.0.borrow_mut().parent = Weak::new();
        self.bus()
            .queue(MutationRecord::child_list(self.clone(), Vec::new(), vec![removed]));
        true
    }

    /// Remove this element from its parent, if any.
    pub fn detach(&self) -> bool {
        match self.parent() {
            Some(parent) => parent.remove_child(self),
            None => false,
        }
    }

    /// Move this subtree under another document's mutation bus.
    fn adopt(&self, bus: &Rc<MutationBus>) {
        if Rc::ptr_eq(&self.0.borrow().bus, bus) {
            return;
        }
        self.0.borrow_mut().bus = Rc::clone(bus);
        for child in self.child_elements() {
            child.adopt(bus);
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            match child {
                Node::Text(t) => out.push_str(&t),
                Node::Element(e) => out.push_str(&e.text_content()),
            }
        }
        out
    }
}

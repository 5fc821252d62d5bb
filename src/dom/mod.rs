//! In-memory host document.
//!
//! A small element tree standing in for the browser DOM the slide
//! lifecycle observes:
//!
//! - `node` - element handles, attributes, class tokens, children
//! - `mutation` - attribute / child-list change records
//! - `query` - descendant selection by tag or class
//! - `parse` - HTML parsing via `tl`
//! - `html` - escaping helpers for parse and render
//!
//! Every change is reported to the document's [`MutationBus`]. Records are
//! queued for interested registrations and handed out on
//! [`Document::flush_mutations`], the equivalent of a microtask checkpoint.

mod html;
mod mutation;
mod node;
mod parse;
mod query;

use std::rc::Rc;

use thiserror::Error;

pub use mutation::{MutationBatch, MutationKind, MutationRecord};
pub use node::{Attrs, Element, Node, NodeId};
pub use query::Selector;

use crate::observe::MutationBus;
use html::{escape, escape_attr, is_raw_text_element, is_void_element};

/// Tag of the synthetic document root.
const ROOT_TAG: &str = "#document";

/// Document-level errors.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("failed to parse HTML: {0}")]
    Parse(String),

    #[error("cannot insert <{child}> into <{parent}>: would create a cycle")]
    Hierarchy { parent: String, child: String },
}

/// A host document: a root element plus its mutation notification bus.
pub struct Document {
    root: Element,
    bus: Rc<MutationBus>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let bus = Rc::new(MutationBus::new());
        let root = Element::new(ROOT_TAG, Rc::clone(&bus));
        Self { root, bus }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Create a detached element owned by this document.
    pub fn create_element(&self, tag: &str) -> Element {
        Element::new(tag, Rc::clone(&self.bus))
    }

    /// Mutation notification service for this document.
    pub fn mutations(&self) -> Rc<MutationBus> {
        Rc::clone(&self.bus)
    }

    /// Deliver queued mutation records. Returns the number of batches sent.
    pub fn flush_mutations(&self) -> usize {
        self.bus.flush()
    }

    /// True if `element` is reachable from the document root.
    pub fn is_connected(&self, element: &Element) -> bool {
        self.root.contains(element)
    }

    /// Serialize the document's content (the synthetic root is omitted).
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.root.children() {
            render_node(&child, false, &mut out);
        }
        out
    }
}

impl Element {
    /// Serialize this element and its subtree.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        render_element(self, &mut out);
        out
    }
}

fn render_node(node: &Node, raw_text: bool, out: &mut String) {
    match node {
        Node::Text(text) if raw_text => out.push_str(text),
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Element(elem) => render_element(elem, out),
    }
}

fn render_element(elem: &Element, out: &mut String) {
    let tag = elem.tag();
    out.push('<');
    out.push_str(&tag);
    for (name, value) in elem.attrs() {
        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&escape_attr(&value));
        out.push('"');
    }
    out.push('>');

    if is_void_element(&tag) {
        return;
    }

    let raw_text = is_raw_text_element(&tag);
    for child in elem.children() {
        render_node(&child, raw_text, out);
    }

    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_round_trip_shape() {
        let html = r#"<div class="slide"><img src="a.png"/><p>a &amp; b</p></div>"#;
        let doc = Document::parse(html).unwrap();
        assert_eq!(
            doc.to_html(),
            r#"<div class="slide"><img src="a.png"><p>a &amp; b</p></div>"#
        );
    }

    #[test]
    fn test_render_escapes_attr_values() {
        let doc = Document::new();
        let a = doc.create_element("a");
        a.set_attr("title", "say \"hi\"");
        assert_eq!(a.to_html(), r#"<a title="say &quot;hi&quot;"></a>"#);
    }

    #[test]
    fn test_is_connected() {
        let doc = Document::parse("<div><span></span></div>").unwrap();
        let span = doc.root().query_tags(&["span"]).remove(0);
        assert!(doc.is_connected(&span));

        span.detach();
        assert!(!doc.is_connected(&span));
    }

    #[test]
    fn test_unobserved_changes_queue_nothing() {
        let doc = Document::parse("<div></div>").unwrap();
        let div = doc.root().child_elements().remove(0);
        div.add_class("remark-visible");
        assert_eq!(doc.flush_mutations(), 0);
    }
}

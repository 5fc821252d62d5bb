//! HTML → element tree, built on `tl`.

use std::rc::Rc;

use super::html::{is_raw_text_element, unescape};
use super::node::{Element, Node};
use super::{Document, DomError};
use crate::observe::MutationBus;

impl Document {
    /// Parse an HTML document or fragment.
    ///
    /// Top-level nodes become children of the document root. Comments are
    /// dropped; text (including whitespace) is kept so the tree serializes
    /// back to equivalent markup.
    pub fn parse(html: &str) -> Result<Self, DomError> {
        let dom = tl::parse(html, tl::ParserOptions::default())
            .map_err(|e| DomError::Parse(format!("{e:?}")))?;
        let parser = dom.parser();

        let doc = Document::new();
        for handle in dom.children() {
            if let Some(node) = convert(*handle, parser, &doc.bus, false) {
                doc.root().append_child(node)?;
            }
        }
        Ok(doc)
    }
}

/// Convert a tl node handle into a detached node.
fn convert(
    handle: tl::NodeHandle,
    parser: &tl::Parser,
    bus: &Rc<MutationBus>,
    raw_text: bool,
) -> Option<Node> {
    match handle.get(parser)? {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str().to_lowercase();
            let elem = Element::new(&name, Rc::clone(bus));

            for (key, value) in tag.attributes().iter() {
                let key: &str = key.as_ref();
                let value = value.map(|v| unescape(&v).into_owned()).unwrap_or_default();
                elem.set_attr(&key.to_ascii_lowercase(), value);
            }

            let raw_children = is_raw_text_element(&name);
            for child in tag.children().top().iter() {
                if let Some(node) = convert(*child, parser, bus, raw_children) {
                    elem.append_child(node).ok()?;
                }
            }

            Some(Node::Element(elem))
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            let text = if raw_text {
                text.into_owned()
            } else {
                unescape(&text).into_owned()
            };
            Some(Node::Text(text))
        }
        tl::Node::Comment(_) => None,
    }
}

//! Descendant queries.
//!
//! Only the two selector shapes the slide hooks need: tag names
//! (`img, iframe`) and a single class (`.chart`).

use super::node::{Element, Node};

/// A minimal element selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<'a> {
    /// Matches any of the listed tag names (case-insensitive).
    Tags(&'a [&'a str]),
    /// Matches elements carrying the class token.
    Class(&'a str),
}

impl Selector<'_> {
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Tags(tags) => tags.iter().any(|t| element.is_tag(t)),
            Selector::Class(class) => element.has_class(class),
        }
    }
}

impl Element {
    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    /// Descendants matching `selector`, in document order.
    pub fn query_all(&self, selector: &Selector<'_>) -> Vec<Element> {
        self.descendants()
            .into_iter()
            .filter(|e| selector.matches(e))
            .collect()
    }

    pub fn query_tags(&self, tags: &[&str]) -> Vec<Element> {
        self.query_all(&Selector::Tags(tags))
    }

    pub fn query_class(&self, class: &str) -> Vec<Element> {
        self.query_all(&Selector::Class(class))
    }
}

fn collect_descendants(element: &Element, out: &mut Vec<Element>) {
    for child in element.children() {
        if let Node::Element(child) = child {
            out.push(child.clone());
            collect_descendants(&child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_descendants_document_order() {
        let doc = Document::parse(
            r#"<div id="a"><p id="b"><span id="c"></span></p><p id="d"></p></div>"#,
        )
        .unwrap();
        let ids: Vec<_> = doc
            .root()
            .descendants()
            .iter()
            .filter_map(|e| e.get_attr("id"))
            .collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_query_excludes_self() {
        let doc = Document::parse(r#"<div class="chart"><div class="chart"></div></div>"#).unwrap();
        let outer = doc.root().child_elements().remove(0);
        assert_eq!(outer.query_class("chart").len(), 1);
        assert_eq!(doc.root().query_class("chart").len(), 2);
    }

    #[test]
    fn test_query_tags() {
        let doc =
            Document::parse(r#"<section><IMG src="a"/><iframe></iframe><video></video></section>"#)
                .unwrap();
        let found = doc.root().query_tags(&["img", "iframe"]);
        assert_eq!(found.len(), 2);
        assert!(found[0].is_tag("img"));
        assert!(found[1].is_tag("iframe"));
    }
}

//! External link handling.
//!
//! Anchors whose `href` starts with `http:` or `https:` open in a new
//! browsing context. Other schemes (`mailto:`, fragments, relative paths)
//! are left alone.

use crate::config::LinksConfig;
use crate::dom::Element;

/// Check if an href uses the http or https scheme.
///
/// Case-sensitive prefix match, the same test a `^https?:` pattern makes.
#[inline]
pub fn is_http_link(href: &str) -> bool {
    href.starts_with("http:") || href.starts_with("https:")
}

/// Give every external anchor under `root` a new-window target.
///
/// Returns the number of anchors updated.
pub fn open_external_links(root: &Element, config: &LinksConfig) -> usize {
    let mut updated = 0;
    for anchor in root.query_tags(&["a"]) {
        if anchor.get_attr("href").is_some_and(|href| is_http_link(&href)) {
            anchor.set_attr("target", config.target.as_str());
            updated += 1;
        }
    }
    updated
}

//! Deferred media activation.
//!
//! `<img data-src="..">` and `<iframe data-src="..">` carry their real
//! source in a marker attribute so nothing loads until the slide is first
//! shown. Activation promotes the marker to `src` and removes it, which makes
//! the operation naturally one-shot per element.

use crate::config::MediaConfig;
use crate::dom::Element;

/// Promote deferred sources on eligible descendants of `root`.
///
/// Returns the number of elements activated.
pub fn activate_deferred_media(root: &Element, config: &MediaConfig) -> usize {
    let mut activated = 0;
    for elem in root.query_tags(&config.tag_refs()) {
        let Some(src) = elem.get_attr(&config.deferred_attr) else {
            continue;
        };
        elem.set_attr("src", src);
        elem.remove_attr(&config.deferred_attr);
        activated += 1;
    }
    activated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_promotes_and_removes_marker() {
        let doc = Document::parse(
            r#"<div>
                <img id="a" data-src="a.png"/>
                <iframe id="b" data-src="https://player/1"></iframe>
                <img id="c" src="eager.png"/>
                <video id="d" data-src="v.mp4"></video>
            </div>"#,
        )
        .unwrap();

        assert_eq!(activate_deferred_media(doc.root(), &MediaConfig::default()), 2);

        let by_id = |id: &str| {
            doc.root()
                .descendants()
                .into_iter()
                .find(|e| e.get_attr("id").as_deref() == Some(id))
                .unwrap()
        };

        let a = by_id("a");
        assert_eq!(a.get_attr("src").as_deref(), Some("a.png"));
        assert!(!a.has_attr("data-src"));

        let b = by_id("b");
        assert_eq!(b.get_attr("src").as_deref(), Some("https://player/1"));
        assert!(!b.has_attr("data-src"));

        // Untouched: no marker, or not an eligible tag
        assert_eq!(by_id("c").get_attr("src").as_deref(), Some("eager.png"));
        assert_eq!(by_id("d").get_attr("data-src").as_deref(), Some("v.mp4"));
        assert!(!by_id("d").has_attr("src"));
    }

    #[test]
    fn test_second_activation_is_noop() {
        let doc = Document::parse(r#"<img data-src="a.png"/>"#).unwrap();
        let config = MediaConfig::default();
        assert_eq!(activate_deferred_media(doc.root(), &config), 1);

        let img = doc.root().child_elements().remove(0);
        img.set_attr("src", "swapped.png");
        assert_eq!(activate_deferred_media(doc.root(), &config), 0);
        assert_eq!(img.get_attr("src").as_deref(), Some("swapped.png"));
    }
}

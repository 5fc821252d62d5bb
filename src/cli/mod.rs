//! Command-line interface module.

mod args;
pub mod inspect;
pub mod run;
pub mod timeline;

pub use args::{Cli, Commands};

use slidewatch::dom::Element;

/// Return "s" suffix for plural counts
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

/// `tag#id` when the slide has an id, else `tag`.
pub fn slide_label(slide: &Element) -> String {
    match slide.get_attr("id") {
        Some(id) => format!("{}#{}", slide.tag(), id),
        None => slide.tag(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "chart"), "0 charts");
        assert_eq!(plural_count(1, "chart"), "1 chart");
        assert_eq!(plural_count(2, "link"), "2 links");
    }
}

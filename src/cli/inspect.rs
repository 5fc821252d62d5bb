//! `slidewatch inspect`: list each slide's first-appearance work.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use slidewatch::appear::is_http_link;
use slidewatch::config::SlideConfig;
use slidewatch::dom::{Document, Element};
use slidewatch::log;

use super::{plural_count, slide_label};

/// What one slide will touch when it first appears.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SlideSummary {
    pub label: String,
    pub visible: bool,
    pub external_links: Vec<String>,
    pub deferred_media: Vec<String>,
    /// `(type, src)` per chart placeholder.
    pub charts: Vec<(Option<String>, Option<String>)>,
}

impl SlideSummary {
    pub fn collect(slide: &Element, config: &SlideConfig) -> Self {
        let external_links = slide
            .query_tags(&["a"])
            .iter()
            .filter_map(|a| a.get_attr("href"))
            .filter(|href| is_http_link(href))
            .collect();

        let deferred_media = slide
            .query_tags(&config.media.tag_refs())
            .iter()
            .filter_map(|m| m.get_attr(&config.media.deferred_attr))
            .collect();

        let charts = slide
            .query_class(&config.charts.class)
            .iter()
            .map(|c| (c.get_attr(&config.charts.type_attr), c.get_attr(&config.charts.src_attr)))
            .collect();

        Self {
            label: slide_label(slide),
            visible: slide.has_class(&config.lifecycle.visible_class),
            external_links,
            deferred_media,
            charts,
        }
    }

    fn print(&self, index: usize) {
        let marker = if self.visible { " (visible)" } else { "" };
        println!("{} {}{}", format!("#{}", index).bold(), self.label, marker.dimmed());
        for href in &self.external_links {
            println!("    {} {}", "link ".cyan(), href);
        }
        for src in &self.deferred_media {
            println!("    {} {}", "media".blue(), src);
        }
        for (kind, src) in &self.charts {
            let kind = kind.as_deref().unwrap_or("?");
            match src {
                Some(src) => println!("    {} {} {}", "chart".magenta(), kind, src),
                None => println!("    {} {} {}", "chart".magenta(), kind, "(no source)".red()),
            }
        }
    }
}

pub fn inspect_deck(deck: &Path, config: &SlideConfig) -> Result<()> {
    let html = fs::read_to_string(deck)
        .with_context(|| format!("failed to read deck `{}`", deck.display()))?;
    let doc = Document::parse(&html)
        .with_context(|| format!("failed to parse deck `{}`", deck.display()))?;

    let summaries: Vec<_> = doc
        .root()
        .query_class(&config.deck.slide_class)
        .iter()
        .map(|slide| SlideSummary::collect(slide, config))
        .collect();

    for (i, summary) in summaries.iter().enumerate() {
        summary.print(i + 1);
    }

    let charts: usize = summaries.iter().map(|s| s.charts.len()).sum();
    log!(
        "deck";
        "{}, {}",
        plural_count(summaries.len(), "slide"),
        plural_count(charts, "chart")
    );
    Ok(())
}

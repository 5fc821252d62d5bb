//! First-appearance side effects of a slide.
//!
//! Run once, when a slide is first shown:
//!
//! | Step    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `link`  | http/https anchors open in a new browsing context   |
//! | `media` | deferred `img`/`iframe` sources are promoted to src |
//! | `chart` | each chart placeholder is fetched and rendered      |
//! | embed   | optional third-party widget loader is invoked       |
//!
//! Links and media complete before [`activate`] returns. Chart pipelines
//! are started but not awaited.

mod chart;
mod link;
mod media;

pub use chart::{ChartServices, launch_charts};
pub use link::{is_http_link, open_external_links};
pub use media::activate_deferred_media;

use tokio::task::JoinHandle;

use crate::config::SlideConfig;
use crate::dom::Element;

/// Third-party embed library hook (tweet cards and the like).
pub trait EmbedLoader {
    /// Scan `container` and upgrade any embeds found in it.
    fn load(&self, container: &Element);
}

/// Stand-in embed loader that only reports the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceEmbedLoader;

impl EmbedLoader for TraceEmbedLoader {
    fn load(&self, container: &Element) {
        crate::debug!("embed"; "load widgets in <{}> {}", container.tag(), container.id());
    }
}

/// Summary of one activation.
#[derive(Debug, Default)]
pub struct AppearReport {
    pub links: usize,
    pub media: usize,
    /// Running chart pipelines, one per placeholder.
    pub charts: Vec<JoinHandle<()>>,
    pub embeds_loaded: bool,
}

/// Run every first-appearance effect on `slide`.
///
/// Must be called inside a `LocalSet` (chart pipelines are local tasks).
pub fn activate(
    slide: &Element,
    config: &SlideConfig,
    charts: &ChartServices,
    embed: Option<&dyn EmbedLoader>,
) -> AppearReport {
    let links = open_external_links(slide, &config.links);
    let media = activate_deferred_media(slide, &config.media);
    let charts = launch_charts(slide, &config.charts, charts);

    let embeds_loaded = match embed {
        Some(loader) if config.embed.enable => {
            loader.load(slide);
            true
        }
        _ => false,
    };

    crate::debug!(
        "slide";
        "activated {}: {} links, {} media, {} charts",
        slide.id(),
        links,
        media,
        charts.len()
    );

    AppearReport {
        links,
        media,
        charts,
        embeds_loaded,
    }
}

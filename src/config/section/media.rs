//! `[media]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [media]
//! deferred_attr = "data-src"     # Marker holding the real source until first appearance
//! tags = ["img", "iframe"]       # Elements eligible for deferred loading
//! ```

use serde::Deserialize;

use crate::config::ConfigDiagnostics;

/// Deferred media loading settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Attribute carrying the deferred source.
    pub deferred_attr: String,

    /// Tags whose deferred source is promoted to `src`.
    pub tags: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            deferred_attr: "data-src".into(),
            tags: vec!["img".into(), "iframe".into()],
        }
    }
}

impl MediaConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        diag.check_token("media.deferred_attr", &self.deferred_attr);
        if self.deferred_attr == "src" {
            diag.error("media.deferred_attr", "must differ from `src`");
        }
        if self.tags.is_empty() {
            diag.error_with_hint(
                "media.tags",
                "must list at least one tag",
                "the default is [\"img\", \"iframe\"]",
            );
        }
        for tag in &self.tags {
            diag.check_token("media.tags", tag);
        }
    }

    /// Tag list as borrowed slices, for selector queries.
    pub fn tag_refs(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }
}

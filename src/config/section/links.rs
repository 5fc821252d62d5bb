//! `[links]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [links]
//! target = "_blank"   # Browsing context for http/https links
//! ```

use serde::Deserialize;

use crate::config::ConfigDiagnostics;

/// External link settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Value written to `target` on external anchors.
    pub target: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            target: "_blank".into(),
        }
    }
}

impl LinksConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        diag.check_token("links.target", &self.target);
    }
}

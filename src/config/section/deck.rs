//! `[deck]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [deck]
//! slide_class = "remark-slide-container"   # One element per slide carries this class
//! ```

use serde::Deserialize;

use crate::config::ConfigDiagnostics;

/// Deck document settings (used by the CLI to locate slides).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    pub slide_class: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            slide_class: "remark-slide-container".into(),
        }
    }
}

impl DeckConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        diag.check_token("deck.slide_class", &self.slide_class);
    }
}

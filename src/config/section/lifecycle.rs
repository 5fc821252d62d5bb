//! `[lifecycle]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [lifecycle]
//! visible_class = "remark-visible"   # Class the deck engine puts on the visible slide
//! ```

use serde::Deserialize;

use crate::config::ConfigDiagnostics;

/// Slide lifecycle settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecycleConfig {
    /// Class token marking the currently visible slide.
    pub visible_class: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            visible_class: "remark-visible".into(),
        }
    }
}

impl LifecycleConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        diag.check_token("lifecycle.visible_class", &self.visible_class);
    }
}

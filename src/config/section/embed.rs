//! `[embed]` section configuration.
//!
//! ```toml
//! [embed]
//! enable = false   # Ask the embed widget loader to scan each slide on appearance
//! ```

use serde::Deserialize;

/// Third-party embed widget settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedConfig {
    pub enable: bool,
}

//! Configuration management for `slidewatch.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/   # [lifecycle] [deck] [links] [media] [charts] [embed]
//! ├── error.rs   # ConfigError, ConfigDiagnostics
//! ├── util.rs    # config file discovery
//! └── mod.rs     # SlideConfig (this file)
//! ```
//!
//! Every section is optional; an empty file (or no file) yields the
//! defaults, which match remark-style decks.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use section::{
    ChartsConfig, DeckConfig, EmbedConfig, LifecycleConfig, LinksConfig, MediaConfig,
};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::log;
use util::find_config_file;

/// Default config file name, searched upward from the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "slidewatch.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing slidewatch.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideConfig {
    /// Path the config was loaded from (empty when using defaults)
    #[serde(skip)]
    pub config_path: PathBuf,

    pub lifecycle: LifecycleConfig,
    pub deck: DeckConfig,
    pub links: LinksConfig,
    pub media: MediaConfig,
    pub charts: ChartsConfig,
    pub embed: EmbedConfig,
}

impl SlideConfig {
    /// Load configuration for the CLI.
    ///
    /// An explicit path must exist. Without one, `slidewatch.toml` is
    /// searched upward from the working directory and defaults are used if
    /// none is found.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path)
                .with_context(|| format!("failed to load config `{}`", path.display()));
        }

        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        match find_config_file(&cwd, Path::new(DEFAULT_CONFIG_NAME)) {
            Some(path) => {
                crate::debug!("config"; "using {}", path.display());
                Self::from_path(&path)
                    .with_context(|| format!("failed to load config `{}`", path.display()))
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG_NAME);
                Ok(Self::default())
            }
        }
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Validate every section, collecting all failures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.lifecycle.validate(&mut diag);
        self.deck.validate(&mut diag);
        self.links.validate(&mut diag);
        self.media.validate(&mut diag);
        self.charts.validate(&mut diag);

        if self.deck.slide_class == self.lifecycle.visible_class {
            log!(
                "warning";
                "deck.slide_class equals lifecycle.visible_class (`{}`): every slide starts visible",
                self.deck.slide_class
            );
        }

        diag.into_result()
    }
}

/// Parse a config snippet for section tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SlideConfig {
    SlideConfig::from_str(content).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_is_default() {
        let config = test_parse_config("");
        assert_eq!(config.lifecycle.visible_class, "remark-visible");
        assert_eq!(config.deck.slide_class, "remark-slide-container");
        assert_eq!(config.links.target, "_blank");
        assert!(!config.embed.enable);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SlideConfig::from_str("[links]\ntarget = \"_blank\"\nrel = \"noopener\"");
        assert!(matches!(err, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_path_records_location() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, "[embed]\nenable = true\n").unwrap();

        let config = SlideConfig::from_path(&path).unwrap();
        assert!(config.embed.enable);
        assert_eq!(config.config_path, path);
    }

    #[test]
    fn test_from_path_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = SlideConfig::from_path(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_load_explicit_missing_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        assert!(SlideConfig::load(Some(&missing)).is_err());
    }
}

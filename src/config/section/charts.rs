//! `[charts]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [charts]
//! class = "chart"          # Placeholder class
//! type_attr = "data-type"  # "bar" | "wordtree"
//! src_attr = "data-src"    # URL of the JSON payload
//! ```

use serde::Deserialize;

use crate::config::ConfigDiagnostics;

/// Chart placeholder settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartsConfig {
    pub class: String,
    pub type_attr: String,
    pub src_attr: String,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            class: "chart".into(),
            type_attr: "data-type".into(),
            src_attr: "data-src".into(),
        }
    }
}

impl ChartsConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        diag.check_token("charts.class", &self.class);
        diag.check_token("charts.type_attr", &self.type_attr);
        diag.check_token("charts.src_attr", &self.src_attr);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigError, SlideConfig, test_parse_config};

    #[test]
    fn test_charts_partial_override() {
        let config = test_parse_config("[charts]\nclass = \"plot\"");
        assert_eq!(config.charts.class, "plot");
        assert_eq!(config.charts.type_attr, "data-type");
        assert_eq!(config.charts.src_attr, "data-src");
    }

    #[test]
    fn test_charts_collects_all_errors() {
        let err = SlideConfig::from_str("[charts]\nclass = \"\"\ntype_attr = \"a b\"").unwrap_err();
        let ConfigError::Diagnostics(diag) = err else {
            panic!("expected diagnostics, got {err:?}");
        };
        assert_eq!(diag.errors().len(), 2);
    }
}

//! Scripted deck-engine actions.
//!
//! ```toml
//! [[step]]
//! action = "show"
//! slide = 1
//!
//! [[step]]
//! action = "wait"
//! ms = 200
//!
//! [[step]]
//! action = "remove"
//! slide = 1
//! ```
//!
//! Slides are numbered from 1 in document order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase", deny_unknown_fields)]
pub enum Step {
    /// Move the visibility marker to this slide.
    Show { slide: usize },
    /// Detach this slide from its parent.
    Remove { slide: usize },
    /// Sleep.
    Wait { ms: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timeline {
    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

impl Timeline {
    /// Show each slide in turn, then remove them all.
    pub fn walkthrough(slides: usize) -> Self {
        let shows = (1..=slides).map(|slide| Step::Show { slide });
        let removes = (1..=slides).map(|slide| Step::Remove { slide });
        Self {
            steps: shows.chain(removes).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read timeline `{}`", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid timeline `{}`", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check every slide number against the deck size.
    pub fn check(&self, slides: usize) -> Result<()> {
        for (n, step) in self.steps.iter().enumerate() {
            if let Step::Show { slide } | Step::Remove { slide } = *step
                && !(1..=slides).contains(&slide)
            {
                bail!(
                    "step {}: slide {} out of range (deck has {} slide{})",
                    n + 1,
                    slide,
                    slides,
                    super::plural_s(slides)
                );
            }
        }
        Ok(())
    }
}

//! Chart collaborators.
//!
//! A chart placeholder names a kind (`data-type`) and a payload URL
//! (`data-src`). The slide hands the URL to a [`ChartFetcher`] and the parsed
//! payload to a [`ChartRenderer`]. Neither drawing nor network transport
//! lives here:
//!
//! - `fetch` - fetcher seam plus a `file:` URL implementation
//! - `render` - renderer seam plus a tracing stand-in

mod fetch;
mod render;

pub use fetch::{ChartFetcher, FetchFuture, FileFetcher};
pub use render::{ChartRenderer, TraceRenderer};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Renderer selected by a placeholder's type attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    WordTree,
}

impl ChartKind {
    /// Parse a type attribute value. Unknown types yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bar" => Some(Self::Bar),
            "wordtree" => Some(Self::WordTree),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::WordTree => "wordtree",
        }
    }
}

/// Fetched chart payload.
///
/// Missing fields are `null`, so a payload lacking `options` still renders.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartPayload {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub options: Value,
}

impl ChartPayload {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ChartError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Failures of one chart's fetch-and-render pipeline.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart placeholder has no `{0}` attribute")]
    MissingSource(String),

    #[error("invalid chart URL `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme `{scheme}` for `{url}`")]
    UnsupportedScheme { scheme: String, url: String },

    #[error("failed to read `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("chart payload is not valid JSON")]
    Json(#[from] serde_json::Error),
}

//! Chart payload fetching.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use url::Url;

use super::{ChartError, ChartPayload};

/// Future returned by [`ChartFetcher::fetch`]. Local: slides run on a
/// single-threaded executor.
pub type FetchFuture = Pin<Box<dyn Future<Output = Result<ChartPayload, ChartError>>>>;

/// Given a URL, asynchronously produce a chart payload.
///
/// Failures are returned as-is; callers neither retry nor recover.
pub trait ChartFetcher {
    fn fetch(&self, src: &str) -> FetchFuture;
}

/// Fetches payloads from `file:` URLs, resolving relative sources against a
/// base URL (usually the deck file's location).
#[derive(Debug, Clone)]
pub struct FileFetcher {
    base: Url,
}

impl FileFetcher {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Base URL for a deck file on disk.
    pub fn for_document(path: &std::path::Path) -> Option<Self> {
        let absolute = std::path::absolute(path).ok()?;
        Url::from_file_path(absolute).ok().map(Self::new)
    }

    /// Resolve `src` against the base and map it to a local path.
    pub fn resolve(&self, src: &str) -> Result<PathBuf, ChartError> {
        let url = self.base.join(src).map_err(|source| ChartError::InvalidUrl {
            url: src.to_string(),
            source,
        })?;

        if url.scheme() != "file" {
            return Err(ChartError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
                url: url.to_string(),
            });
        }

        url.to_file_path()
            .map_err(|()| ChartError::UnsupportedScheme {
                scheme: "file".to_string(),
                url: url.to_string(),
            })
    }
}

impl ChartFetcher for FileFetcher {
    fn fetch(&self, src: &str) -> FetchFuture {
        let resolved = self.resolve(src);
        Box::pin(async move {
            let path = resolved?;
            crate::debug!("chart"; "reading {}", path.display());
            let bytes = tokio::fs::read(&path).await.map_err(|source| ChartError::Io {
                path: path.display().to_string(),
                source,
            })?;
            ChartPayload::from_slice(&bytes)
        })
    }
}

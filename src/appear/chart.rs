//! Chart placeholder pipelines.
//!
//! Each placeholder gets its own local task: fetch the payload, then hand
//! it to the renderer picked by the type attribute. Tasks are independent.
//! A failing fetch ends only its own task and is reported to the log at the
//! task boundary. Unknown types are skipped without a report.

use std::rc::Rc;

use tokio::task::JoinHandle;

use crate::chart::{ChartError, ChartFetcher, ChartKind, ChartRenderer};
use crate::config::ChartsConfig;
use crate::dom::Element;

/// Fetcher and renderer used by chart pipelines.
#[derive(Clone)]
pub struct ChartServices {
    pub fetcher: Rc<dyn ChartFetcher>,
    pub renderer: Rc<dyn ChartRenderer>,
}

impl ChartServices {
    pub fn new(fetcher: Rc<dyn ChartFetcher>, renderer: Rc<dyn ChartRenderer>) -> Self {
        Self { fetcher, renderer }
    }
}

/// What a placeholder declared when the slide appeared.
#[derive(Debug, Clone)]
struct Placeholder {
    container: Element,
    kind: Option<String>,
    src: Option<String>,
}

/// Start one pipeline per chart placeholder under `root`.
///
/// Must be called inside a `LocalSet`. The returned handles may be dropped;
/// the pipelines keep running.
pub fn launch_charts(
    root: &Element,
    config: &ChartsConfig,
    services: &ChartServices,
) -> Vec<JoinHandle<()>> {
    root.query_class(&config.class)
        .into_iter()
        .map(|container| {
            let placeholder = Placeholder {
                kind: container.get_attr(&config.type_attr),
                src: container.get_attr(&config.src_attr),
                container,
            };
            let services = services.clone();
            let src_attr = config.src_attr.clone();

            tokio::task::spawn_local(async move {
                let label = placeholder.src.clone().unwrap_or_default();
                if let Err(e) = run_pipeline(placeholder, &src_attr, &services).await {
                    crate::log!("chart"; "{}: {:#}", label, anyhow::Error::new(e));
                }
            })
        })
        .collect()
}

/// Fetch, then render. Returns the kind rendered, or `None` for unknown types.
async fn run_pipeline(
    placeholder: Placeholder,
    src_attr: &str,
    services: &ChartServices,
) -> Result<Option<ChartKind>, ChartError> {
    let src = placeholder
        .src
        .ok_or_else(|| ChartError::MissingSource(src_attr.to_string()))?;

    crate::debug!("chart"; "fetching {}", src);
    let payload = services.fetcher.fetch(&src).await?;

    let Some(kind) = placeholder.kind.as_deref().and_then(ChartKind::parse) else {
        crate::debug!("chart"; "skipping {}: unknown type {:?}", src, placeholder.kind);
        return Ok(None);
    };

    services
        .renderer
        .render(kind, &placeholder.container, &payload.data, &payload.options);
    Ok(Some(kind))
}

//! Test doubles for slide collaborators.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::appear::{ChartServices, EmbedLoader};
use crate::chart::{ChartError, ChartFetcher, ChartKind, ChartPayload, ChartRenderer, FetchFuture};
use crate::dom::Element;
use crate::lifecycle::{Slide, SlideHooks, StandardHooks};
use crate::observe::{MutationSource, ObserveFilter, Subscription};

/// Shared, ordered event log.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Let local tasks run until they block.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// Renderer
// ============================================================================

#[derive(Debug, Clone)]
pub struct RenderCall {
    pub kind: ChartKind,
    pub container: Element,
    pub data: Value,
    pub options: Value,
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: RefCell<Vec<RenderCall>>,
}

impl RecordingRenderer {
    fn record(&self, kind: ChartKind, container: &Element, data: &Value, options: &Value) {
        self.calls.borrow_mut().push(RenderCall {
            kind,
            container: container.clone(),
            data: data.clone(),
            options: options.clone(),
        });
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render_bar_chart(&self, container: &Element, data: &Value, options: &Value) {
        self.record(ChartKind::Bar, container, data, options);
    }

    fn render_word_tree(&self, container: &Element, data: &Value, options: &Value) {
        self.record(ChartKind::WordTree, container, data, options);
    }
}

// ============================================================================
// Fetcher
// ============================================================================

/// Serves canned JSON bodies by URL; anything else fails with NotFound.
#[derive(Default)]
pub struct ScriptedFetcher {
    bodies: FxHashMap<String, String>,
    pub requests: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }
}

impl ChartFetcher for ScriptedFetcher {
    fn fetch(&self, src: &str) -> FetchFuture {
        self.requests.borrow_mut().push(src.to_string());
        let result = match self.bodies.get(src) {
            Some(body) => ChartPayload::from_slice(body.as_bytes()),
            None => Err(ChartError::Io {
                path: src.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        };
        Box::pin(async move {
            tokio::task::yield_now().await;
            result
        })
    }
}

/// Chart services backed by the given doubles.
pub fn services(fetcher: &Rc<ScriptedFetcher>, renderer: &Rc<RecordingRenderer>) -> ChartServices {
    ChartServices::new(fetcher.clone(), renderer.clone())
}

// ============================================================================
// Mutation source
// ============================================================================

/// Forwards to an inner source and logs each registration.
pub struct RecordingSource<S> {
    pub inner: S,
    pub log: EventLog,
}

impl<S: MutationSource> MutationSource for RecordingSource<S> {
    fn observe(&self, scope: &Element, filter: ObserveFilter) -> Subscription {
        let name = match filter {
            ObserveFilter::Attributes => "observe:attributes",
            ObserveFilter::ChildList => "observe:childlist",
        };
        self.log.borrow_mut().push(name.to_string());
        self.inner.observe(scope, filter)
    }
}

// ============================================================================
// Embed loader
// ============================================================================

#[derive(Default)]
pub struct RecordingEmbedLoader {
    pub loaded: RefCell<Vec<Element>>,
}

impl EmbedLoader for RecordingEmbedLoader {
    fn load(&self, container: &Element) {
        self.loaded.borrow_mut().push(container.clone());
    }
}

// ============================================================================
// Hooks
// ============================================================================

/// Logs `mount`, `appear` and `unmount` to a shared event log. With
/// `standard`, appearance also runs the stock effects.
pub struct RecordingHooks {
    pub log: EventLog,
    pub standard: bool,
}

impl RecordingHooks {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            standard: false,
        }
    }

    pub fn standard(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            standard: true,
        }
    }
}

impl SlideHooks for RecordingHooks {
    fn on_mount(&self, _slide: &Slide) {
        self.log.borrow_mut().push("mount".into());
    }

    fn on_appear(&self, slide: &Slide) {
        self.log.borrow_mut().push("appear".into());
        if self.standard {
            StandardHooks.on_appear(slide);
        }
    }

    fn on_unmount(&self, _slide: &Slide) {
        self.log.borrow_mut().push("unmount".into());
    }
}

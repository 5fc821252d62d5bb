//! Slide lifecycle.
//!
//! One [`Slide`] per managed element, driven through four phases:
//!
//! ```text
//! Created --> Mounted --(appear)--> Appeared --(unmount)--> Unmounted
//!               |                      |                       |
//!           on_mount              on_appear               on_unmount
//! ```
//!
//! `on_mount` runs synchronously inside [`Slide::spawn`]. The rest runs in a
//! local task that waits on two one-shot detectors:
//!
//! - [`AppearDetector`] watches the slide's class attribute for the
//!   visibility marker.
//! - [`UnmountDetector`] watches the parent's child list for the slide's
//!   removal. It is armed only after `on_appear` returns.
//!
//! Neither wait has a timeout.

mod appear;
mod hooks;
mod unmount;

pub use appear::AppearDetector;
pub use hooks::{SlideHooks, StandardHooks};
pub use unmount::UnmountDetector;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::appear::{ChartServices, EmbedLoader};
use crate::config::SlideConfig;
use crate::dom::{Element, NodeId};
use crate::observe::MutationSource;

/// Lifecycle phase. Ordered; a slide's phase only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Created,
    Mounted,
    Appeared,
    Unmounted,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Mounted => "mounted",
            Self::Appeared => "appeared",
            Self::Unmounted => "unmounted",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("slide <{tag}> {id} has no parent to watch for removal")]
    Detached { tag: String, id: NodeId },
}

/// Collaborators shared by every slide of a deck.
#[derive(Clone)]
pub struct SlideEnv {
    pub config: Rc<SlideConfig>,
    pub mutations: Rc<dyn MutationSource>,
    pub charts: ChartServices,
    pub embed: Option<Rc<dyn EmbedLoader>>,
}

impl SlideEnv {
    pub fn new(
        config: Rc<SlideConfig>,
        mutations: Rc<dyn MutationSource>,
        charts: ChartServices,
    ) -> Self {
        Self {
            config,
            mutations,
            charts,
            embed: None,
        }
    }

    pub fn with_embed(mut self, loader: Rc<dyn EmbedLoader>) -> Self {
        self.embed = Some(loader);
        self
    }
}

/// A managed slide element, as seen by its hooks.
pub struct Slide {
    target: Element,
    env: SlideEnv,
    phase: Rc<Cell<Phase>>,
}

impl Slide {
    /// Start managing `target`.
    ///
    /// Runs `on_mount` and arms the appear detector before returning; the
    /// rest of the sequence runs as a local task, so this must be called
    /// inside a `LocalSet`. The handle may be dropped without affecting the
    /// slide.
    pub fn spawn<H>(target: Element, env: SlideEnv, hooks: H) -> SlideHandle
    where
        H: SlideHooks + 'static,
    {
        let phase = Rc::new(Cell::new(Phase::Created));
        let slide = Slide {
            target: target.clone(),
            env,
            phase: phase.clone(),
        };
        crate::debug!("slide"; "created {}", target.id());

        slide.advance(Phase::Mounted);
        hooks.on_mount(&slide);

        let appear = AppearDetector::arm(
            &slide.target,
            &slide.env.config.lifecycle.visible_class,
            slide.env.mutations.as_ref(),
        );
        let task = tokio::task::spawn_local(slide.drive(hooks, appear));

        SlideHandle {
            target,
            phase,
            task,
        }
    }

    pub fn target(&self) -> &Element {
        &self.target
    }

    pub fn env(&self) -> &SlideEnv {
        &self.env
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    async fn drive<H: SlideHooks>(self, hooks: H, mut appear: AppearDetector) {
        appear.wait().await;
        self.advance(Phase::Appeared);
        hooks.on_appear(&self);

        let mut unmount = match UnmountDetector::arm(&self.target, self.env.mutations.as_ref()) {
            Ok(detector) => detector,
            Err(e) => {
                // Nothing left to observe: stay in Appeared.
                crate::log!("slide"; "{}", e);
                return std::future::pending().await;
            }
        };
        unmount.wait().await;
        self.advance(Phase::Unmounted);
        hooks.on_unmount(&self);
    }

    fn advance(&self, next: Phase) {
        debug_assert!(next > self.phase.get());
        self.phase.set(next);
        crate::debug!("slide"; "{} {}", self.target.id(), next);
    }
}

/// Observer's view of a spawned slide.
pub struct SlideHandle {
    target: Element,
    phase: Rc<Cell<Phase>>,
    task: JoinHandle<()>,
}

impl SlideHandle {
    pub fn target(&self) -> &Element {
        &self.target
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    /// True once `on_unmount` has returned.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl fmt::Debug for SlideHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideHandle")
            .field("target", &self.target.id())
            .field("phase", &self.phase.get())
            .finish()
    }
}

use super::Slide;
use crate::appear;

/// Lifecycle callbacks. Each runs at most once per slide, in declaration
/// order. All default to no-ops.
pub trait SlideHooks {
    fn on_mount(&self, _slide: &Slide) {}

    fn on_appear(&self, _slide: &Slide) {}

    fn on_unmount(&self, _slide: &Slide) {}
}

/// No callbacks at all.
impl SlideHooks for () {}

/// Stock slide behavior: every first-appearance effect of [`appear::activate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardHooks;

impl SlideHooks for StandardHooks {
    fn on_appear(&self, slide: &Slide) {
        let env = slide.env();
        appear::activate(
            slide.target(),
            &env.config,
            &env.charts,
            env.embed.as_deref(),
        );
    }
}

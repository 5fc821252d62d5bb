//! `slidewatch run`: replay a timeline against a deck.
//!
//! Plays the deck engine's part. Every slide gets a lifecycle with the stock
//! hooks, then the timeline moves the visibility marker and detaches slides.
//! Queued mutations are delivered after each step.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use owo_colors::OwoColorize;
use tokio::task::{JoinHandle, LocalSet};

use slidewatch::appear::{self, ChartServices, TraceEmbedLoader};
use slidewatch::chart::{FileFetcher, TraceRenderer};
use slidewatch::config::SlideConfig;
use slidewatch::dom::{Document, Element};
use slidewatch::lifecycle::{Phase, Slide, SlideEnv, SlideHandle, SlideHooks};
use slidewatch::{debug, debug_do, log};

use super::args::RunArgs;
use super::timeline::{Step, Timeline};
use super::{plural_count, slide_label};

/// Chart tasks started by `on_appear`, awaited before reporting.
type PendingCharts = Rc<RefCell<Vec<JoinHandle<()>>>>;

/// Stock appearance effects, with per-slide progress lines.
struct DeckHooks {
    index: usize,
    charts: PendingCharts,
}

impl SlideHooks for DeckHooks {
    fn on_mount(&self, slide: &Slide) {
        debug!("slide"; "#{} {} mounted", self.index, slide_label(slide.target()));
    }

    fn on_appear(&self, slide: &Slide) {
        let env = slide.env();
        let report = appear::activate(slide.target(), &env.config, &env.charts, env.embed.as_deref());
        log!(
            "slide";
            "#{} appeared: {}, {}, {}",
            self.index,
            plural_count(report.links, "link"),
            plural_count(report.media, "media source"),
            plural_count(report.charts.len(), "chart")
        );
        self.charts.borrow_mut().extend(report.charts);
    }

    fn on_unmount(&self, _slide: &Slide) {
        log!("slide"; "#{} unmounted", self.index);
    }
}

pub fn run_deck(args: &RunArgs, config: SlideConfig) -> Result<()> {
    let html = fs::read_to_string(&args.deck)
        .with_context(|| format!("failed to read deck `{}`", args.deck.display()))?;
    let doc = Document::parse(&html)
        .with_context(|| format!("failed to parse deck `{}`", args.deck.display()))?;

    let slides = doc.root().query_class(&config.deck.slide_class);
    if slides.is_empty() {
        bail!(
            "no `.{}` elements in `{}`",
            config.deck.slide_class,
            args.deck.display()
        );
    }

    let timeline = match &args.timeline {
        Some(path) => Timeline::load(path)?,
        None => Timeline::walkthrough(slides.len()),
    };
    timeline.check(slides.len())?;
    debug_do! {
        for step in &timeline.steps {
            debug!("deck"; "step {:?}", step);
        }
    }

    let env = build_env(&doc, &args.deck, config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let local = LocalSet::new();
    let handles = local.block_on(&runtime, replay(&doc, &slides, &timeline, env));

    print_summary(&handles);

    if let Some(out) = &args.emit {
        fs::write(out, doc.to_html())
            .with_context(|| format!("failed to write `{}`", out.display()))?;
        log!("deck"; "wrote {}", out.display());
    }
    Ok(())
}

fn build_env(doc: &Document, deck: &Path, config: SlideConfig) -> Result<SlideEnv> {
    let fetcher = FileFetcher::for_document(deck)
        .ok_or_else(|| anyhow!("cannot build a file URL for `{}`", deck.display()))?;
    let charts = ChartServices::new(Rc::new(fetcher), Rc::new(TraceRenderer));
    let embed = config.embed.enable;

    let env = SlideEnv::new(Rc::new(config), doc.mutations(), charts);
    Ok(if embed {
        env.with_embed(Rc::new(TraceEmbedLoader))
    } else {
        env
    })
}

async fn replay(
    doc: &Document,
    slides: &[Element],
    timeline: &Timeline,
    env: SlideEnv,
) -> Vec<SlideHandle> {
    let charts = PendingCharts::default();
    let visible = env.config.lifecycle.visible_class.clone();

    let handles: Vec<_> = slides
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let hooks = DeckHooks {
                index: i + 1,
                charts: charts.clone(),
            };
            Slide::spawn(slide.clone(), env.clone(), hooks)
        })
        .collect();
    checkpoint(doc).await;

    for step in &timeline.steps {
        match *step {
            Step::Show { slide } => {
                for other in slides {
                    other.remove_class(&visible);
                }
                slides[slide - 1].add_class(&visible);
            }
            Step::Remove { slide } => {
                if !slides[slide - 1].detach() {
                    debug!("deck"; "slide #{} already detached", slide);
                }
            }
            Step::Wait { ms } => tokio::time::sleep(Duration::from_millis(ms)).await,
        }
        checkpoint(doc).await;
    }

    let pending = std::mem::take(&mut *charts.borrow_mut());
    for task in pending {
        if let Err(e) = task.await {
            log!("chart"; "task failed: {}", e);
        }
    }
    handles
}

/// Deliver queued mutations until the document is quiet, letting slide
/// tasks run in between.
async fn checkpoint(doc: &Document) {
    loop {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        if doc.flush_mutations() == 0 {
            break;
        }
    }
}

fn print_summary(handles: &[SlideHandle]) {
    for (i, handle) in handles.iter().enumerate() {
        let phase = handle.phase();
        let shown = match phase {
            Phase::Unmounted => phase.as_str().green().to_string(),
            Phase::Appeared => phase.as_str().yellow().to_string(),
            Phase::Created | Phase::Mounted => phase.as_str().dimmed().to_string(),
        };
        println!("  #{:<3} {:<24} {}", i + 1, slide_label(handle.target()), shown);
    }

    let unmounted = handles
        .iter()
        .filter(|h| h.phase() == Phase::Unmounted)
        .count();
    log!(
        "deck";
        "{} of {} unmounted",
        unmounted,
        plural_count(handles.len(), "slide")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DECK: &str = r#"<html><body>
<div class="remark-slide-container" id="one"><a href="https://x.org">x</a><img data-src="a.png"/></div>
<div class="remark-slide-container" id="two"><div class="chart" data-type="bar" data-src="bar.json"></div></div>
</body></html>"#;

    struct Replayed {
        doc: Document,
        slides: Vec<Element>,
        phases: Vec<Phase>,
    }

    fn replay_deck(dir: &Path, timeline: &Timeline) -> Replayed {
        std::fs::write(dir.join("bar.json"), r#"{"data": [["a", 1]]}"#).unwrap();
        let doc = Document::parse(DECK).unwrap();
        let config = SlideConfig::default();
        let slides = doc.root().query_class(&config.deck.slide_class);
        let env = build_env(&doc, &dir.join("deck.html"), config).unwrap();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let handles = LocalSet::new().block_on(&runtime, replay(&doc, &slides, timeline, env));
        let phases = handles.iter().map(SlideHandle::phase).collect();

        Replayed { doc, slides, phases }
    }

    #[test]
    fn test_walkthrough_unmounts_every_slide() {
        let temp = TempDir::new().unwrap();
        let replayed = replay_deck(temp.path(), &Timeline::walkthrough(2));

        assert_eq!(replayed.phases, [Phase::Unmounted, Phase::Unmounted]);
        assert!(!replayed.doc.to_html().contains("remark-slide-container"));

        let chart = replayed.slides[1].query_class("chart").remove(0);
        assert_eq!(chart.get_attr("data-rendered").as_deref(), Some("bar"));
    }

    #[test]
    fn test_partial_timeline() {
        let temp = TempDir::new().unwrap();
        let timeline = Timeline {
            steps: vec![Step::Show { slide: 1 }, Step::Wait { ms: 5 }],
        };
        let replayed = replay_deck(temp.path(), &timeline);

        assert_eq!(replayed.phases, [Phase::Appeared, Phase::Mounted]);
        let html = replayed.doc.to_html();
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"src="a.png""#));
        assert!(html.contains(r#"data-src="bar.json""#));
        assert!(!html.contains("data-rendered"));
    }

    #[test]
    fn test_run_deck_emits_document() {
        let temp = TempDir::new().unwrap();
        let deck = temp.path().join("deck.html");
        std::fs::write(&deck, DECK).unwrap();
        std::fs::write(temp.path().join("timeline.toml"), "[[step]]\naction = \"show\"\nslide = 2\n")
            .unwrap();
        std::fs::write(temp.path().join("bar.json"), r#"{"data": []}"#).unwrap();

        let args = RunArgs {
            deck,
            timeline: Some(temp.path().join("timeline.toml")),
            emit: Some(temp.path().join("out.html")),
        };
        run_deck(&args, SlideConfig::default()).unwrap();

        let html = std::fs::read_to_string(temp.path().join("out.html")).unwrap();
        assert!(html.contains(r#"data-rendered="bar""#));
        assert!(html.contains("remark-visible"));
    }

    #[test]
    fn test_run_deck_rejects_out_of_range_step() {
        let temp = TempDir::new().unwrap();
        let deck = temp.path().join("deck.html");
        std::fs::write(&deck, DECK).unwrap();
        std::fs::write(temp.path().join("t.toml"), "[[step]]\naction = \"remove\"\nslide = 9\n")
            .unwrap();

        let args = RunArgs {
            deck,
            timeline: Some(temp.path().join("t.toml")),
            emit: None,
        };
        assert!(run_deck(&args, SlideConfig::default()).is_err());
    }
}

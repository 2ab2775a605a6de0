//! Drive a collection view through a gesture script.

use anyconf_model::{ModelError, Session};
use anyconf_pager::{
    CollectionOptions, CollectionView, DocumentPointerHub, ManualFrameScheduler,
    PageWindow, PointerOutcome, RenderedItem, TweenRunner,
};
use anyhow::Context;

use crate::models::ViewerConfig;
use crate::script::{GestureStep, ReplayScript};

/// Upper bound on settle rounds; a commit chain is at most two transitions
/// deep.
const MAX_SETTLE_ROUNDS: usize = 8;

/// Page window observed after a release step.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRecord {
    pub step: usize,
    pub outcome: PointerOutcome,
    pub window: Option<PageWindow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    pub pages: usize,
    pub releases: Vec<ReleaseRecord>,
    /// Window once the whole script has run.
    pub final_window: Option<PageWindow>,
}

/// Render `sessions` with fixed card heights and replay `script` against
/// them.
pub fn replay(
    config: &ViewerConfig,
    sessions: &[Session],
    script: &ReplayScript,
) -> anyhow::Result<ReplayReport> {
    let runner = TweenRunner::new(config.pager.easing);
    let frames = ManualFrameScheduler::new();
    let hub = DocumentPointerHub::new();

    let mut options = CollectionOptions::new("replay");
    if let Some(day) = config.day.clone() {
        options = options
            .with_filter(move |session: &Session| session.is_on(&day));
    }

    let mut view = CollectionView::new(
        options,
        config.pager.clone(),
        runner.clone(),
        frames.clone(),
        &hub,
    )
    .context("failed to create collection view")?;

    let item_height = config.item_height;
    let mut measure = |session: &Session| -> Result<RenderedItem, ModelError> {
        Ok(RenderedItem::new(session.id.clone(), item_height))
    };
    view.render(sessions, &mut measure, None, None)
        .context("failed to render sessions")?;
    settle(&runner, &mut view);

    let pages = view.engine().pages().len();
    tracing::info!("rendered {} sessions into {pages} pages", sessions.len());

    let mut releases = Vec::new();
    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!("step {index}: {step:?}");
        let event = step.event().unwrap_or_default();
        match step {
            GestureStep::Down { .. } => {
                view.pointer_down(&event);
            }
            GestureStep::Move { .. } => {
                view.pointer_move(&event);
            }
            GestureStep::Up { .. } | GestureStep::Cancel { .. } => {
                let outcome = if matches!(step, GestureStep::Up { .. }) {
                    view.pointer_up(&event)
                } else {
                    view.pointer_cancel(&event)
                };
                let window = view.engine().window();
                tracing::info!("step {index}: {outcome:?}, window {window:?}");
                releases.push(ReleaseRecord {
                    step: index,
                    outcome,
                    window,
                });
            }
            GestureStep::Frame => {
                for handle in frames.take_pending() {
                    view.on_frame(handle);
                }
            }
            GestureStep::Settle => settle(&runner, &mut view),
        }
    }

    let final_window = view.engine().window();
    view.destroy();
    Ok(ReplayReport {
        pages,
        releases,
        final_window,
    })
}

fn settle(runner: &TweenRunner, view: &mut CollectionView<Session>) {
    for _ in 0..MAX_SETTLE_ROUNDS {
        runner.interrupt_all();
        if view.pump() == 0 && runner.is_idle() {
            return;
        }
    }
    tracing::warn!(
        "transitions still running after {MAX_SETTLE_ROUNDS} settle rounds"
    );
}


//! Paging engine
//!
//! Owns the packed pages, the {previous, current, next} window, the overlay
//! and the gesture session, and turns pointer input into page transitions.
//!
//! The engine never animates anything itself. Transitions go to the host's
//! [`TransitionRunner`] together with a single-use completion; the host
//! calls [`PagingEngine::pump`] to let finished transitions advance the
//! commit chain. Drag frames are drawn from [`PagingEngine::on_frame`],
//! driven by the host's [`FrameScheduler`].

use std::collections::HashMap;
use std::fmt;

use anyconf_model::ItemId;
use futures::channel::oneshot;

use crate::config::PagerConfig;
use crate::constants::transition::NONE_ID;
use crate::error::{PagerError, Result};
use crate::frame::{FrameHandle, FrameScheduler};
use crate::gesture::{
    DragFrame, GesturePhase, GestureTracker, Release, Settle, TrackOutcome,
};
use crate::overlay::Overlay;
use crate::packer::PackedPages;
use crate::page::{Page, PageId};
use crate::pointer::{EventTarget, PointerEvent, PointerOutcome};
use crate::surface::{ViewDisplay, ViewSurface};
use crate::transition::{
    Completion, OVERLAY_TRANSITION_ID, PAGE_TRANSITION_ID, TransitionKind,
    TransitionRequest, TransitionRunner, TransitionTarget,
};
use crate::window::PageWindow;

/// What to do once a transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionAction {
    AdvancedToNext { page: PageId, next: PageId },
    RetreatedToPrevious { previous: PageId },
    PreviousDismissed { previous: PageId, current: PageId },
    CurrentRestored { current: PageId },
    OverlayFaded,
    ViewEntered,
    ViewLeft,
}

#[derive(Debug)]
struct PendingTransition {
    generation: u64,
    receiver: oneshot::Receiver<()>,
    action: CompletionAction,
}

pub struct PagingEngine {
    config: PagerConfig,
    pages: Vec<Page>,
    pages_by_item: HashMap<ItemId, PageId>,
    window: Option<PageWindow>,
    overlay: Overlay,
    tracker: GestureTracker,
    animating: bool,
    frame: Option<FrameHandle>,
    pending: Vec<PendingTransition>,
    /// Bumped whenever outstanding completions must be ignored.
    generation: u64,
    surface: ViewSurface,
    runner: Box<dyn TransitionRunner>,
    scheduler: Box<dyn FrameScheduler>,
}

impl fmt::Debug for PagingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagingEngine")
            .field("pages", &self.pages.len())
            .field("window", &self.window)
            .field("overlay", &self.overlay)
            .field("animating", &self.animating)
            .field("frame", &self.frame)
            .field("pending", &self.pending.len())
            .field("generation", &self.generation)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

impl PagingEngine {
    pub fn new(
        config: PagerConfig,
        runner: impl TransitionRunner + 'static,
        scheduler: impl FrameScheduler + 'static,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tracker: GestureTracker::new((&config).into()),
            config,
            pages: Vec::new(),
            pages_by_item: HashMap::new(),
            window: None,
            overlay: Overlay::default(),
            animating: false,
            frame: None,
            pending: Vec::new(),
            generation: 0,
            surface: ViewSurface::default(),
            runner: Box::new(runner),
            scheduler: Box::new(scheduler),
        })
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(id.index())
    }

    pub fn window(&self) -> Option<PageWindow> {
        self.window
    }

    pub fn current_page(&self) -> Option<PageId> {
        self.window.map(|window| window.current)
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn gesture(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn surface(&self) -> &ViewSurface {
        &self.surface
    }

    /// Frame the engine is waiting on, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    pub fn pending_transitions(&self) -> usize {
        self.pending.len()
    }

    pub fn page_for_item(&self, id: &ItemId) -> Option<PageId> {
        self.pages_by_item.get(id).copied()
    }

    pub fn first_page(&self) -> Option<PageId> {
        self.pages.first().map(Page::id)
    }

    /// Drop every page and all in-flight state.
    pub fn reset(&mut self) {
        self.halt();
        self.pages.clear();
        self.pages_by_item.clear();
        self.window = None;
        self.overlay.reset();
        self.surface.empty = false;
        self.surface.in_view = true;
    }

    pub fn install(&mut self, packed: PackedPages) {
        log::debug!("installing {} pages", packed.len());
        self.pages = packed.pages;
        self.pages_by_item = packed.by_item;
    }

    pub fn show_empty_page(&mut self) {
        self.surface.empty = true;
    }

    /// Make `page` current and update every page's visibility to match the
    /// new window.
    pub fn set_current_page(&mut self, page: PageId) -> Result<()> {
        let window = PageWindow::around(page, self.pages.len())
            .ok_or(PagerError::UnknownPage(page))?;

        for candidate in &mut self.pages {
            let id = Some(candidate.id());
            if candidate.id() == window.current || id == window.next {
                candidate.render();
            } else if id == window.previous {
                candidate.render_as_previous();
            } else {
                candidate.hide();
            }
        }

        log::debug!(
            "current page {page} (previous {:?}, next {:?})",
            window.previous,
            window.next
        );
        self.window = Some(window);
        Ok(())
    }

    pub fn position_overlay(&mut self) {
        if let Some(current) = self.current_page() {
            self.overlay.position(current);
        }
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) -> PointerOutcome {
        let current = match self.current_page() {
            Some(current) if !self.animating => current,
            _ => {
                log::debug!(
                    "pointer down ignored (animating: {})",
                    self.animating
                );
                return PointerOutcome::PreventDefault;
            }
        };

        self.tracker.begin(event.position, current);
        if let Some(page) = self.pages.get_mut(current.index()) {
            page.clear_motion();
        }
        self.request_frame();
        PointerOutcome::PassThrough
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> PointerOutcome {
        let Some(window) = self.window else {
            return PointerOutcome::PassThrough;
        };

        match self.tracker.track(event.position, &window) {
            TrackOutcome::SwipeAborted => self.cancel_frame(),
            TrackOutcome::Dragging(frame) => {
                log::trace!("drag {frame:?}");
            }
            TrackOutcome::Idle => {}
        }
        PointerOutcome::PassThrough
    }

    /// Release path shared by pointer up, cancel and leave, including
    /// releases observed at document level.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> PointerOutcome {
        self.cancel_frame();

        let Some(window) = self.window else {
            self.tracker.abandon();
            return match &event.target {
                EventTarget::Link { href } => {
                    log::debug!("tap on empty collection link {href}");
                    PointerOutcome::Navigate {
                        href: href.clone(),
                        transition: NONE_ID.to_string(),
                    }
                }
                EventTarget::Element => PointerOutcome::Consumed,
            };
        };

        let last_frame = self.dragging_frame();
        match self.tracker.release(&window) {
            Release::Untracked | Release::Tap => PointerOutcome::PassThrough,
            Release::Settle(settle) => {
                if let Some(frame) = last_frame {
                    self.draw(frame);
                }
                log::debug!("release settles as {settle:?}");
                match settle {
                    Settle::ToNext => self.transition_to_next(),
                    Settle::ToPrevious => self.transition_to_previous(),
                    Settle::PreviousAway => self.transition_previous_away(),
                    Settle::CurrentBack => self.transition_current_back(),
                    Settle::Stay => {}
                }
                self.pump();
                PointerOutcome::Consumed
            }
        }
    }

    /// Render tick. Returns `false` for frames the engine is not waiting on.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.frame != Some(handle) {
            return false;
        }
        self.frame = None;

        if let Some(frame) = self.dragging_frame() {
            self.draw(frame);
        }
        if self.tracker.is_tracking() {
            self.request_frame();
        }
        true
    }

    /// Advance the commit chain for every transition that has completed.
    /// Returns how many completions were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let ready = self.take_completed();
            if ready.is_empty() {
                return applied;
            }
            for (generation, action) in ready {
                if generation != self.generation {
                    log::debug!("ignoring stale completion {action:?}");
                    continue;
                }
                self.complete(action);
                applied += 1;
            }
        }
    }

    pub fn transition_to_next(&mut self) {
        let Some(PageWindow {
            current,
            next: Some(next),
            ..
        }) = self.window
        else {
            return;
        };
        let to = self.parked_offset(current);
        self.start_page_transition(
            current,
            TransitionKind::Out,
            to,
            CompletionAction::AdvancedToNext {
                page: current,
                next,
            },
        );
    }

    pub fn transition_to_previous(&mut self) {
        let Some(PageWindow {
            previous: Some(previous),
            ..
        }) = self.window
        else {
            return;
        };
        self.start_page_transition(
            previous,
            TransitionKind::In,
            0.0,
            CompletionAction::RetreatedToPrevious { previous },
        );
    }

    pub fn transition_previous_away(&mut self) {
        let Some(PageWindow {
            previous: Some(previous),
            current,
            ..
        }) = self.window
        else {
            return;
        };
        let to = self.parked_offset(previous);
        self.start_page_transition(
            previous,
            TransitionKind::Out,
            to,
            CompletionAction::PreviousDismissed { previous, current },
        );
    }

    /// Revert: play the current page back to rest.
    pub fn transition_current_back(&mut self) {
        let Some(current) = self.current_page() else {
            return;
        };
        self.overlay.set_opacity(1.0);
        self.start_page_transition(
            current,
            TransitionKind::In,
            0.0,
            CompletionAction::CurrentRestored { current },
        );
    }

    pub fn fade_overlay(&mut self) {
        self.overlay.begin_removal();
        self.animating = true;
        let duration = self.config.overlay_fade();
        self.dispatch(
            OVERLAY_TRANSITION_ID,
            TransitionKind::Out,
            TransitionTarget::Overlay,
            (1.0, 0.0),
            duration,
            CompletionAction::OverlayFaded,
        );
    }

    /// Transition the whole view in or out using the router's transition
    /// id.
    pub fn transition_view(
        &mut self,
        kind: TransitionKind,
        transition_id: &str,
    ) {
        if self.surface.motion == Some(kind) {
            log::error!("view is already transitioning {kind:?}");
            self.animating = false;
            return;
        }

        self.surface.motion = Some(kind);
        self.surface.clip_content = true;
        let (range, action) = match kind {
            TransitionKind::In => {
                self.surface.display = ViewDisplay::Shown;
                ((0.0, 1.0), CompletionAction::ViewEntered)
            }
            TransitionKind::Out => ((1.0, 0.0), CompletionAction::ViewLeft),
        };
        self.animating = true;
        let duration = self.config.view_transition();
        self.dispatch(
            transition_id,
            kind,
            TransitionTarget::View,
            range,
            duration,
            action,
        );
    }

    /// Stop tracking, cancel the frame tick and forget every outstanding
    /// completion.
    pub fn halt(&mut self) {
        self.tracker.abandon();
        self.cancel_frame();
        self.generation += 1;
        self.pending.clear();
        self.animating = false;
        self.surface.motion = None;
        self.surface.clip_content = false;
        for page in &mut self.pages {
            page.clear_motion();
        }
    }

    pub fn hide(&mut self) {
        self.halt();
        self.surface.display = ViewDisplay::Hidden;
    }

    /// Where `page` rests once it has moved out above the current page.
    fn parked_offset(&self, page: PageId) -> f32 {
        self.page(page)
            .map_or(-self.config.page_height, Page::parked_offset)
    }

    fn dragging_frame(&self) -> Option<DragFrame> {
        match self.tracker.phase() {
            Some(GesturePhase::Vertical(_)) => self.tracker.frame(),
            _ => None,
        }
    }

    fn draw(&mut self, frame: DragFrame) {
        if let Some(page) = self.pages.get_mut(frame.target.index()) {
            page.set_offset(frame.offset_y);
        }
        self.overlay.set_opacity(frame.overlay_opacity);
    }

    fn request_frame(&mut self) {
        self.cancel_frame();
        self.frame = Some(self.scheduler.request_frame());
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn start_page_transition(
        &mut self,
        page: PageId,
        kind: TransitionKind,
        to: f32,
        action: CompletionAction,
    ) {
        let Some(target) = self.pages.get_mut(page.index()) else {
            log::error!("transition requested for unknown {page}");
            return;
        };
        if !target.begin_motion(kind) {
            log::error!("{page} is already transitioning {kind:?}");
            self.animating = false;
            return;
        }

        let from = target.offset_y();
        self.animating = true;
        let duration = self.config.page_transition();
        self.dispatch(
            PAGE_TRANSITION_ID,
            kind,
            TransitionTarget::Page(page),
            (from, to),
            duration,
            action,
        );
    }

    fn dispatch(
        &mut self,
        id: &str,
        kind: TransitionKind,
        target: TransitionTarget,
        (from, to): (f32, f32),
        duration: std::time::Duration,
        action: CompletionAction,
    ) {
        let (completion, receiver) = Completion::channel();
        self.pending.push(PendingTransition {
            generation: self.generation,
            receiver,
            action,
        });
        self.runner.start_transition(TransitionRequest {
            id: id.to_string(),
            kind,
            target,
            from,
            to,
            duration,
            completion,
        });
    }

    fn take_completed(&mut self) -> Vec<(u64, CompletionAction)> {
        let mut ready = Vec::new();
        self.pending.retain_mut(|pending| {
            match pending.receiver.try_recv() {
                Ok(None) => true,
                // A dropped completion counts as fired.
                Ok(Some(())) | Err(oneshot::Canceled) => {
                    ready.push((pending.generation, pending.action));
                    false
                }
            }
        });
        ready
    }

    fn complete(&mut self, action: CompletionAction) {
        log::debug!("transition complete: {action:?}");
        match action {
            CompletionAction::AdvancedToNext { page, next } => {
                self.clear_motion(page);
                self.settle_on(next);
                self.overlay.clear_opacity();
                self.fade_overlay();
            }
            CompletionAction::OverlayFaded => {
                self.animating = false;
                self.position_overlay();
            }
            CompletionAction::RetreatedToPrevious { previous } => {
                self.clear_motion(previous);
                self.finish_commit(previous);
            }
            CompletionAction::PreviousDismissed { previous, current } => {
                self.clear_motion(previous);
                self.finish_commit(current);
            }
            CompletionAction::CurrentRestored { current } => {
                self.clear_motion(current);
                self.finish_commit(current);
            }
            CompletionAction::ViewEntered => {
                self.surface.motion = None;
                self.surface.clip_content = false;
                self.animating = false;
            }
            CompletionAction::ViewLeft => {
                self.surface.motion = None;
                self.surface.clip_content = false;
                self.surface.display = ViewDisplay::Hidden;
                self.surface.in_view = false;
                self.animating = false;
            }
        }
    }

    fn finish_commit(&mut self, current: PageId) {
        self.settle_on(current);
        self.position_overlay();
        self.overlay.clear_opacity();
        self.animating = false;
    }

    fn settle_on(&mut self, page: PageId) {
        if let Err(err) = self.set_current_page(page) {
            log::error!("failed to settle on {page}: {err}");
        }
    }

    fn clear_motion(&mut self, page: PageId) {
        if let Some(page) = self.pages.get_mut(page.index()) {
            page.clear_motion();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::MockFrameScheduler;
    use crate::packer::PageLayoutPacker;
    use crate::page::PageVisibility::{Rendered, RenderedAsPrevious};
    use crate::page::RenderedItem;
    use crate::transition::MockTransitionRunner;

    fn packed(pages: usize, page_height: f32) -> PackedPages {
        let mut packer = PageLayoutPacker::new(page_height);
        for i in 0..pages {
            packer.pack(RenderedItem::new(format!("item-{i}"), page_height));
        }
        packer.finish()
    }

    fn config() -> PagerConfig {
        PagerConfig::with_page_height(500.0)
    }

    fn immediate_runner() -> MockTransitionRunner {
        let mut runner = MockTransitionRunner::new();
        runner
            .expect_start_transition()
            .returning(|request| request.completion.complete());
        runner
    }

    fn counting_scheduler() -> MockFrameScheduler {
        let mut scheduler = MockFrameScheduler::new();
        let mut next = 0;
        scheduler.expect_request_frame().returning(move || {
            next += 1;
            FrameHandle(next)
        });
        scheduler.expect_cancel_frame().returning(|_| ());
        scheduler
    }

    fn engine_on(
        current: usize,
        runner: MockTransitionRunner,
        scheduler: MockFrameScheduler,
    ) -> PagingEngine {
        let mut engine =
            PagingEngine::new(config(), runner, scheduler).unwrap();
        engine.install(packed(3, 500.0));
        engine.set_current_page(PageId(current)).unwrap();
        engine.position_overlay();
        engine
    }

    #[test]
    fn rejects_invalid_config() {
        let config = PagerConfig {
            page_height: 0.0,
            ..PagerConfig::default()
        };
        let result = PagingEngine::new(
            config,
            MockTransitionRunner::new(),
            MockFrameScheduler::new(),
        );
        assert!(matches!(result, Err(PagerError::InvalidConfig(_))));
    }

    #[test]
    fn window_renders_neighbours() {
        let engine = engine_on(
            1,
            MockTransitionRunner::new(),
            MockFrameScheduler::new(),
        );
        let visibility: Vec<_> =
            engine.pages().iter().map(Page::visibility).collect();
        assert_eq!(visibility, vec![RenderedAsPrevious, Rendered, Rendered]);
        assert_eq!(engine.page(PageId(0)).unwrap().offset_y(), -500.0);
        assert_eq!(engine.overlay().anchor(), Some(PageId(1)));
    }

    #[test]
    fn unknown_page_is_an_error() {
        let mut engine = engine_on(
            0,
            MockTransitionRunner::new(),
            MockFrameScheduler::new(),
        );
        assert!(matches!(
            engine.set_current_page(PageId(7)),
            Err(PagerError::UnknownPage(PageId(7)))
        ));
        assert_eq!(engine.current_page(), Some(PageId(0)));
    }

    #[test]
    fn pointer_down_without_pages_is_suppressed() {
        let mut scheduler = MockFrameScheduler::new();
        scheduler.expect_request_frame().never();
        let mut engine =
            PagingEngine::new(config(), MockTransitionRunner::new(), scheduler)
                .unwrap();
        assert_eq!(
            engine.pointer_down(&PointerEvent::at(0.0, 0.0)),
            PointerOutcome::PreventDefault
        );
        assert!(!engine.gesture().is_tracking());
    }

    #[test]
    fn forward_drag_commits_through_overlay_fade() {
        let mut engine = engine_on(0, immediate_runner(), counting_scheduler());

        engine.pointer_down(&PointerEvent::at(50.0, 300.0));
        engine.pointer_move(&PointerEvent::at(50.0, 100.0));
        let handle = engine.pending_frame().unwrap();
        assert!(engine.on_frame(handle));
        assert!((engine.overlay().opacity().unwrap() - 0.6).abs() < 1e-6);
        assert_eq!(engine.page(PageId(0)).unwrap().offset_y(), -200.0);

        let outcome = engine.pointer_up(&PointerEvent::at(50.0, 100.0));
        assert_eq!(outcome, PointerOutcome::Consumed);
        assert_eq!(engine.current_page(), Some(PageId(1)));
        assert!(!engine.is_animating());
        assert_eq!(engine.overlay().opacity(), None);
        assert_eq!(engine.overlay().anchor(), Some(PageId(1)));
        assert!(!engine.overlay().is_removed());
        assert_eq!(engine.pending_frame(), None);
    }

    #[test]
    fn release_cancels_the_frame_tick() {
        let mut scheduler = MockFrameScheduler::new();
        scheduler
            .expect_request_frame()
            .times(1)
            .returning(|| FrameHandle(9));
        scheduler
            .expect_cancel_frame()
            .withf(|handle| *handle == FrameHandle(9))
            .times(1)
            .returning(|_| ());
        let mut engine = engine_on(0, MockTransitionRunner::new(), scheduler);

        engine.pointer_down(&PointerEvent::at(0.0, 0.0));
        assert_eq!(
            engine.pointer_up(&PointerEvent::at(0.0, 0.0)),
            PointerOutcome::PassThrough
        );
        assert!(!engine.on_frame(FrameHandle(9)));
    }

    #[test]
    fn pointer_down_is_blocked_while_a_commit_runs() {
        let mut runner = MockTransitionRunner::new();
        // Never fire the completion so the commit stays in flight.
        runner
            .expect_start_transition()
            .times(1)
            .returning(|request| std::mem::forget(request));
        let mut engine = engine_on(1, runner, counting_scheduler());

        engine.pointer_down(&PointerEvent::at(0.0, 300.0));
        engine.pointer_move(&PointerEvent::at(0.0, 200.0));
        engine.pointer_up(&PointerEvent::at(0.0, 200.0));
        assert!(engine.is_animating());

        assert_eq!(
            engine.pointer_down(&PointerEvent::at(0.0, 300.0)),
            PointerOutcome::PreventDefault
        );
    }

    #[test]
    fn duplicate_view_transition_is_refused() {
        let mut runner = MockTransitionRunner::new();
        runner
            .expect_start_transition()
            .times(1)
            .returning(|request| std::mem::forget(request));
        let mut engine = engine_on(0, runner, MockFrameScheduler::new());

        engine.transition_view(TransitionKind::In, "slide");
        assert!(engine.is_animating());
        engine.transition_view(TransitionKind::In, "slide");
        assert!(!engine.is_animating());
    }

    #[test]
    fn oversize_page_leaves_by_its_own_height() {
        let mut runner = MockTransitionRunner::new();
        runner
            .expect_start_transition()
            .withf(|request| {
                request.target == TransitionTarget::Page(PageId(0))
                    && request.to == -900.0
            })
            .times(1)
            .returning(|request| std::mem::forget(request));
        let mut engine =
            PagingEngine::new(config(), runner, MockFrameScheduler::new())
                .unwrap();

        let mut packer = PageLayoutPacker::new(500.0);
        packer.pack(RenderedItem::new("keynote", 900.0));
        packer.pack(RenderedItem::new("break", 100.0));
        engine.install(packer.finish());
        engine.set_current_page(PageId(1)).unwrap();
        assert_eq!(engine.page(PageId(0)).unwrap().offset_y(), -900.0);

        engine.set_current_page(PageId(0)).unwrap();
        engine.transition_to_next();
        assert!(engine.is_animating());
    }

    #[test]
    fn halted_completions_are_stale() {
        let mut runner = MockTransitionRunner::new();
        runner
            .expect_start_transition()
            .times(1)
            .returning(|request| request.completion.complete());
        let mut engine = engine_on(0, runner, MockFrameScheduler::new());

        engine.transition_view(TransitionKind::In, "none");
        engine.halt();
        assert_eq!(engine.pump(), 0);
        assert_eq!(engine.surface().motion, None);
        assert!(!engine.is_animating());
    }

    #[test]
    fn empty_collection_tap_on_link_navigates() {
        let mut engine = PagingEngine::new(
            config(),
            MockTransitionRunner::new(),
            MockFrameScheduler::new(),
        )
        .unwrap();
        engine.show_empty_page();
        assert_eq!(
            engine.pointer_up(&PointerEvent::on_link(0.0, 0.0, "/schedule")),
            PointerOutcome::Navigate {
                href: "/schedule".to_string(),
                transition: NONE_ID.to_string(),
            }
        );
        assert_eq!(
            engine.pointer_up(&PointerEvent::at(0.0, 0.0)),
            PointerOutcome::Consumed
        );
    }
}

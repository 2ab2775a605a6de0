#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use anyconf_model::ModelError;
use anyconf_pager::constants::transition::NONE_ID;
use anyconf_pager::{
    CollectionOptions, CollectionView, Completion, DocumentPointerHub,
    ManualFrameScheduler, PagerConfig, RenderedItem, TransitionKind,
    TransitionRequest, TransitionRunner, TransitionTarget,
};

pub const PAGE_HEIGHT: f32 = 500.0;

/// Minimal item standing in for a rendered session card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub height: f32,
}

pub fn cards(heights: &[f32]) -> Vec<Card> {
    heights
        .iter()
        .enumerate()
        .map(|(i, height)| Card {
            id: format!("item-{i}"),
            height: *height,
        })
        .collect()
}

pub fn measure(card: &Card) -> Result<RenderedItem, ModelError> {
    Ok(RenderedItem::new(card.id.as_str(), card.height))
}

/// Target, kind, from and to of a page transition.
pub type PageRequest = (TransitionTarget, TransitionKind, f32, f32);

#[derive(Debug)]
pub struct Recorded {
    pub id: String,
    pub kind: TransitionKind,
    pub target: TransitionTarget,
    pub from: f32,
    pub to: f32,
    completion: Option<Completion>,
}

/// Runner that records every request and holds completions until the test
/// fires them. `none` transitions complete immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    log: Rc<RefCell<Vec<Recorded>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> Vec<String> {
        self.log.borrow().iter().map(|r| r.id.clone()).collect()
    }

    pub fn page_requests(&self) -> Vec<PageRequest> {
        self.log
            .borrow()
            .iter()
            .filter(|r| matches!(r.target, TransitionTarget::Page(_)))
            .map(|r| (r.target, r.kind, r.from, r.to))
            .collect()
    }

    pub fn outstanding(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|r| r.completion.is_some())
            .count()
    }

    /// Fire every held completion. Returns how many fired.
    pub fn complete_all(&self) -> usize {
        let held: Vec<Completion> = self
            .log
            .borrow_mut()
            .iter_mut()
            .filter_map(|r| r.completion.take())
            .collect();
        let count = held.len();
        held.into_iter().for_each(Completion::complete);
        count
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl TransitionRunner for RecordingRunner {
    fn start_transition(&mut self, request: TransitionRequest) {
        let TransitionRequest {
            id,
            kind,
            target,
            from,
            to,
            completion,
            ..
        } = request;
        let completion = if id == NONE_ID {
            completion.complete();
            None
        } else {
            Some(completion)
        };
        self.log.borrow_mut().push(Recorded {
            id,
            kind,
            target,
            from,
            to,
            completion,
        });
    }
}

pub struct Harness {
    pub view: CollectionView<Card>,
    pub runner: RecordingRunner,
    pub frames: ManualFrameScheduler,
    pub hub: Rc<DocumentPointerHub>,
}

impl Harness {
    pub fn new(options: CollectionOptions<Card>) -> Self {
        let runner = RecordingRunner::new();
        let frames = ManualFrameScheduler::new();
        let hub = DocumentPointerHub::new();
        let view = CollectionView::new(
            options,
            PagerConfig::with_page_height(PAGE_HEIGHT),
            runner.clone(),
            frames.clone(),
            &hub,
        )
        .expect("valid pager config");
        Self {
            view,
            runner,
            frames,
            hub,
        }
    }

    /// Deliver every requested frame to the view.
    pub fn run_frames(&mut self) {
        for handle in self.frames.take_pending() {
            self.view.on_frame(handle);
        }
    }

    /// Fire held completions and let the view advance until nothing is left.
    pub fn settle(&mut self) {
        while self.runner.complete_all() > 0 {
            self.view.pump();
        }
    }
}

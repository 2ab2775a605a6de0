//! Transition requests and their completion signals
//!
//! The engine never animates anything itself. It hands a
//! [`TransitionRequest`] to a [`TransitionRunner`] and resumes its commit
//! chain once the request's [`Completion`] has fired.

pub mod tween;

use futures::channel::oneshot;
use std::time::Duration;

use crate::page::PageId;

pub use tween::{TweenRunner, TweenSample};

/// Id used for page enter/exit transitions.
pub const PAGE_TRANSITION_ID: &str = "page";
/// Id used for the overlay fade.
pub const OVERLAY_TRANSITION_ID: &str = "overlay";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    In,
    Out,
}

/// Element a transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionTarget {
    Page(PageId),
    Overlay,
    /// The whole collection view.
    View,
}

/// Single-use completion signal.
///
/// Call [`Completion::complete`] when the animation ends. Dropping the
/// signal without completing it also settles the transition, so an
/// interrupted animation can never stall the engine.
#[derive(Debug)]
#[must_use = "dropping a completion settles its transition immediately"]
pub struct Completion {
    sender: oneshot::Sender<()>,
}

impl Completion {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<()>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    pub fn complete(self) {
        // The engine may have been torn down meanwhile; nothing to notify.
        let _ = self.sender.send(());
    }

    /// Whether anyone is still waiting on this completion.
    pub fn is_awaited(&self) -> bool {
        !self.sender.is_canceled()
    }
}

/// One animation the runner must play.
///
/// `from` and `to` are the animated value: a vertical offset for pages, an
/// opacity for the overlay, and a progress fraction for the view.
#[derive(Debug)]
pub struct TransitionRequest {
    pub id: String,
    pub kind: TransitionKind,
    pub target: TransitionTarget,
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
    pub completion: Completion,
}

/// Plays transitions for the engine.
///
/// Implementations must eventually complete (or drop) every request's
/// completion exactly once.
#[cfg_attr(test, mockall::automock)]
pub trait TransitionRunner {
    fn start_transition(&mut self, request: TransitionRequest);
}

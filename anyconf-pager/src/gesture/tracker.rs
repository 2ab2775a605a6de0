//! Pointer session state machine
//!
//! A session starts on pointer-down and ends on release or when the first
//! movement turns out to be a horizontal swipe. Between those points the
//! session decides, exactly once, whether it is a vertical page drag, then
//! keeps a drag frame up to date for the render tick.

use crate::config::PagerConfig;
use crate::constants::gesture::RESTING_OVERLAY_OPACITY;
use crate::geometry::{Delta, Point};
use crate::page::PageId;
use crate::window::PageWindow;

use super::offsets::{backward_drag_offset, forward_overlay_opacity};

/// Geometry and feel parameters the tracker needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureMetrics {
    pub page_height: f32,
    pub backward_drag_gain: f32,
    pub opacity_decimals: u32,
}

impl From<&PagerConfig> for GestureMetrics {
    fn from(config: &PagerConfig) -> Self {
        Self {
            page_height: config.page_height,
            backward_drag_gain: config.backward_drag_gain,
            opacity_decimals: config.opacity_decimals,
        }
    }
}

/// Which page a vertical drag is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Current page pulled up, revealing the next one.
    Forward,
    /// Previous page pulled down over the current one.
    Backward,
    /// Pulling down at the start of the sequence; nothing moves.
    Pinned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// Pointer is down; the axis is decided on the first move.
    Deciding,
    Vertical(DragMode),
}

/// Values the render tick applies on each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    pub target: PageId,
    pub offset_y: f32,
    pub overlay_opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub start: Point,
    pub last: Point,
    pub last_delta: Delta,
    pub phase: GesturePhase,
    pub frame: DragFrame,
    /// Page the gesture would commit to on release.
    pub pending_target: Option<PageId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackOutcome {
    /// No session is active.
    Idle,
    /// First movement was horizontal; the session has ended.
    SwipeAborted,
    /// Vertical drag in progress.
    Dragging(DragFrame),
}

/// How a released drag settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Commit: the next page becomes current.
    ToNext,
    /// Commit: the previous page becomes current.
    ToPrevious,
    /// Snap the previous page back out of view; current is unchanged.
    PreviousAway,
    /// Revert: play the current page back to rest.
    CurrentBack,
    /// Nothing moved that needs settling.
    Stay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// No session was active (never started, or aborted as a swipe).
    Untracked,
    /// Pointer came up where it went down.
    Tap,
    Settle(Settle),
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    metrics: GestureMetrics,
    session: Option<GestureSession>,
}

impl GestureTracker {
    pub fn new(metrics: GestureMetrics) -> Self {
        Self {
            metrics,
            session: None,
        }
    }

    pub fn metrics(&self) -> GestureMetrics {
        self.metrics
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> Option<GesturePhase> {
        self.session.as_ref().map(|session| session.phase)
    }

    /// Drag values for the render tick.
    pub fn frame(&self) -> Option<DragFrame> {
        self.session.as_ref().map(|session| session.frame)
    }

    /// Start a fresh session on `current`. Any previous session is
    /// discarded.
    pub fn begin(&mut self, at: Point, current: PageId) {
        self.session = Some(GestureSession {
            start: at,
            last: at,
            last_delta: Delta::ZERO,
            phase: GesturePhase::Deciding,
            frame: DragFrame {
                target: current,
                offset_y: 0.0,
                overlay_opacity: RESTING_OVERLAY_OPACITY,
            },
            pending_target: None,
        });
    }

    pub fn track(&mut self, at: Point, window: &PageWindow) -> TrackOutcome {
        let Some(session) = self.session.as_mut() else {
            return TrackOutcome::Idle;
        };

        session.last_delta = at - session.last;
        session.last = at;

        if session.phase == GesturePhase::Deciding
            && session.last_delta.is_horizontal()
        {
            log::debug!("pointer session is a horizontal swipe, releasing it");
            self.session = None;
            return TrackOutcome::SwipeAborted;
        }

        let offset_y = at.y - session.start.y;
        let metrics = self.metrics;

        if offset_y < 0.0 {
            session.phase = GesturePhase::Vertical(DragMode::Forward);
            session.frame = DragFrame {
                target: window.current,
                offset_y,
                overlay_opacity: forward_overlay_opacity(
                    offset_y,
                    metrics.page_height,
                    metrics.opacity_decimals,
                ),
            };
            session.pending_target = window.next;
        } else if let Some(previous) = window.previous {
            session.phase = GesturePhase::Vertical(DragMode::Backward);
            session.frame = DragFrame {
                target: previous,
                offset_y: backward_drag_offset(
                    offset_y,
                    metrics.page_height,
                    metrics.backward_drag_gain,
                ),
                overlay_opacity: session.frame.overlay_opacity,
            };
            session.pending_target = Some(previous);
        } else {
            session.phase = GesturePhase::Vertical(DragMode::Pinned);
        }

        TrackOutcome::Dragging(session.frame)
    }

    /// End the session and decide how it settles.
    pub fn release(&mut self, window: &PageWindow) -> Release {
        let Some(session) = self.session.take() else {
            return Release::Untracked;
        };

        if session.start.y == session.last.y {
            return Release::Tap;
        }

        let pending = session.pending_target;
        let settle = if session.last_delta.dy > 0.0 {
            if window.previous.is_none() && pending.is_some() {
                Settle::CurrentBack
            } else if window.is_previous(pending) {
                Settle::ToPrevious
            } else {
                Settle::CurrentBack
            }
        } else if window.next.is_none() {
            Settle::CurrentBack
        } else if window.is_next(pending) {
            Settle::ToNext
        } else if window.previous.is_some() {
            Settle::PreviousAway
        } else {
            Settle::Stay
        };

        Release::Settle(settle)
    }

    /// Drop the session without settling it.
    pub fn abandon(&mut self) {
        self.session = None;
    }
}

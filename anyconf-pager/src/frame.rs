//! Per-frame render tick scheduling.

use std::cell::RefCell;
use std::rc::Rc;

/// Opaque handle for a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Host hook for requesting animation frames. The host calls back into the
/// engine's `on_frame` with the handle it returned.
#[cfg_attr(test, mockall::automock)]
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Default)]
struct FrameQueue {
    next_handle: u64,
    pending: Vec<FrameHandle>,
    cancelled: usize,
}

/// Scheduler for hosts that deliver frames by hand.
///
/// Clones share one queue: hand one to the engine and keep the other to
/// drain requested frames.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    queue: Rc<RefCell<FrameQueue>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and not yet taken or cancelled.
    pub fn pending(&self) -> Vec<FrameHandle> {
        self.queue.borrow().pending.clone()
    }

    pub fn take_pending(&self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.queue.borrow_mut().pending)
    }

    pub fn is_idle(&self) -> bool {
        self.queue.borrow().pending.is_empty()
    }

    pub fn cancelled_count(&self) -> usize {
        self.queue.borrow().cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let mut queue = self.queue.borrow_mut();
        queue.next_handle += 1;
        let handle = FrameHandle(queue.next_handle);
        queue.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut queue = self.queue.borrow_mut();
        let before = queue.pending.len();
        queue.pending.retain(|pending| *pending != handle);
        if queue.pending.len() != before {
            queue.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_queue() {
        let host = ManualFrameScheduler::new();
        let mut engine_side = host.clone();

        let first = engine_side.request_frame();
        let second = engine_side.request_frame();
        assert_ne!(first, second);
        assert_eq!(host.pending(), vec![first, second]);

        engine_side.cancel_frame(first);
        assert_eq!(host.cancelled_count(), 1);
        assert_eq!(host.take_pending(), vec![second]);
        assert!(host.is_idle());

        // Cancelling a frame that already ran is not counted.
        engine_side.cancel_frame(second);
        assert_eq!(host.cancelled_count(), 1);
    }
}

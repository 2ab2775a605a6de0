//! Time-based tween runner
//!
//! A ready-made [`TransitionRunner`] for hosts without their own animation
//! system. Each request becomes a tween from `from` to `to`; the host calls
//! [`TweenRunner::tick`] once per frame, applies the returned samples, and
//! finished tweens fire their completions.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::{
    Completion, TransitionKind, TransitionRequest, TransitionRunner,
    TransitionTarget,
};
use crate::config::EasingKind;
use crate::constants::transition::NONE_ID;

/// Interpolated value of one tween at a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    pub target: TransitionTarget,
    pub kind: TransitionKind,
    pub value: f32,
    pub finished: bool,
}

#[derive(Debug)]
struct Tween {
    target: TransitionTarget,
    kind: TransitionKind,
    start: f32,
    end: f32,
    started_at: Instant,
    duration: Duration,
    completion: Option<Completion>,
}

impl Tween {
    fn sample(&self, now: Instant, easing: EasingKind) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            return (self.end, true);
        }
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32())
            .clamp(0.0, 1.0);
        let eased = easing.apply(t);
        (self.start + (self.end - self.start) * eased, false)
    }
}

#[derive(Debug, Default)]
struct TweenQueue {
    easing: EasingKind,
    active: Vec<Tween>,
}

/// Shared handle; clones drive the same queue, so one copy can live inside
/// the engine while the host ticks another.
#[derive(Debug, Clone, Default)]
pub struct TweenRunner {
    queue: Rc<RefCell<TweenQueue>>,
}

impl TweenRunner {
    pub fn new(easing: EasingKind) -> Self {
        Self {
            queue: Rc::new(RefCell::new(TweenQueue {
                easing,
                active: Vec::new(),
            })),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.queue.borrow().active.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.queue.borrow().active.len()
    }

    /// Sample every active tween at `now`, completing the ones that have run
    /// their course.
    pub fn tick(&self, now: Instant) -> Vec<TweenSample> {
        let mut queue = self.queue.borrow_mut();
        let easing = queue.easing;
        let mut samples = Vec::with_capacity(queue.active.len());

        queue.active.retain_mut(|tween| {
            let (value, finished) = tween.sample(now, easing);
            samples.push(TweenSample {
                target: tween.target,
                kind: tween.kind,
                value,
                finished,
            });
            if finished && let Some(completion) = tween.completion.take() {
                completion.complete();
            }
            !finished
        });

        samples
    }

    /// Jump every active tween to its end and complete it.
    pub fn interrupt_all(&self) -> usize {
        let drained: Vec<Tween> =
            self.queue.borrow_mut().active.drain(..).collect();
        let count = drained.len();
        for mut tween in drained {
            if let Some(completion) = tween.completion.take() {
                completion.complete();
            }
        }
        if count > 0 {
            log::debug!("interrupted {count} tweens");
        }
        count
    }
}

impl TransitionRunner for TweenRunner {
    fn start_transition(&mut self, request: TransitionRequest) {
        if request.id == NONE_ID || request.duration.is_zero() {
            request.completion.complete();
            return;
        }

        log::debug!(
            "tween {:?} {:?} {} -> {} over {:?}",
            request.target,
            request.kind,
            request.from,
            request.to,
            request.duration
        );
        self.queue.borrow_mut().active.push(Tween {
            target: request.target,
            kind: request.kind,
            start: request.from,
            end: request.to,
            started_at: Instant::now(),
            duration: request.duration,
            completion: Some(request.completion),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageId;

    fn request(
        id: &str,
        duration: Duration,
    ) -> (TransitionRequest, futures::channel::oneshot::Receiver<()>) {
        let (completion, receiver) = Completion::channel();
        (
            TransitionRequest {
                id: id.to_string(),
                kind: TransitionKind::Out,
                target: TransitionTarget::Page(PageId(0)),
                from: 0.0,
                to: -500.0,
                duration,
                completion,
            },
            receiver,
        )
    }

    #[test]
    fn none_transitions_complete_immediately() {
        let mut runner = TweenRunner::new(EasingKind::Linear);
        let (req, mut rx) = request(NONE_ID, Duration::from_millis(300));
        runner.start_transition(req);
        assert!(runner.is_idle());
        assert_eq!(rx.try_recv(), Ok(Some(())));
    }

    #[test]
    fn tween_interpolates_then_completes() {
        let mut runner = TweenRunner::new(EasingKind::Linear);
        let (req, mut rx) = request("page", Duration::from_millis(200));
        runner.start_transition(req);

        let start = Instant::now();
        let samples = runner.tick(start);
        assert_eq!(samples.len(), 1);
        assert!(!samples[0].finished);
        assert!(samples[0].value <= 0.0 && samples[0].value > -500.0);
        assert_eq!(rx.try_recv(), Ok(None));

        let samples = runner.tick(start + Duration::from_secs(1));
        assert!(samples[0].finished);
        assert_eq!(samples[0].value, -500.0);
        assert_eq!(rx.try_recv(), Ok(Some(())));
        assert!(runner.is_idle());
    }

    #[test]
    fn interrupting_still_completes() {
        let mut runner = TweenRunner::new(EasingKind::EaseOut);
        let (req, mut rx) = request("page", Duration::from_secs(5));
        runner.start_transition(req);
        assert_eq!(runner.interrupt_all(), 1);
        assert_eq!(rx.try_recv(), Ok(Some(())));
    }
}

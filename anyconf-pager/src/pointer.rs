//! Pointer input and the outcome the host should apply to the event.

use crate::geometry::Point;

/// What the pointer event landed on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventTarget {
    #[default]
    Element,
    /// A navigable link.
    Link { href: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerEvent {
    pub position: Point,
    pub target: EventTarget,
}

impl PointerEvent {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            target: EventTarget::Element,
        }
    }

    pub fn on_link(x: f32, y: f32, href: impl Into<String>) -> Self {
        Self {
            position: Point::new(x, y),
            target: EventTarget::Link { href: href.into() },
        }
    }
}

/// Document-level pointer events used to recover releases that happen
/// outside the view's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentPointerKind {
    Up,
    Leave,
}

/// How the host should treat the event after the pager has seen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Default behaviour allowed, propagation continues.
    PassThrough,
    /// Suppress the default action only.
    PreventDefault,
    /// Suppress the default action (including the click) and propagation.
    Consumed,
    /// Suppress the event and navigate to `href`.
    Navigate { href: String, transition: String },
}

//! Pointer gesture tracking
//!
//! Turns a pointer-down/move/up session into a continuous drag frame (page
//! offset plus overlay opacity) and, on release, a discrete settle decision
//! for the paging engine.

pub mod offsets;
pub mod tracker;

pub use offsets::{backward_drag_offset, forward_overlay_opacity};
pub use tracker::{
    DragFrame, DragMode, GestureMetrics, GesturePhase, GestureSession,
    GestureTracker, Release, Settle, TrackOutcome,
};

//! Pager constants
//!
//! Shared defaults for page geometry, gesture feel and transition timing.
//! Tuning should happen here so every collection view updates consistently;
//! [`crate::config::PagerConfig`] falls back to these values.

/// Page geometry defaults.
pub mod layout {
    /// Fallback page height when the host does not report a viewport height
    /// (a common phone viewport).
    pub const DEFAULT_PAGE_HEIGHT: f32 = 667.0;
}

/// Pointer gesture tuning.
pub mod gesture {
    /// Amplification applied while pulling the previous page down, so it
    /// catches up with the finger over a shorter travel distance.
    pub const BACKWARD_DRAG_GAIN: f32 = 1.5;
    /// Decimal places kept for overlay opacity during a forward drag.
    pub const OPACITY_DECIMALS: u32 = 2;
    /// Overlay opacity while no drag progress has been made.
    pub const RESTING_OVERLAY_OPACITY: f32 = 1.0;
}

/// Transition timing defaults.
pub mod transition {
    /// Duration (ms) of page enter/exit transitions.
    pub const PAGE_DURATION_MS: u64 = 300;
    /// Duration (ms) of the overlay fade that precedes re-anchoring.
    pub const OVERLAY_FADE_MS: u64 = 200;
    /// Duration (ms) of whole-view enter/leave transitions.
    pub const VIEW_DURATION_MS: u64 = 350;
    /// Easing kind: 0=Linear, 1=EaseIn, 2=EaseOut, 3=EaseInOut, 4=EaseOutCubic.
    pub const EASING_KIND: u8 = 2;
    /// Transition id that completes without animating.
    pub const NONE_ID: &str = "none";
}

//! Pager configuration
//!
//! `PagerConfig` carries every tunable the engine reads. Fields default to
//! the compiled constants, so a partial TOML/JSON document only needs to name
//! what it overrides.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{gesture, layout, transition};
use crate::error::{PagerError, Result};

/// Easing curve used by the built-in tween runner.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingKind {
    Linear = 0,
    EaseIn = 1,
    #[default]
    EaseOut = 2,
    EaseInOut = 3,
    EaseOutCubic = 4,
}

impl EasingKind {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Linear,
            1 => Self::EaseIn,
            2 => Self::EaseOut,
            3 => Self::EaseInOut,
            4 => Self::EaseOutCubic,
            _ => Self::EaseOut,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Apply the curve to a progress value in `0.0..=1.0`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    pub const ALL: [Self; 5] = [
        Self::Linear,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::EaseOutCubic,
    ];
}

impl std::fmt::Display for EasingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::EaseIn => write!(f, "Ease In"),
            Self::EaseOut => write!(f, "Ease Out"),
            Self::EaseInOut => write!(f, "Ease In/Out"),
            Self::EaseOutCubic => write!(f, "Ease Out (Cubic)"),
        }
    }
}

/// Tunables for one collection view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Height of every page, in the host's pixel units. Usually the viewport
    /// height at mount time.
    pub page_height: f32,
    /// Amplification of the previous page's reveal during a backward drag.
    pub backward_drag_gain: f32,
    /// Decimal places kept for the overlay opacity during a forward drag.
    pub opacity_decimals: u32,
    /// Page enter/exit duration (ms).
    pub page_transition_ms: u64,
    /// Overlay fade duration (ms) after advancing to the next page.
    pub overlay_fade_ms: u64,
    /// Whole-view enter/leave duration (ms).
    pub view_transition_ms: u64,
    /// Easing used by the built-in tween runner.
    pub easing: EasingKind,
    /// Transition id used for view enter/leave when the router gives none.
    pub default_transition: String,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_height: layout::DEFAULT_PAGE_HEIGHT,
            backward_drag_gain: gesture::BACKWARD_DRAG_GAIN,
            opacity_decimals: gesture::OPACITY_DECIMALS,
            page_transition_ms: transition::PAGE_DURATION_MS,
            overlay_fade_ms: transition::OVERLAY_FADE_MS,
            view_transition_ms: transition::VIEW_DURATION_MS,
            easing: EasingKind::from_u8(transition::EASING_KIND),
            default_transition: transition::NONE_ID.to_string(),
        }
    }
}

impl PagerConfig {
    /// Defaults with an explicit page height.
    pub fn with_page_height(page_height: f32) -> Self {
        Self {
            page_height,
            ..Self::default()
        }
    }

    /// Reject values the gesture math cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.page_height.is_finite() || self.page_height <= 0.0 {
            return Err(PagerError::InvalidConfig(format!(
                "page_height must be a positive number, got {}",
                self.page_height
            )));
        }
        if !self.backward_drag_gain.is_finite()
            || self.backward_drag_gain < 1.0
        {
            return Err(PagerError::InvalidConfig(format!(
                "backward_drag_gain must be at least 1.0, got {}",
                self.backward_drag_gain
            )));
        }
        if self.opacity_decimals > 6 {
            return Err(PagerError::InvalidConfig(format!(
                "opacity_decimals above 6 is meaningless, got {}",
                self.opacity_decimals
            )));
        }
        Ok(())
    }

    pub fn page_transition(&self) -> Duration {
        Duration::from_millis(self.page_transition_ms)
    }

    pub fn overlay_fade(&self) -> Duration {
        Duration::from_millis(self.overlay_fade_ms)
    }

    pub fn view_transition(&self) -> Duration {
        Duration::from_millis(self.view_transition_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_fall_back_to_constants() {
        let raw = r#"{ "page_height": 500.0, "easing": "linear" }"#;
        let cfg: PagerConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(cfg.page_height, 500.0);
        assert_eq!(cfg.easing, EasingKind::Linear);
        assert_eq!(cfg.backward_drag_gain, gesture::BACKWARD_DRAG_GAIN);
        assert_eq!(cfg.default_transition, "none");
    }

    #[test]
    fn validate_rejects_degenerate_geometry() {
        assert!(PagerConfig::with_page_height(0.0).validate().is_err());
        assert!(PagerConfig::with_page_height(f32::NAN).validate().is_err());

        let cfg = PagerConfig {
            backward_drag_gain: 0.5,
            ..PagerConfig::default()
        };
        assert!(cfg.validate().is_err());

        assert!(PagerConfig::default().validate().is_ok());
    }

    #[test]
    fn easing_curves_hit_their_endpoints() {
        for kind in EasingKind::ALL {
            assert_eq!(kind.apply(0.0), 0.0, "{kind}");
            assert!((kind.apply(1.0) - 1.0).abs() < 1e-6, "{kind}");
            assert_eq!(EasingKind::from_u8(kind.to_u8()), kind);
        }
    }
}

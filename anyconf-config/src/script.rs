//! Recorded gesture scripts.
//!
//! A script is a JSON array of steps, for example:
//!
//! ```json
//! [
//!   { "step": "down", "x": 40, "y": 300 },
//!   { "step": "move", "x": 40, "y": 100 },
//!   { "step": "frame" },
//!   { "step": "up", "x": 40, "y": 100 },
//!   { "step": "settle" }
//! ]
//! ```

use anyconf_pager::PointerEvent;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum GestureStep {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Cancel { x: f32, y: f32 },
    /// Deliver every frame the view has requested.
    Frame,
    /// Finish running transitions and apply their completions.
    Settle,
}

impl GestureStep {
    pub fn event(&self) -> Option<PointerEvent> {
        match *self {
            Self::Down { x, y }
            | Self::Move { x, y }
            | Self::Up { x, y }
            | Self::Cancel { x, y } => Some(PointerEvent::at(x, y)),
            Self::Frame | Self::Settle => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ReplayScript {
    pub steps: Vec<GestureStep>,
}

impl ReplayScript {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("invalid gesture script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| {
            format!("failed to read gesture script {}", path.display())
        })?;
        Self::parse(&raw)
            .with_context(|| format!("in gesture script {}", path.display()))
    }
}

//! Configuration loading and gesture replay for the anyconf schedule viewer.
//!
//! [`ViewerConfig`] wraps the pager settings with the replay tool's own
//! options and resolves them from the environment, a file, or defaults.
//! [`replay`] drives a collection view through a recorded gesture script,
//! which the `anyconf-replay` binary exposes on the command line.
#![allow(missing_docs)]

pub mod models;
pub mod replay;
pub mod script;

pub use models::viewer::{ConfigFormat, ViewerConfig, ViewerConfigSource};
pub use replay::{ReleaseRecord, ReplayReport, replay};
pub use script::{GestureStep, ReplayScript};

pub mod viewer;

pub use viewer::{ViewerConfig, ViewerConfigSource};

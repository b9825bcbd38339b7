//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod hash;
mod paths;
mod pipeline_config;
mod platform;
mod stage;

pub use hash::ContentHash;
pub use paths::{LayoutConflict, PipelinePaths};
pub use pipeline_config::{
    PipelineConfig, DEFAULT_ASSET_DIR, DEFAULT_BUNDLE_NAME, DEFAULT_CONTAINER_NAME,
    DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_TEMP_DIR,
};
pub use platform::TargetPlatform;
pub use stage::{RunState, Stage};

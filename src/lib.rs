//! itempack - headless 3D model to item bundle converter
//!
//! Stages a source model into a workspace asset area, wraps it in a
//! container artifact, hands the container to a packaging engine and moves
//! the resulting bundle to the output path. Intermediate artifacts are
//! removed after every run, successful or not.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{CleanUseCase, ConvertOutcome, ConvertReport, ConvertUseCase};
pub use config::Config;
pub use domain::value_objects::{PipelineConfig, PipelinePaths, TargetPlatform};
pub use error::{PipelineError, PipelineResult};

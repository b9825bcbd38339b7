//! Error types for itempack
//!
//! Uses `thiserror` for library errors. Every fatal pipeline condition is a
//! variant of [`PipelineError`]; the binary maps them to exit codes.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::value_objects::Stage;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Exit code for a failed conversion
pub const EXIT_PIPELINE_FAILURE: u8 = 1;

/// Exit code for configuration or usage problems
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Fatal conditions of a conversion run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source file does not exist at the configured location
    #[error("input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    /// Staging or resolving the asset produced no handle
    #[error("failed to import {} into the asset database: {reason}", path.display())]
    ImportFailed { path: PathBuf, reason: String },

    /// Instantiating or committing the container artifact failed
    #[error("failed to build container artifact {}: {reason}", path.display())]
    ContainerBuildFailed { path: PathBuf, reason: String },

    /// The packaging engine did not leave the expected bundle behind
    #[error("packaging did not produce {}: {detail}", expected.display())]
    PackagingFailed { expected: PathBuf, detail: String },

    /// Moving the bundle into the output directory failed
    #[error("failed to move {} to {}: {reason}", from.display(), to.display())]
    RelocationFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// Resolved paths would make staging or cleanup touch the input or output
    #[error("unsafe pipeline layout at {}: {reason}", path.display())]
    UnsafeLayout { path: PathBuf, reason: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {}: {message}", file.display())]
    Config { file: PathBuf, message: String },
}

impl PipelineError {
    /// Stage that raised this error, if it came from the pipeline
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::MissingInput { .. } => Some(Stage::Validate),
            PipelineError::ImportFailed { .. } => Some(Stage::Import),
            PipelineError::ContainerBuildFailed { .. } => Some(Stage::Containerize),
            PipelineError::PackagingFailed { .. } => Some(Stage::Package),
            PipelineError::RelocationFailed { .. } => Some(Stage::Relocate),
            PipelineError::UnsafeLayout { .. } | PipelineError::Config { .. } => None,
        }
    }

    /// The concrete path that triggered the failure
    pub fn path(&self) -> Option<&Path> {
        match self {
            PipelineError::MissingInput { path }
            | PipelineError::ImportFailed { path, .. }
            | PipelineError::ContainerBuildFailed { path, .. }
            | PipelineError::UnsafeLayout { path, .. } => Some(path),
            PipelineError::PackagingFailed { expected, .. } => Some(expected),
            PipelineError::RelocationFailed { to, .. } => Some(to),
            PipelineError::Config { file, .. } => Some(file),
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MissingInput { .. } => "missing_input",
            PipelineError::ImportFailed { .. } => "import_failed",
            PipelineError::ContainerBuildFailed { .. } => "container_build_failed",
            PipelineError::PackagingFailed { .. } => "packaging_failed",
            PipelineError::RelocationFailed { .. } => "relocation_failed",
            PipelineError::UnsafeLayout { .. } => "unsafe_layout",
            PipelineError::Config { .. } => "config",
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Config { .. } | PipelineError::UnsafeLayout { .. } => EXIT_CONFIG_ERROR,
            _ => EXIT_PIPELINE_FAILURE,
        }
    }
}

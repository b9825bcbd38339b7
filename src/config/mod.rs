//! Configuration module for itempack
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ITEMPACK_*)
//! 3. Workspace config (itempack.toml) or `--config FILE`
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{apply_env_overrides, ConfigWarning, CONFIG_FILE_NAME};
pub use types::{
    ColorMode, Config, EngineKind, OutputSection, PackagingSection, PipelineSection, Verbosity,
};

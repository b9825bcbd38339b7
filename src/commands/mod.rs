//! Command handlers
//!
//! Each handler returns the process exit code; errors that escape as
//! `anyhow::Error` are mapped in `main`.

pub mod clean;
pub mod context;
pub mod convert;
pub mod paths;

pub use clean::cmd_clean;
pub use context::CommandContext;
pub use convert::cmd_convert;
pub use paths::cmd_paths;

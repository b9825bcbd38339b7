//! Packaging Engine port
//!
//! Serializes container artifacts into a platform-specific binary bundle.
//! The pipeline only trusts the file the engine leaves behind; the
//! [`EngineReport`] is diagnostic detail.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::value_objects::TargetPlatform;

/// One bundle to build: its identifier and the containers it packs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildUnit {
    /// Bundle identifier; the engine names its output file after it
    pub name: String,
    /// Workspace-relative container paths
    pub inputs: Vec<PathBuf>,
}

impl BuildUnit {
    pub fn new(name: impl Into<String>, inputs: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }
}

/// Build options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Ignore any cached output and rebuild from scratch
    pub force_rebuild: bool,
}

impl BuildOptions {
    pub fn force_rebuild() -> Self {
        Self {
            force_rebuild: true,
        }
    }
}

/// What the engine said about its own run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReport {
    pub engine: String,
    /// The engine's own verdict
    pub success: bool,
    /// Native exit code, for engines that run as a process
    pub exit_code: Option<i32>,
    pub message: Option<String>,
}

impl EngineReport {
    pub fn succeeded(engine: &str, message: impl Into<String>) -> Self {
        Self {
            engine: engine.to_string(),
            success: true,
            exit_code: None,
            message: Some(message.into()),
        }
    }

    pub fn failed(engine: &str, message: impl Into<String>) -> Self {
        Self {
            engine: engine.to_string(),
            success: false,
            exit_code: None,
            message: Some(message.into()),
        }
    }

    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }

    /// One-line summary for logs and error messages
    pub fn summary(&self) -> String {
        let verdict = if self.success { "succeeded" } else { "failed" };
        let mut line = format!("{} engine {}", self.engine, verdict);
        if let Some(code) = self.exit_code {
            line.push_str(&format!(" (exit code {})", code));
        }
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            line.push_str(": ");
            line.push_str(message);
        }
        line
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to launch '{command}': {reason}")]
    Launch { command: String, reason: String },

    #[error("invalid build input {}: {reason}", path.display())]
    InvalidInput { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Build/packaging engine
pub trait PackagingEngine {
    /// Short engine name for diagnostics
    fn name(&self) -> &'static str;

    /// Build every unit into `output_dir`, one file per unit named `unit.name`
    fn build(
        &self,
        output_dir: &Path,
        units: &[BuildUnit],
        options: BuildOptions,
        platform: TargetPlatform,
    ) -> Result<EngineReport, EngineError>;
}

impl<T: PackagingEngine + ?Sized> PackagingEngine for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn build(
        &self,
        output_dir: &Path,
        units: &[BuildUnit],
        options: BuildOptions,
        platform: TargetPlatform,
    ) -> Result<EngineReport, EngineError> {
        (**self).build(output_dir, units, options, platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_summary_includes_exit_code_and_message() {
        let report = EngineReport::failed("command", "missing license").with_exit_code(Some(3));
        assert_eq!(
            report.summary(),
            "command engine failed (exit code 3): missing license"
        );
    }

    #[test]
    fn report_summary_skips_empty_message() {
        let report = EngineReport::succeeded("archive", "");
        assert_eq!(report.summary(), "archive engine succeeded");
    }

    #[test]
    fn force_rebuild_option() {
        assert!(BuildOptions::force_rebuild().force_rebuild);
        assert!(!BuildOptions::default().force_rebuild);
    }
}

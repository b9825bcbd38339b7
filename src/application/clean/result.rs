//! Cleanup result types

use std::path::PathBuf;

/// A cleanup step that could not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupFailure {
    /// Path the step was working on
    pub path: PathBuf,
    /// What went wrong
    pub error: String,
}

/// Result of a cleanup sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Artifacts that were removed
    pub removed: Vec<PathBuf>,
    /// Managed paths that were already absent
    pub absent: Vec<PathBuf>,
    /// Steps that failed; the others still ran
    pub errors: Vec<CleanupFailure>,
    /// Whether the asset index refresh succeeded
    pub refreshed: bool,
}

impl CleanupReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_removed(&mut self, path: PathBuf) {
        self.removed.push(path);
    }

    pub fn add_absent(&mut self, path: PathBuf) {
        self.absent.push(path);
    }

    pub fn add_error(&mut self, path: PathBuf, error: impl Into<String>) {
        self.errors.push(CleanupFailure {
            path,
            error: error.into(),
        });
    }

    /// True when every step succeeded
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        let mut line = format!("removed {}", self.removed.len());
        if !self.errors.is_empty() {
            line.push_str(&format!(", {} failed", self.errors.len()));
        }
        line
    }
}

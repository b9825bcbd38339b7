//! Convert result types

use std::path::PathBuf;

use crate::application::clean::CleanupReport;
use crate::domain::ports::EngineReport;
use crate::domain::value_objects::{ContentHash, RunState};
use crate::error::PipelineError;

/// The artifact a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    /// Absolute path of the final bundle
    pub output: PathBuf,
    pub size: u64,
    pub hash: ContentHash,
    /// What the packaging engine said about its run
    pub engine: EngineReport,
}

/// Everything a conversion run produced, successful or not
#[derive(Debug)]
pub struct ConvertOutcome {
    /// Primary outcome of the stages
    pub result: Result<ConvertReport, PipelineError>,
    /// Cleanup that ran afterwards; never changes `result`
    pub cleanup: CleanupReport,
    /// Last state the run reached
    pub state: RunState,
}

impl ConvertOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        match &self.result {
            Ok(_) => 0,
            Err(e) => e.exit_code(),
        }
    }
}

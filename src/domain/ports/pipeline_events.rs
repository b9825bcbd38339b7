//! Pipeline Event Port
//!
//! Observable interface for conversion runs. Sinks turn these into console
//! progress, NDJSON for CI, or nothing at all.

use std::path::PathBuf;

use crate::domain::ports::EngineReport;
use crate::domain::value_objects::{ContentHash, Stage, TargetPlatform};

/// Event emitted during a conversion or cleanup
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// Run started
    Started {
        source: PathBuf,
        output: PathBuf,
        platform: TargetPlatform,
    },

    /// A stage began
    StageStarted { stage: Stage },

    /// A stage established its postcondition
    StageCompleted { stage: Stage, detail: String },

    /// A stage failed; the run will clean up and stop
    StageFailed {
        stage: Stage,
        path: Option<PathBuf>,
        error: String,
    },

    /// The packaging engine reported on its own run
    EngineReported { report: EngineReport },

    /// Cleanup removed an intermediate artifact
    ArtifactRemoved { path: PathBuf },

    /// Cleanup could not remove an artifact; other steps continue
    CleanupWarning { path: PathBuf, error: String },

    /// Final artifact written
    Completed {
        output: PathBuf,
        size: u64,
        hash: ContentHash,
    },

    /// Run failed after cleanup
    Failed {
        stage: Option<Stage>,
        kind: &'static str,
        error: String,
    },
}

/// Trait for receiving pipeline events
///
/// Implementations:
/// - ConsoleEventSink: human-readable progress
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait PipelineEventSink: Send + Sync {
    /// Handle a pipeline event
    fn on_event(&self, event: PipelineEvent);

    /// Whether this sink wants per-stage events or only the outcome
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PipelineEventSink for NoopEventSink {
    fn on_event(&self, _event: PipelineEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}

//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{PipelineEvent, PipelineEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(obj) = event.as_object_mut() {
            obj.insert(
                "ts".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl PipelineEventSink for JsonEventSink {
    fn on_event(&self, event: PipelineEvent) {
        let json = match event {
            PipelineEvent::Started {
                source,
                output,
                platform,
            } => serde_json::json!({
                "event": "start",
                "command": "convert",
                "source": source.display().to_string(),
                "output": output.display().to_string(),
                "platform": platform.as_str(),
            }),

            PipelineEvent::StageStarted { stage } => serde_json::json!({
                "event": "stage_start",
                "stage": stage.name(),
            }),

            PipelineEvent::StageCompleted { stage, detail } => serde_json::json!({
                "event": "stage_complete",
                "stage": stage.name(),
                "detail": detail,
            }),

            PipelineEvent::StageFailed { stage, path, error } => serde_json::json!({
                "event": "stage_failed",
                "stage": stage.name(),
                "path": path.map(|p| p.display().to_string()),
                "error": error,
            }),

            PipelineEvent::EngineReported { report } => serde_json::json!({
                "event": "engine_report",
                "engine": report.engine,
                "success": report.success,
                "exit_code": report.exit_code,
                "message": report.message,
            }),

            PipelineEvent::ArtifactRemoved { path } => serde_json::json!({
                "event": "artifact_removed",
                "path": path.display().to_string(),
            }),

            PipelineEvent::CleanupWarning { path, error } => serde_json::json!({
                "event": "cleanup_warning",
                "path": path.display().to_string(),
                "error": error,
            }),

            PipelineEvent::Completed { output, size, hash } => serde_json::json!({
                "event": "complete",
                "command": "convert",
                "status": "success",
                "output": output.display().to_string(),
                "size": size,
                "hash": hash.as_str(),
            }),

            PipelineEvent::Failed { stage, kind, error } => serde_json::json!({
                "event": "complete",
                "command": "convert",
                "status": "failure",
                "stage": stage.map(|s| s.name()),
                "kind": kind,
                "error": error,
            }),
        };

        self.write_event(json);
    }
}

//! Event Sink Implementations
//!
//! Provides concrete implementations of PipelineEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - ConsoleEventSink: Human-readable progress on stderr

pub mod ci;
mod console;
mod json;

pub use console::{ConsoleEventSink, ConsoleStyle};
pub use json::JsonEventSink;

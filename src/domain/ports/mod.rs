//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod asset_database;
pub mod file_system;
pub mod packaging_engine;
pub mod pipeline_events;

pub use asset_database::{AssetDatabase, AssetError, AssetResult, RefreshSummary};
pub use file_system::{FileSystem, FsError, FsResult};
pub use packaging_engine::{BuildOptions, BuildUnit, EngineError, EngineReport, PackagingEngine};
pub use pipeline_events::{NoopEventSink, PipelineEvent, PipelineEventSink};

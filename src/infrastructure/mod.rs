//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `assets/` - Workspace asset database backed by a TOML index
//! - `packaging/` - Packaging engines (built-in archive, external command)
//! - `events/` - Event sinks (console, NDJSON)

pub mod assets;
pub mod events;
pub mod fs;
pub mod packaging;

// Re-export for convenience
pub use assets::{FsAssetDatabase, TomlAssetIndex};
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use packaging::{ArchiveEngine, CommandEngine};

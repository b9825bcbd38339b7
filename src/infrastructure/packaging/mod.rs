//! Packaging Engine Implementations
//!
//! - `ArchiveEngine` - built-in deterministic bundle writer
//! - `CommandEngine` - delegates to an external build program

mod archive;
mod command;

pub use archive::{ArchiveEngine, BUNDLE_FORMAT_VERSION, BUNDLE_MAGIC};
pub use command::CommandEngine;

//! Domain Layer
//!
//! The conversion pipeline's vocabulary without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Things with identity during a run (AssetHandle, ContainerRef)
//! - `value_objects/` - Immutable value types (PipelineConfig, PipelinePaths, Stage)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Ports & Adapters** - Asset import, packaging and logging go through traits

pub mod entities;
pub mod ports;
pub mod value_objects;

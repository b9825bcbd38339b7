//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Does NOT perform I/O itself (that goes through the ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ConvertUseCase` - Orchestrates a conversion run (validate, import, containerize, package, relocate, cleanup)
//! - `CleanUseCase` - Removes intermediate artifacts left by an interrupted run

pub mod clean;
pub mod convert;

pub use clean::{sweep, CleanUseCase, CleanupFailure, CleanupReport};
pub use convert::{ConvertOutcome, ConvertReport, ConvertUseCase};

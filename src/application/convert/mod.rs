//! Convert Use Case
//!
//! Turns one source model into one packaged bundle:
//! 1. Validate the input file exists
//! 2. Stage it into the asset area and resolve a handle
//! 3. Instantiate and commit the container artifact
//! 4. Package the container with the build engine
//! 5. Move the bundle to the output path
//!
//! Cleanup runs after every run, whatever state it reached.

mod container;
mod import;
mod package;
mod relocate;
mod result;
mod use_case;
mod validate;


pub use result::{ConvertOutcome, ConvertReport};
pub use use_case::ConvertUseCase;

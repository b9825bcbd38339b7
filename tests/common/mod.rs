//! Common test utilities for itempack CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated workspace in a temp directory
//! - Assertion helpers: `assert_no_residue!`, `list_all_files`
//! - Fixtures: Reusable model and config content

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;

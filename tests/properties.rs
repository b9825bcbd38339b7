//! Property-based tests for itempack
//!
//! Run with: cargo test --test properties

#[path = "properties/paths.rs"]
mod paths;

//! Asset Database Implementation
//!
//! - `FsAssetDatabase` - workspace-backed AssetDatabase port
//! - `TomlAssetIndex` - persistent index under `Library/`

mod database;
mod index;

pub use database::{FsAssetDatabase, CONTAINER_EXTENSION};
pub use index::{
    guid_for, AssetIndex, IndexEntry, IndexedKind, TomlAssetIndex, INDEX_RELATIVE_PATH,
};

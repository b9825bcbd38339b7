//! TOML Asset Index
//!
//! The asset database's persistent state: one entry per file found under the
//! asset area, stored as `Library/asset_index.toml` in the workspace.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::ports::asset_database::{AssetError, AssetResult};
use crate::domain::ports::file_system::FileSystem;
use crate::infrastructure::fs::LocalFs;

/// Current index format version
pub const INDEX_VERSION: u32 = 1;

/// Index location relative to the workspace root
pub const INDEX_RELATIVE_PATH: &str = "Library/asset_index.toml";

/// Kind of an indexed asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexedKind {
    Model,
    Container,
}

/// One indexed asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub guid: String,
    pub hash: String,
    pub size: u64,
    pub kind: IndexedKind,
}

/// In-memory form of the index, keyed by forward-slash relative path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIndex {
    pub version: u32,
    #[serde(default)]
    pub assets: BTreeMap<String, IndexEntry>,
}

impl Default for AssetIndex {
    fn default() -> Self {
        Self {
            version: INDEX_VERSION,
            assets: BTreeMap::new(),
        }
    }
}

impl AssetIndex {
    pub fn get(&self, path: &Path) -> Option<&IndexEntry> {
        self.assets.get(&index_key(path))
    }

    pub fn insert(&mut self, path: &Path, entry: IndexEntry) {
        self.assets.insert(index_key(path), entry);
    }

    pub fn remove(&mut self, path: &Path) -> Option<IndexEntry> {
        self.assets.remove(&index_key(path))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Normalize a relative path into an index key
pub fn index_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Deterministic guid for an asset path
///
/// Re-importing the same path yields the same guid, so repeated runs produce
/// identical containers.
pub fn guid_for(path: &Path) -> String {
    let digest = Sha256::digest(index_key(path).as_bytes());
    format!("{:x}", digest)[..32].to_string()
}

/// Reads and writes the TOML index file
pub struct TomlAssetIndex {
    fs: LocalFs,
    path: PathBuf,
}

impl TomlAssetIndex {
    /// Index for the workspace at `root`
    pub fn for_workspace(root: &Path) -> Self {
        Self {
            fs: LocalFs::new(),
            path: root.join(INDEX_RELATIVE_PATH),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.fs.is_file(&self.path)
    }

    /// Load the index; a missing file is an empty index
    pub fn load(&self) -> AssetResult<AssetIndex> {
        if !self.exists() {
            return Ok(AssetIndex::default());
        }

        let bytes = self.fs.read(&self.path).map_err(|e| AssetError::Io {
            path: self.path.clone(),
            source: std::io::Error::other(e.to_string()),
        })?;
        let content = String::from_utf8_lossy(&bytes);
        let index: AssetIndex = toml::from_str(&content).map_err(|e| AssetError::CorruptIndex {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        if index.version != INDEX_VERSION {
            return Err(AssetError::CorruptIndex {
                path: self.path.clone(),
                message: format!(
                    "unsupported version {} (expected {})",
                    index.version, INDEX_VERSION
                ),
            });
        }

        Ok(index)
    }

    pub fn save(&self, index: &AssetIndex) -> AssetResult<()> {
        let content = toml::to_string_pretty(index).map_err(|e| AssetError::Serialize {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        self.fs
            .write(&self.path, content.as_bytes())
            .map_err(|e| AssetError::Io {
                path: self.path.clone(),
                source: std::io::Error::other(e.to_string()),
            })
    }
}

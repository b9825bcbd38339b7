//! Container artifact entities
//!
//! A container is the persisted form of one instantiated asset. It is the
//! sole input handed to the packaging engine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::asset::AssetHandle;

/// Format identifier written into every container manifest
pub const CONTAINER_FORMAT: &str = "itempack-container/1";

/// Reference to a committed container artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    /// Workspace-relative path
    pub path: PathBuf,
    pub guid: String,
}

/// Asset a container was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSource {
    /// Workspace-relative path, forward slashes
    pub path: String,
    pub guid: String,
    pub hash: String,
    pub size: u64,
    pub format: String,
}

/// On-disk content of a container artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerManifest {
    pub format: String,
    pub name: String,
    pub source: ContainerSource,
}

impl ContainerManifest {
    /// Manifest for an instance named `name` created from `handle`
    pub fn for_instance(name: &str, handle: &AssetHandle) -> Self {
        Self {
            format: CONTAINER_FORMAT.to_string(),
            name: name.to_string(),
            source: ContainerSource {
                path: handle.path.to_string_lossy().replace('\\', "/"),
                guid: handle.guid.clone(),
                hash: handle.hash.to_string(),
                size: handle.size,
                format: handle.format.to_string(),
            },
        }
    }

    pub fn is_supported(&self) -> bool {
        self.format == CONTAINER_FORMAT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ModelFormat;
    use crate::domain::value_objects::ContentHash;

    #[test]
    fn manifest_records_source_identity() {
        let handle = AssetHandle {
            path: PathBuf::from("Assets/hero.fbx"),
            guid: "0123".to_string(),
            format: ModelFormat::Fbx,
            hash: ContentHash::from_bytes(b"mesh"),
            size: 4,
        };
        let manifest = ContainerManifest::for_instance("hero", &handle);

        assert!(manifest.is_supported());
        assert_eq!(manifest.source.path, "Assets/hero.fbx");
        assert_eq!(manifest.source.guid, "0123");
        assert_eq!(manifest.source.format, "fbx");
        assert!(manifest.source.hash.starts_with("sha256:"));
    }
}

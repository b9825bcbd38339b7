//! Asset Database port
//!
//! The subsystem that indexes the workspace asset area, resolves staged files
//! to handles, and turns instances into persisted container artifacts.
//! Every lookup may come back empty; the pipeline treats that as fatal.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::{AssetHandle, ContainerRef, InstanceId};

/// Result type for asset database operations
pub type AssetResult<T> = Result<T, AssetError>;

/// Asset database errors
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset index {} is corrupted: {message}", path.display())]
    CorruptIndex { path: PathBuf, message: String },

    #[error("{0} is not a live instance")]
    UnknownInstance(InstanceId),

    #[error("failed to serialize {}: {message}", path.display())]
    Serialize { path: PathBuf, message: String },
}

/// Summary of a refresh pass over the asset area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Assets present in the index after the refresh
    pub indexed: usize,
    /// Entries dropped because their file disappeared
    pub removed: usize,
}

/// Workspace asset subsystem
///
/// All paths are relative to the workspace root (`Assets/<name>`).
pub trait AssetDatabase {
    /// Delete an asset and its index entry; `Ok(false)` if nothing was there
    fn delete_asset(&self, path: &Path) -> AssetResult<bool>;

    /// Re-scan the asset area so the index matches the files on disk
    fn refresh(&self) -> AssetResult<RefreshSummary>;

    /// Resolve an indexed asset to a handle
    fn load_asset(&self, path: &Path) -> AssetResult<Option<AssetHandle>>;

    /// Create one in-memory instance of an asset
    fn instantiate(&self, handle: &AssetHandle) -> Option<InstanceId>;

    /// Persist an instance as a container artifact at `path`
    fn save_as_container(&self, instance: InstanceId, path: &Path) -> AssetResult<ContainerRef>;

    /// Release an instance; unknown ids are ignored
    fn destroy_instance(&self, instance: InstanceId);
}

impl<T: AssetDatabase + ?Sized> AssetDatabase for &T {
    fn delete_asset(&self, path: &Path) -> AssetResult<bool> {
        (**self).delete_asset(path)
    }

    fn refresh(&self) -> AssetResult<RefreshSummary> {
        (**self).refresh()
    }

    fn load_asset(&self, path: &Path) -> AssetResult<Option<AssetHandle>> {
        (**self).load_asset(path)
    }

    fn instantiate(&self, handle: &AssetHandle) -> Option<InstanceId> {
        (**self).instantiate(handle)
    }

    fn save_as_container(&self, instance: InstanceId, path: &Path) -> AssetResult<ContainerRef> {
        (**self).save_as_container(instance, path)
    }

    fn destroy_instance(&self, instance: InstanceId) {
        (**self).destroy_instance(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_error_display_includes_path() {
        let err = AssetError::CorruptIndex {
            path: PathBuf::from("Library/asset_index.toml"),
            message: "expected table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "asset index Library/asset_index.toml is corrupted: expected table"
        );
    }

    #[test]
    fn unknown_instance_display() {
        let err = AssetError::UnknownInstance(InstanceId(7));
        assert_eq!(err.to_string(), "instance#7 is not a live instance");
    }
}

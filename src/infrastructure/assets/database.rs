//! Filesystem-backed Asset Database
//!
//! Implements the AssetDatabase port over a workspace laid out as
//! `<root>/Assets/...` with its index in `<root>/Library/asset_index.toml`.
//! Instances live only in memory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use ignore::WalkBuilder;

use crate::domain::entities::{AssetHandle, ContainerManifest, ContainerRef, InstanceId, ModelFormat};
use crate::domain::ports::asset_database::{
    AssetDatabase, AssetError, AssetResult, RefreshSummary,
};
use crate::domain::ports::file_system::{FileSystem, FsError};
use crate::domain::value_objects::{ContentHash, DEFAULT_ASSET_DIR};
use crate::infrastructure::fs::LocalFs;

use super::index::{guid_for, AssetIndex, IndexEntry, IndexedKind, TomlAssetIndex};

/// Extension that marks a committed container artifact
pub const CONTAINER_EXTENSION: &str = "prefab";

#[derive(Debug, Clone)]
struct LiveInstance {
    name: String,
    source: AssetHandle,
}

/// Asset database over the local workspace
pub struct FsAssetDatabase {
    root: PathBuf,
    asset_dir: PathBuf,
    fs: LocalFs,
    index: TomlAssetIndex,
    instances: Mutex<BTreeMap<InstanceId, LiveInstance>>,
    next_id: AtomicU64,
}

impl FsAssetDatabase {
    /// Database for the workspace at `root` with the default `Assets` area
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_asset_dir(root, DEFAULT_ASSET_DIR)
    }

    /// Database with a custom asset area, relative to `root`
    pub fn with_asset_dir(root: impl Into<PathBuf>, asset_dir: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            index: TomlAssetIndex::for_workspace(&root),
            asset_dir: asset_dir.into(),
            fs: LocalFs::new(),
            instances: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            root,
        }
    }

    /// Number of instances not yet destroyed
    pub fn live_instances(&self) -> usize {
        self.instances.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Location of the persistent index
    pub fn index_path(&self) -> &Path {
        self.index.path()
    }

    fn load_index_lenient(&self) -> AssetResult<AssetIndex> {
        match self.index.load() {
            Ok(index) => Ok(index),
            // A corrupt index is rebuilt by the next refresh
            Err(AssetError::CorruptIndex { .. }) => Ok(AssetIndex::default()),
            Err(e) => Err(e),
        }
    }

    fn kind_of(path: &Path) -> IndexedKind {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(CONTAINER_EXTENSION) => IndexedKind::Container,
            _ => IndexedKind::Model,
        }
    }

    fn scan(&self) -> AssetResult<AssetIndex> {
        let mut index = AssetIndex::default();
        let asset_root = self.root.join(&self.asset_dir);
        if !asset_root.is_dir() {
            return Ok(index);
        }

        let walker = WalkBuilder::new(&asset_root).standard_filters(false).build();

        for entry in walker {
            let entry = entry.map_err(|e| AssetError::Io {
                path: asset_root.clone(),
                source: std::io::Error::other(e.to_string()),
            })?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let absolute = entry.path();
            let relative = absolute.strip_prefix(&self.root).unwrap_or(absolute);
            let bytes = self.fs.read(absolute).map_err(|e| io_error(absolute, e))?;

            index.insert(
                relative,
                IndexEntry {
                    guid: guid_for(relative),
                    hash: ContentHash::from_bytes(&bytes).to_string(),
                    size: bytes.len() as u64,
                    kind: Self::kind_of(relative),
                },
            );
        }

        Ok(index)
    }
}

impl AssetDatabase for FsAssetDatabase {
    fn delete_asset(&self, path: &Path) -> AssetResult<bool> {
        let absolute = self.root.join(path);
        let existed = self.fs.is_file(&absolute);
        if existed {
            self.fs
                .remove_file(&absolute)
                .map_err(|e| io_error(&absolute, e))?;
        }

        let mut index = self.load_index_lenient()?;
        if index.remove(path).is_some() {
            self.index.save(&index)?;
        }

        Ok(existed)
    }

    fn refresh(&self) -> AssetResult<RefreshSummary> {
        let had_index = self.index.exists();
        let previous = self.load_index_lenient()?;
        let scanned = self.scan()?;

        let summary = RefreshSummary {
            indexed: scanned.len(),
            removed: previous
                .assets
                .keys()
                .filter(|key| !scanned.assets.contains_key(*key))
                .count(),
        };

        // Never create an index just to record that nothing exists
        if scanned.is_empty() && !had_index {
            return Ok(summary);
        }
        if !had_index || scanned != previous {
            self.index.save(&scanned)?;
        }

        Ok(summary)
    }

    fn load_asset(&self, path: &Path) -> AssetResult<Option<AssetHandle>> {
        let index = self.index.load()?;
        let Some(entry) = index.get(path) else {
            return Ok(None);
        };

        // Containers and empty files are not importable models
        if entry.kind != IndexedKind::Model || entry.size == 0 {
            return Ok(None);
        }
        if !self.fs.is_file(&self.root.join(path)) {
            return Ok(None);
        }

        Ok(Some(AssetHandle {
            path: path.to_path_buf(),
            guid: entry.guid.clone(),
            format: ModelFormat::from_path(path),
            hash: ContentHash::new(&entry.hash),
            size: entry.size,
        }))
    }

    fn instantiate(&self, handle: &AssetHandle) -> Option<InstanceId> {
        // Stale handle: the staged file is gone
        if !self.fs.is_file(&self.root.join(&handle.path)) {
            return None;
        }

        let id = InstanceId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut instances = self.instances.lock().ok()?;
        instances.insert(
            id,
            LiveInstance {
                name: handle.name(),
                source: handle.clone(),
            },
        );
        Some(id)
    }

    fn save_as_container(&self, instance: InstanceId, path: &Path) -> AssetResult<ContainerRef> {
        let live = self
            .instances
            .lock()
            .ok()
            .and_then(|m| m.get(&instance).cloned())
            .ok_or(AssetError::UnknownInstance(instance))?;

        let manifest = ContainerManifest::for_instance(&live.name, &live.source);
        let content = serde_json::to_vec_pretty(&manifest).map_err(|e| AssetError::Serialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let absolute = self.root.join(path);
        self.fs
            .write(&absolute, &content)
            .map_err(|e| io_error(&absolute, e))?;

        let guid = guid_for(path);
        let mut index = self.load_index_lenient()?;
        index.insert(
            path,
            IndexEntry {
                guid: guid.clone(),
                hash: ContentHash::from_bytes(&content).to_string(),
                size: content.len() as u64,
                kind: IndexedKind::Container,
            },
        );
        self.index.save(&index)?;

        Ok(ContainerRef {
            path: path.to_path_buf(),
            guid,
        })
    }

    fn destroy_instance(&self, instance: InstanceId) {
        if let Ok(mut instances) = self.instances.lock() {
            instances.remove(&instance);
        }
    }
}

fn io_error(path: &Path, err: FsError) -> AssetError {
    let source = match err {
        FsError::Io(e) => e,
        other => std::io::Error::other(other.to_string()),
    };
    AssetError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stage(root: &Path, name: &str, content: &[u8]) -> PathBuf {
        let relative = PathBuf::from("Assets").join(name);
        std::fs::create_dir_all(root.join(&relative).parent().unwrap()).unwrap();
        std::fs::write(root.join(&relative), content).unwrap();
        relative
    }

    #[test]
    fn dot_files_are_indexed() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        let staged = stage(dir.path(), ".hero.fbx", b"mesh");

        let summary = db.refresh().unwrap();

        assert_eq!(summary.indexed, 1);
        assert!(db.load_asset(&staged).unwrap().is_some());
    }

    #[test]
    fn nested_assets_are_indexed() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        let staged = stage(dir.path(), "models/hero.obj", b"mesh");

        db.refresh().unwrap();

        let handle = db.load_asset(&staged).unwrap().expect("handle");
        assert_eq!(handle.path, PathBuf::from("Assets/models/hero.obj"));
    }

    #[test]
    fn refresh_then_load_resolves_handle() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        let staged = stage(dir.path(), "hero.fbx", b"mesh-bytes");

        let summary = db.refresh().unwrap();
        assert_eq!(summary.indexed, 1);

        let handle = db.load_asset(&staged).unwrap().expect("handle");
        assert_eq!(handle.format, ModelFormat::Fbx);
        assert_eq!(handle.size, 10);
        assert_eq!(handle.hash, ContentHash::from_bytes(b"mesh-bytes"));
        assert_eq!(handle.guid, guid_for(&staged));
    }

    #[test]
    fn load_without_refresh_returns_none() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        let staged = stage(dir.path(), "hero.fbx", b"mesh");

        assert!(db.load_asset(&staged).unwrap().is_none());
    }

    #[test]
    fn empty_file_is_not_importable() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        let staged = stage(dir.path(), "empty.fbx", b"");
        db.refresh().unwrap();

        assert!(db.load_asset(&staged).unwrap().is_none());
    }

    #[test]
    fn refresh_on_empty_workspace_creates_nothing() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());

        let summary = db.refresh().unwrap();

        assert_eq!(summary, RefreshSummary::default());
        assert!(!db.index_path().exists());
        assert!(!dir.path().join("Assets").exists());
    }

    #[test]
    fn refresh_skips_hidden_files() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        stage(dir.path(), ".DS_Store", b"junk");
        stage(dir.path(), "hero.obj", b"v 0 0 0");

        assert_eq!(db.refresh().unwrap().indexed, 1);
    }

    #[test]
    fn refresh_recovers_from_corrupt_index() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        let staged = stage(dir.path(), "hero.fbx", b"mesh");
        std::fs::create_dir_all(dir.path().join("Library")).unwrap();
        std::fs::write(db.index_path(), "garbage = [").unwrap();

        db.refresh().unwrap();

        assert!(db.load_asset(&staged).unwrap().is_some());
    }

    #[test]
    fn delete_asset_removes_file_and_entry() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        let staged = stage(dir.path(), "hero.fbx", b"mesh");
        db.refresh().unwrap();

        assert!(db.delete_asset(&staged).unwrap());
        assert!(!dir.path().join(&staged).exists());
        assert!(db.load_asset(&staged).unwrap().is_none());
        assert!(!db.delete_asset(&staged).unwrap());
    }

    #[test]
    fn delete_asset_removes_unindexed_leftovers() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        let staged = stage(dir.path(), "hero.fbx", b"left over by a crash");

        assert!(db.delete_asset(&staged).unwrap());
        assert!(!dir.path().join(&staged).exists());
    }

    #[test]
    fn instantiate_save_and_destroy() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        let staged = stage(dir.path(), "hero.fbx", b"mesh");
        db.refresh().unwrap();
        let handle = db.load_asset(&staged).unwrap().unwrap();

        let instance = db.instantiate(&handle).expect("instance");
        assert_eq!(db.live_instances(), 1);

        let container_path = Path::new("Assets/TempZepetoItem.prefab");
        let container = db.save_as_container(instance, container_path).unwrap();
        db.destroy_instance(instance);

        assert_eq!(db.live_instances(), 0);
        assert_eq!(container.guid, guid_for(container_path));

        let raw = std::fs::read(dir.path().join(container_path)).unwrap();
        let manifest: ContainerManifest = serde_json::from_slice(&raw).unwrap();
        assert_eq!(manifest.name, "hero");
        assert_eq!(manifest.source.path, "Assets/hero.fbx");

        // Containers are indexed but never resolve as models
        assert!(db.load_asset(container_path).unwrap().is_none());
    }

    #[test]
    fn instantiate_stale_handle_returns_none() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());
        let staged = stage(dir.path(), "hero.fbx", b"mesh");
        db.refresh().unwrap();
        let handle = db.load_asset(&staged).unwrap().unwrap();
        std::fs::remove_file(dir.path().join(&staged)).unwrap();

        assert!(db.instantiate(&handle).is_none());
        assert_eq!(db.live_instances(), 0);
    }

    #[test]
    fn save_unknown_instance_fails() {
        let dir = tempdir().unwrap();
        let db = FsAssetDatabase::new(dir.path());

        let err = db
            .save_as_container(InstanceId(42), Path::new("Assets/x.prefab"))
            .unwrap_err();

        assert!(matches!(err, AssetError::UnknownInstance(InstanceId(42))));
        assert!(!dir.path().join("Assets/x.prefab").exists());
    }
}

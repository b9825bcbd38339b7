//! Staged asset entities

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// Source format of a model, inferred from its extension
///
/// Informational only: the pipeline is not a format validator, so unknown
/// extensions are carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    Fbx,
    Obj,
    Gltf,
    Glb,
    Collada,
    ThreeDs,
    Blend,
    Stl,
    Ply,
    Other(String),
}

impl ModelFormat {
    /// Infer the format from a file name
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "fbx" => ModelFormat::Fbx,
            "obj" => ModelFormat::Obj,
            "gltf" => ModelFormat::Gltf,
            "glb" => ModelFormat::Glb,
            "dae" => ModelFormat::Collada,
            "3ds" => ModelFormat::ThreeDs,
            "blend" => ModelFormat::Blend,
            "stl" => ModelFormat::Stl,
            "ply" => ModelFormat::Ply,
            _ => ModelFormat::Other(ext),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ModelFormat::Fbx => "fbx",
            ModelFormat::Obj => "obj",
            ModelFormat::Gltf => "gltf",
            ModelFormat::Glb => "glb",
            ModelFormat::Collada => "dae",
            ModelFormat::ThreeDs => "3ds",
            ModelFormat::Blend => "blend",
            ModelFormat::Stl => "stl",
            ModelFormat::Ply => "ply",
            ModelFormat::Other(ext) if ext.is_empty() => "unknown",
            ModelFormat::Other(ext) => ext,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ModelFormat::Other(_))
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory reference to a staged asset, as resolved by the asset database
///
/// Becomes stale once the staged file is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle {
    /// Workspace-relative path (`Assets/<name>`)
    pub path: PathBuf,
    /// Stable identifier assigned by the asset database
    pub guid: String,
    pub format: ModelFormat,
    pub hash: ContentHash,
    pub size: u64,
}

impl AssetHandle {
    /// File stem, used as the instance name
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.guid.clone())
    }
}

/// Identifier of a live instance created from an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(ModelFormat::from_path(Path::new("a/Hero.FBX")), ModelFormat::Fbx);
        assert_eq!(ModelFormat::from_path(Path::new("scene.dae")), ModelFormat::Collada);
    }

    #[test]
    fn unknown_extension_is_carried_through() {
        let format = ModelFormat::from_path(Path::new("model.src"));
        assert_eq!(format, ModelFormat::Other("src".to_string()));
        assert_eq!(format.as_str(), "src");
        assert!(!format.is_known());
        assert_eq!(ModelFormat::from_path(Path::new("README")).as_str(), "unknown");
    }

    #[test]
    fn handle_name_is_file_stem() {
        let handle = AssetHandle {
            path: PathBuf::from("Assets/hero.fbx"),
            guid: "abc".to_string(),
            format: ModelFormat::Fbx,
            hash: ContentHash::from_bytes(b"x"),
            size: 1,
        };
        assert_eq!(handle.name(), "hero");
    }
}

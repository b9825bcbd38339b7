//! Archive Packaging Engine
//!
//! Built-in engine that serializes each build unit into a self-describing
//! binary bundle. Output depends only on the inputs and the platform, so a
//! forced rebuild of unchanged inputs is byte-identical.
//!
//! ## Bundle layout (little endian)
//!
//! ```text
//! "IPKB" | u16 version | u8 platform tag | u16+bytes bundle name | u32 entry count
//! per entry:
//!   u16+bytes container path | u32+bytes container manifest (compact JSON)
//!   u16+bytes source path    | u64+bytes source content
//! 32 bytes SHA-256 of everything above
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::entities::ContainerManifest;
use crate::domain::ports::file_system::{FileSystem, FsError};
use crate::domain::ports::packaging_engine::{
    BuildOptions, BuildUnit, EngineError, EngineReport, PackagingEngine,
};
use crate::domain::value_objects::{ContentHash, TargetPlatform};
use crate::infrastructure::assets::guid_for;
use crate::infrastructure::fs::LocalFs;

pub const BUNDLE_MAGIC: &[u8; 4] = b"IPKB";
pub const BUNDLE_FORMAT_VERSION: u16 = 1;

const ENGINE_NAME: &str = "archive";

/// Summary written next to each bundle as `<name>.manifest`
#[derive(Debug, Serialize)]
struct BundleManifest {
    bundle: String,
    platform: String,
    format_version: u16,
    size: u64,
    hash: String,
    assets: Vec<BundleManifestAsset>,
}

#[derive(Debug, Serialize)]
struct BundleManifestAsset {
    container: String,
    guid: String,
    source: String,
    source_hash: String,
}

/// Packaging engine producing `IPKB` bundles
pub struct ArchiveEngine {
    root: PathBuf,
    fs: LocalFs,
}

impl ArchiveEngine {
    /// Engine resolving container paths against the workspace `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fs: LocalFs::new(),
        }
    }

    fn encode_unit(
        &self,
        unit: &BuildUnit,
        platform: TargetPlatform,
    ) -> Result<(Vec<u8>, Vec<BundleManifestAsset>), EngineError> {
        let mut buf = Vec::new();
        let mut assets = Vec::with_capacity(unit.inputs.len());

        buf.extend_from_slice(BUNDLE_MAGIC);
        buf.extend_from_slice(&BUNDLE_FORMAT_VERSION.to_le_bytes());
        buf.push(platform.tag());
        put_short(&mut buf, unit.name.as_bytes(), Path::new(&unit.name))?;
        let count = u32::try_from(unit.inputs.len()).map_err(|_| EngineError::InvalidInput {
            path: PathBuf::from(&unit.name),
            reason: "too many inputs".to_string(),
        })?;
        buf.extend_from_slice(&count.to_le_bytes());

        for input in &unit.inputs {
            let container_abs = self.root.join(input);
            let raw = self
                .fs
                .read(&container_abs)
                .map_err(|e| read_error(&container_abs, e))?;
            let manifest: ContainerManifest =
                serde_json::from_slice(&raw).map_err(|e| EngineError::InvalidInput {
                    path: input.clone(),
                    reason: format!("not a container manifest: {}", e),
                })?;
            if !manifest.is_supported() {
                return Err(EngineError::InvalidInput {
                    path: input.clone(),
                    reason: format!("unsupported container format '{}'", manifest.format),
                });
            }

            let source_abs = self.root.join(&manifest.source.path);
            let source = self
                .fs
                .read(&source_abs)
                .map_err(|e| read_error(&source_abs, e))?;
            let source_hash = ContentHash::from_bytes(&source);
            if source_hash.as_str() != manifest.source.hash {
                return Err(EngineError::InvalidInput {
                    path: source_abs,
                    reason: "source changed since the container was committed".to_string(),
                });
            }

            let container_key = input.to_string_lossy().replace('\\', "/");
            let canonical = serde_json::to_vec(&manifest).map_err(|e| EngineError::InvalidInput {
                path: input.clone(),
                reason: e.to_string(),
            })?;

            put_short(&mut buf, container_key.as_bytes(), input)?;
            let manifest_len =
                u32::try_from(canonical.len()).map_err(|_| EngineError::InvalidInput {
                    path: input.clone(),
                    reason: "container manifest too large".to_string(),
                })?;
            buf.extend_from_slice(&manifest_len.to_le_bytes());
            buf.extend_from_slice(&canonical);
            put_short(&mut buf, manifest.source.path.as_bytes(), input)?;
            buf.extend_from_slice(&(source.len() as u64).to_le_bytes());
            buf.extend_from_slice(&source);

            assets.push(BundleManifestAsset {
                guid: guid_for(input),
                container: container_key,
                source: manifest.source.path.clone(),
                source_hash: source_hash.to_string(),
            });
        }

        let digest = Sha256::digest(&buf);
        buf.extend_from_slice(&digest);
        Ok((buf, assets))
    }
}

impl PackagingEngine for ArchiveEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn build(
        &self,
        output_dir: &Path,
        units: &[BuildUnit],
        options: BuildOptions,
        platform: TargetPlatform,
    ) -> Result<EngineReport, EngineError> {
        let mut built = 0usize;
        let mut total_bytes = 0u64;

        for unit in units {
            if unit.name.is_empty() || unit.name.contains(['/', '\\']) {
                return Err(EngineError::InvalidInput {
                    path: PathBuf::from(&unit.name),
                    reason: "bundle name must be a plain file name".to_string(),
                });
            }

            let bundle_path = output_dir.join(&unit.name);
            if self.fs.is_file(&bundle_path) {
                if !options.force_rebuild {
                    continue;
                }
                self.fs
                    .remove_file(&bundle_path)
                    .map_err(|e| write_error(&bundle_path, e))?;
            }

            let (bytes, assets) = self.encode_unit(unit, platform)?;
            self.fs
                .write(&bundle_path, &bytes)
                .map_err(|e| write_error(&bundle_path, e))?;

            let manifest = BundleManifest {
                bundle: unit.name.clone(),
                platform: platform.to_string(),
                format_version: BUNDLE_FORMAT_VERSION,
                size: bytes.len() as u64,
                hash: ContentHash::from_bytes(&bytes).to_string(),
                assets,
            };
            let manifest_path = output_dir.join(format!("{}.manifest", unit.name));
            let manifest_text =
                toml::to_string_pretty(&manifest).map_err(|e| EngineError::InvalidInput {
                    path: manifest_path.clone(),
                    reason: e.to_string(),
                })?;
            self.fs
                .write(&manifest_path, manifest_text.as_bytes())
                .map_err(|e| write_error(&manifest_path, e))?;

            built += 1;
            total_bytes += bytes.len() as u64;
        }

        Ok(EngineReport::succeeded(
            ENGINE_NAME,
            format!(
                "built {} bundle(s), {} bytes for {}",
                built, total_bytes, platform
            ),
        ))
    }
}

fn put_short(buf: &mut Vec<u8>, bytes: &[u8], context: &Path) -> Result<(), EngineError> {
    let len = u16::try_from(bytes.len()).map_err(|_| EngineError::InvalidInput {
        path: context.to_path_buf(),
        reason: "name longer than 65535 bytes".to_string(),
    })?;
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(bytes);
    Ok(())
}

fn read_error(path: &Path, err: FsError) -> EngineError {
    match err {
        FsError::NotFound(_) => EngineError::InvalidInput {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        },
        other => write_error(path, other),
    }
}

fn write_error(path: &Path, err: FsError) -> EngineError {
    let source = match err {
        FsError::Io(e) => e,
        other => std::io::Error::other(other.to_string()),
    };
    EngineError::Io {
        path: path.to_path_buf(),
        source,
    }
}

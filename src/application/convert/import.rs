//! Staging import
//!
//! Replaces any staged copy of the input, copies the source into the asset
//! area, re-indexes and resolves the staged path to a handle.

use crate::domain::entities::AssetHandle;
use crate::domain::ports::{AssetDatabase, FileSystem};
use crate::domain::value_objects::PipelinePaths;
use crate::error::{PipelineError, PipelineResult};

pub(super) fn import<FS, AD>(fs: &FS, assets: &AD, paths: &PipelinePaths) -> PipelineResult<AssetHandle>
where
    FS: FileSystem,
    AD: AssetDatabase,
{
    let staged = paths.staged_asset_abs();
    let fail = |reason: String| PipelineError::ImportFailed {
        path: staged.clone(),
        reason,
    };

    assets
        .delete_asset(&paths.staged_asset)
        .map_err(|e| fail(format!("could not remove previous copy: {}", e)))?;
    let staged_dir = staged.parent().unwrap_or(paths.asset_dir.as_path());
    fs.create_dir_all(staged_dir)
        .map_err(|e| fail(e.to_string()))?;
    fs.copy(&paths.source_file, &staged)
        .map_err(|e| fail(format!("could not copy source: {}", e)))?;
    assets.refresh().map_err(|e| fail(e.to_string()))?;

    assets
        .load_asset(&paths.staged_asset)
        .map_err(|e| fail(e.to_string()))?
        .ok_or_else(|| fail("asset database returned no handle".to_string()))
}

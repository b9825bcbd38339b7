//! Container build
//!
//! One instance per run, released as soon as the container is committed or
//! the commit fails.

use crate::domain::entities::{AssetHandle, ContainerRef, InstanceId};
use crate::domain::ports::AssetDatabase;
use crate::domain::value_objects::PipelinePaths;
use crate::error::{PipelineError, PipelineResult};

/// Releases the instance when dropped
struct InstanceGuard<'a, AD: AssetDatabase> {
    assets: &'a AD,
    id: InstanceId,
}

impl<AD: AssetDatabase> Drop for InstanceGuard<'_, AD> {
    fn drop(&mut self) {
        self.assets.destroy_instance(self.id);
    }
}

pub(super) fn build_container<AD: AssetDatabase>(
    assets: &AD,
    handle: &AssetHandle,
    paths: &PipelinePaths,
) -> PipelineResult<ContainerRef> {
    let container = paths.container_abs();
    let fail = |reason: String| PipelineError::ContainerBuildFailed {
        path: container.clone(),
        reason,
    };

    assets
        .delete_asset(&paths.container)
        .map_err(|e| fail(format!("could not remove previous container: {}", e)))?;

    let id = assets
        .instantiate(handle)
        .ok_or_else(|| fail(format!("could not instantiate {}", handle.path.display())))?;
    let guard = InstanceGuard { assets, id };

    assets
        .save_as_container(guard.id, &paths.container)
        .map_err(|e| fail(e.to_string()))
}

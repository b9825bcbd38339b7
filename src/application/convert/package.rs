//! Packaging
//!
//! Success is decided by the bundle file existing afterwards. The engine's
//! own report is passed along as diagnostics.

use crate::domain::ports::{
    BuildOptions, BuildUnit, EngineReport, FileSystem, PackagingEngine, PipelineEvent,
    PipelineEventSink,
};
use crate::domain::value_objects::{PipelineConfig, PipelinePaths};
use crate::error::{PipelineError, PipelineResult};

pub(super) fn package<FS, PE>(
    fs: &FS,
    engine: &PE,
    config: &PipelineConfig,
    paths: &PipelinePaths,
    events: &dyn PipelineEventSink,
) -> PipelineResult<EngineReport>
where
    FS: FileSystem,
    PE: PackagingEngine,
{
    let fail = |detail: String| PipelineError::PackagingFailed {
        expected: paths.generated_bundle.clone(),
        detail,
    };

    fs.create_dir_all(&paths.temp_build_dir).map_err(|e| {
        fail(format!(
            "could not create {}: {}",
            paths.temp_build_dir.display(),
            e
        ))
    })?;
    // A bundle left by an interrupted run must not count as this run's output
    if fs.exists(&paths.generated_bundle) {
        fs.remove_file(&paths.generated_bundle)
            .map_err(|e| fail(format!("could not remove stale bundle: {}", e)))?;
    }

    let units = [BuildUnit::new(
        config.bundle_name(),
        vec![paths.container.clone()],
    )];
    let report = engine
        .build(
            &paths.temp_build_dir,
            &units,
            BuildOptions::force_rebuild(),
            config.platform(),
        )
        .unwrap_or_else(|e| EngineReport::failed(engine.name(), e.to_string()));

    events.on_event(PipelineEvent::EngineReported {
        report: report.clone(),
    });

    if fs.is_file(&paths.generated_bundle) {
        Ok(report)
    } else {
        Err(fail(report.summary()))
    }
}

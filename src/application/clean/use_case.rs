//! Clean Use Case
//!
//! Best-effort removal of the managed artifacts. Each step is independent:
//! a failure is recorded and reported, and the remaining steps still run.

use std::path::Path;
use std::sync::Arc;

use crate::domain::ports::{
    AssetDatabase, FileSystem, NoopEventSink, PipelineEvent, PipelineEventSink,
};
use crate::domain::value_objects::{PipelineConfig, PipelinePaths, Stage};

use super::result::CleanupReport;

/// Clean use case - recovers a workspace left dirty by an interrupted run
pub struct CleanUseCase<FS, AD>
where
    FS: FileSystem,
    AD: AssetDatabase,
{
    fs: FS,
    assets: AD,
    config: PipelineConfig,
}

impl<FS, AD> CleanUseCase<FS, AD>
where
    FS: FileSystem,
    AD: AssetDatabase,
{
    pub fn new(fs: FS, assets: AD, config: PipelineConfig) -> Self {
        Self { fs, assets, config }
    }

    /// Run the sweep without reporting progress
    pub fn execute(&self) -> CleanupReport {
        self.execute_with_events(Arc::new(NoopEventSink))
    }

    /// Run the sweep, reporting removals and failures to `events`
    pub fn execute_with_events(&self, events: Arc<dyn PipelineEventSink>) -> CleanupReport {
        let paths = PipelinePaths::resolve(&self.config);

        if events.wants_detailed_events() {
            events.on_event(PipelineEvent::StageStarted {
                stage: Stage::Cleanup,
            });
        }
        let report = sweep(&self.fs, &self.assets, &paths, events.as_ref());
        events.on_event(PipelineEvent::StageCompleted {
            stage: Stage::Cleanup,
            detail: report.summary(),
        });

        report
    }
}

/// Remove the staged asset, the container and the temp build directory,
/// then refresh the asset index
///
/// Nothing is removed when the layout would alias the input or the output.
pub fn sweep<FS, AD>(
    fs: &FS,
    assets: &AD,
    paths: &PipelinePaths,
    events: &dyn PipelineEventSink,
) -> CleanupReport
where
    FS: FileSystem,
    AD: AssetDatabase,
{
    let mut report = CleanupReport::new();

    if let Err(conflict) = paths.check_layout() {
        events.on_event(PipelineEvent::CleanupWarning {
            path: conflict.path.clone(),
            error: format!("refusing to clean: {}", conflict.reason),
        });
        report.add_error(conflict.path, format!("refusing to clean: {}", conflict.reason));
        return report;
    }

    for relative in [&paths.staged_asset, &paths.container] {
        delete_asset(assets, paths, relative, events, &mut report);
    }

    let temp = &paths.temp_build_dir;
    if fs.exists(temp) {
        match fs.remove_dir_all(temp) {
            Ok(()) => {
                events.on_event(PipelineEvent::ArtifactRemoved { path: temp.clone() });
                report.add_removed(temp.clone());
            }
            Err(e) => {
                events.on_event(PipelineEvent::CleanupWarning {
                    path: temp.clone(),
                    error: e.to_string(),
                });
                report.add_error(temp.clone(), e.to_string());
            }
        }
    } else {
        report.add_absent(temp.clone());
    }

    match assets.refresh() {
        Ok(_) => report.refreshed = true,
        Err(e) => {
            events.on_event(PipelineEvent::CleanupWarning {
                path: paths.asset_dir.clone(),
                error: e.to_string(),
            });
            report.add_error(paths.asset_dir.clone(), e.to_string());
        }
    }

    report
}

fn delete_asset<AD: AssetDatabase>(
    assets: &AD,
    paths: &PipelinePaths,
    relative: &Path,
    events: &dyn PipelineEventSink,
    report: &mut CleanupReport,
) {
    let absolute = paths.absolute(relative);
    match assets.delete_asset(relative) {
        Ok(true) => {
            events.on_event(PipelineEvent::ArtifactRemoved {
                path: absolute.clone(),
            });
            report.add_removed(absolute);
        }
        Ok(false) => report.add_absent(absolute),
        Err(e) => {
            events.on_event(PipelineEvent::CleanupWarning {
                path: absolute.clone(),
                error: e.to_string(),
            });
            report.add_error(absolute, e.to_string());
        }
    }
}

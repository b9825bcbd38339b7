//! Convert Use Case
//!
//! Runs the stages in order, stops at the first failure, then always sweeps
//! the managed artifacts before reporting the outcome. A layout whose managed
//! paths alias the input or output is refused before anything is touched.

use std::path::Path;
use std::sync::Arc;

use crate::application::clean::{sweep, CleanupReport};
use crate::domain::ports::{
    AssetDatabase, FileSystem, NoopEventSink, PackagingEngine, PipelineEvent, PipelineEventSink,
};
use crate::domain::value_objects::{PipelineConfig, PipelinePaths, RunState, Stage};
use crate::error::{PipelineError, PipelineResult};

use super::container::build_container;
use super::import::import;
use super::package::package;
use super::relocate::relocate;
use super::result::{ConvertOutcome, ConvertReport};
use super::validate::validate;

/// Convert use case - parameterized by its ports so any backend can be injected
pub struct ConvertUseCase<FS, AD, PE>
where
    FS: FileSystem,
    AD: AssetDatabase,
    PE: PackagingEngine,
{
    fs: FS,
    assets: AD,
    engine: PE,
    config: PipelineConfig,
}

impl<FS, AD, PE> ConvertUseCase<FS, AD, PE>
where
    FS: FileSystem,
    AD: AssetDatabase,
    PE: PackagingEngine,
{
    pub fn new(fs: FS, assets: AD, engine: PE, config: PipelineConfig) -> Self {
        Self {
            fs,
            assets,
            engine,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the conversion without reporting progress
    pub fn execute(&self) -> ConvertOutcome {
        self.execute_with_events(Arc::new(NoopEventSink))
    }

    /// Run the conversion, reporting each stage boundary to `events`
    pub fn execute_with_events(&self, events: Arc<dyn PipelineEventSink>) -> ConvertOutcome {
        let events = events.as_ref();
        let paths = PipelinePaths::resolve(&self.config);

        events.on_event(PipelineEvent::Started {
            source: paths.source_file.clone(),
            output: paths.final_output.clone(),
            platform: self.config.platform(),
        });

        // Nothing may be staged or swept when that would touch the input or output
        if let Err(conflict) = paths.check_layout() {
            let err = PipelineError::UnsafeLayout {
                path: conflict.path,
                reason: conflict.reason.to_string(),
            };
            events.on_event(PipelineEvent::Failed {
                stage: None,
                kind: err.kind(),
                error: err.to_string(),
            });
            return ConvertOutcome {
                result: Err(err),
                cleanup: CleanupReport::new(),
                state: RunState::Start,
            };
        }

        let mut state = RunState::Start;
        let result = self.run_stages(&paths, events, &mut state);

        if events.wants_detailed_events() {
            events.on_event(PipelineEvent::StageStarted {
                stage: Stage::Cleanup,
            });
        }
        let cleanup = sweep(&self.fs, &self.assets, &paths, events);
        events.on_event(PipelineEvent::StageCompleted {
            stage: Stage::Cleanup,
            detail: cleanup.summary(),
        });

        match &result {
            Ok(report) => events.on_event(PipelineEvent::Completed {
                output: report.output.clone(),
                size: report.size,
                hash: report.hash.clone(),
            }),
            Err(e) => events.on_event(PipelineEvent::Failed {
                stage: e.stage(),
                kind: e.kind(),
                error: e.to_string(),
            }),
        }

        ConvertOutcome {
            result,
            cleanup,
            state,
        }
    }

    fn run_stages(
        &self,
        paths: &PipelinePaths,
        events: &dyn PipelineEventSink,
        state: &mut RunState,
    ) -> PipelineResult<ConvertReport> {
        run_stage(Stage::Validate, events, state, || {
            validate(&self.fs, &paths.source_file)?;
            Ok(((), paths.source_file.display().to_string()))
        })?;

        let handle = run_stage(Stage::Import, events, state, || {
            let handle = import(&self.fs, &self.assets, paths)?;
            let detail = format!("{} ({}, {} bytes)", handle.path.display(), handle.format, handle.size);
            Ok((handle, detail))
        })?;

        run_stage(Stage::Containerize, events, state, || {
            let container = build_container(&self.assets, &handle, paths)?;
            let detail = container.path.display().to_string();
            Ok((container, detail))
        })?;

        let engine = run_stage(Stage::Package, events, state, || {
            let report = package(&self.fs, &self.engine, &self.config, paths, events)?;
            Ok((report, paths.generated_bundle.display().to_string()))
        })?;

        let (size, hash) = run_stage(Stage::Relocate, events, state, || {
            let (size, hash) = relocate(&self.fs, paths)?;
            Ok(((size, hash), paths.final_output.display().to_string()))
        })?;

        Ok(ConvertReport {
            output: paths.final_output.clone(),
            size,
            hash,
            engine,
        })
    }
}

/// Run one stage, emitting its boundary events and advancing `state` on success
fn run_stage<T>(
    stage: Stage,
    events: &dyn PipelineEventSink,
    state: &mut RunState,
    run: impl FnOnce() -> PipelineResult<(T, String)>,
) -> PipelineResult<T> {
    if events.wants_detailed_events() {
        events.on_event(PipelineEvent::StageStarted { stage });
    }

    match run() {
        Ok((value, detail)) => {
            *state = state.advance(stage);
            events.on_event(PipelineEvent::StageCompleted { stage, detail });
            Ok(value)
        }
        Err(e) => {
            events.on_event(PipelineEvent::StageFailed {
                stage,
                path: e.path().map(Path::to_path_buf),
                error: e.to_string(),
            });
            Err(e)
        }
    }
}

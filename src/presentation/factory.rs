//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use crate::application::{CleanUseCase, ConvertUseCase};
use crate::config::{ColorMode, Config, EngineKind, Verbosity};
use crate::domain::ports::{PackagingEngine, PipelineEventSink};
use crate::infrastructure::{
    ArchiveEngine, CommandEngine, ConsoleEventSink, FsAssetDatabase, JsonEventSink, LocalFs,
};

/// Type alias for the concrete ConvertUseCase with all dependencies
pub type ConcreteConvertUseCase =
    ConvertUseCase<LocalFs, FsAssetDatabase, Box<dyn PackagingEngine>>;

/// Type alias for the concrete CleanUseCase with all dependencies
pub type ConcreteCleanUseCase = CleanUseCase<LocalFs, FsAssetDatabase>;

/// Create the packaging engine selected by `config`
pub fn create_packaging_engine(config: &Config, root: &Path) -> Box<dyn PackagingEngine> {
    match config.packaging.engine {
        EngineKind::Archive => Box::new(ArchiveEngine::new(root)),
        EngineKind::Command => Box::new(CommandEngine::new(
            config.packaging.command.clone().unwrap_or_default(),
            config.packaging.args.clone(),
            root,
        )),
    }
}

/// Create a convert use case for the workspace at `root`
pub fn create_convert_use_case(config: &Config, root: &Path) -> ConcreteConvertUseCase {
    let file_system = LocalFs::new();
    let assets = FsAssetDatabase::with_asset_dir(root, &config.pipeline.asset_dir);
    let engine = create_packaging_engine(config, root);

    ConvertUseCase::new(file_system, assets, engine, config.to_pipeline_config(root))
}

/// Create a clean use case for the workspace at `root`
pub fn create_clean_use_case(config: &Config, root: &Path) -> ConcreteCleanUseCase {
    let file_system = LocalFs::new();
    let assets = FsAssetDatabase::with_asset_dir(root, &config.pipeline.asset_dir);

    CleanUseCase::new(file_system, assets, config.to_pipeline_config(root))
}

/// Create the event sink for the requested output mode
pub fn create_event_sink(
    json: bool,
    verbosity: Verbosity,
    color: ColorMode,
) -> Arc<dyn PipelineEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stderr(verbosity, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_engine_is_archive() {
        let engine = create_packaging_engine(&Config::default(), Path::new("/work"));
        assert_eq!(engine.name(), "archive");
    }

    #[test]
    fn command_engine_selected_by_config() {
        let mut config = Config::default();
        config.packaging.engine = EngineKind::Command;
        config.packaging.command = Some("unity".to_string());

        let engine = create_packaging_engine(&config, Path::new("/work"));
        assert_eq!(engine.name(), "command");
    }

    #[test]
    fn convert_use_case_uses_configured_names() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.pipeline.input = "hero.obj".to_string();

        let use_case = create_convert_use_case(&config, dir.path());
        assert_eq!(use_case.config().input_file_name(), "hero.obj");
        assert_eq!(use_case.config().root(), dir.path());
    }

    #[test]
    fn clean_use_case_on_empty_workspace() {
        let dir = tempdir().unwrap();
        let report = create_clean_use_case(&Config::default(), dir.path()).execute();
        assert!(report.is_clean());
    }
}

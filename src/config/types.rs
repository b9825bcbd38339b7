//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    PipelineConfig, PipelinePaths, TargetPlatform, DEFAULT_ASSET_DIR, DEFAULT_BUNDLE_NAME,
    DEFAULT_CONTAINER_NAME, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE,
    DEFAULT_TEMP_DIR,
};
use crate::error::{PipelineError, PipelineResult};

use super::loader::{self, ConfigWarning};

/// File and directory names of a conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSection {
    #[serde(default = "default_input")]
    pub input: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_output_file")]
    pub output_file: String,

    #[serde(default = "default_bundle_name")]
    pub bundle_name: String,

    #[serde(default = "default_container_name")]
    pub container_name: String,

    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,

    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            input: default_input(),
            output_dir: default_output_dir(),
            output_file: default_output_file(),
            bundle_name: default_bundle_name(),
            container_name: default_container_name(),
            asset_dir: default_asset_dir(),
            temp_dir: default_temp_dir(),
        }
    }
}

fn default_input() -> String {
    DEFAULT_INPUT_FILE.to_string()
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_output_file() -> String {
    DEFAULT_OUTPUT_FILE.to_string()
}

fn default_bundle_name() -> String {
    DEFAULT_BUNDLE_NAME.to_string()
}

fn default_container_name() -> String {
    DEFAULT_CONTAINER_NAME.to_string()
}

fn default_asset_dir() -> String {
    DEFAULT_ASSET_DIR.to_string()
}

fn default_temp_dir() -> String {
    DEFAULT_TEMP_DIR.to_string()
}

/// Which packaging engine to run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Built-in deterministic archive writer
    #[default]
    Archive,
    /// External build program
    Command,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Archive => "archive",
            EngineKind::Command => "command",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "archive" => Some(EngineKind::Archive),
            "command" | "cmd" => Some(EngineKind::Command),
            _ => None,
        }
    }
}

/// Packaging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PackagingSection {
    #[serde(default)]
    pub platform: TargetPlatform,

    #[serde(default)]
    pub engine: EngineKind,

    /// Program run by the command engine
    #[serde(default)]
    pub command: Option<String>,

    /// Arguments placed before the build request
    #[serde(default)]
    pub args: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputSection {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineSection,

    #[serde(default)]
    pub packaging: PackagingSection,

    #[serde(default)]
    pub output: OutputSection,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PipelineResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load the workspace config (or `explicit`), falling back to defaults
    pub fn load_or_default(
        root: &Path,
        explicit: Option<&Path>,
    ) -> PipelineResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(root, explicit)
    }

    /// Apply environment variable overrides (ITEMPACK_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Check settings that only make sense together
    pub fn validate(&self, source: &Path) -> PipelineResult<()> {
        if self.packaging.engine == EngineKind::Command
            && self
                .packaging
                .command
                .as_deref()
                .map_or(true, |c| c.trim().is_empty())
        {
            return Err(PipelineError::Config {
                file: source.to_path_buf(),
                message: "packaging.engine = \"command\" requires packaging.command".to_string(),
            });
        }

        let names = [
            ("pipeline.input", &self.pipeline.input),
            ("pipeline.output_file", &self.pipeline.output_file),
            ("pipeline.bundle_name", &self.pipeline.bundle_name),
            ("pipeline.container_name", &self.pipeline.container_name),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(PipelineError::Config {
                    file: source.to_path_buf(),
                    message: format!("{} must not be empty", key),
                });
            }
        }
        if self.pipeline.bundle_name.contains(['/', '\\']) {
            return Err(PipelineError::Config {
                file: source.to_path_buf(),
                message: "pipeline.bundle_name must be a plain file name".to_string(),
            });
        }

        let paths = PipelinePaths::resolve(&self.to_pipeline_config(Path::new(".")));
        if let Err(conflict) = paths.check_layout() {
            return Err(PipelineError::Config {
                file: source.to_path_buf(),
                message: format!("[pipeline] {}", conflict),
            });
        }

        Ok(())
    }

    /// Pipeline settings rooted at the workspace `root`
    pub fn to_pipeline_config(&self, root: &Path) -> PipelineConfig {
        PipelineConfig::new(root)
            .with_input(&self.pipeline.input)
            .with_output_dir(&self.pipeline.output_dir)
            .with_output_file(&self.pipeline.output_file)
            .with_asset_dir(&self.pipeline.asset_dir)
            .with_temp_dir(&self.pipeline.temp_dir)
            .with_container_name(&self.pipeline.container_name)
            .with_bundle_name(&self.pipeline.bundle_name)
            .with_platform(self.packaging.platform)
    }
}

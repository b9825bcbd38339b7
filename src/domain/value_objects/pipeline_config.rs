//! Pipeline configuration value object
//!
//! The fixed inputs of one run. Built once at process start and never
//! mutated; every path the pipeline touches is derived from it.

use std::path::{Path, PathBuf};

use super::platform::TargetPlatform;

pub const DEFAULT_INPUT_FILE: &str = "model.fbx";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_OUTPUT_FILE: &str = "model.zepeto";
pub const DEFAULT_ASSET_DIR: &str = "Assets";
pub const DEFAULT_TEMP_DIR: &str = "TempBuild";
pub const DEFAULT_CONTAINER_NAME: &str = "TempZepetoItem.prefab";
pub const DEFAULT_BUNDLE_NAME: &str = "zepeto_bundle";

/// Immutable configuration for one conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    root: PathBuf,
    input_file_name: String,
    output_dir_name: String,
    output_file_name: String,
    asset_dir_name: String,
    temp_dir_name: String,
    container_name: String,
    bundle_name: String,
    platform: TargetPlatform,
}

impl PipelineConfig {
    /// Configuration rooted at `root` with the default names
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            input_file_name: DEFAULT_INPUT_FILE.to_string(),
            output_dir_name: DEFAULT_OUTPUT_DIR.to_string(),
            output_file_name: DEFAULT_OUTPUT_FILE.to_string(),
            asset_dir_name: DEFAULT_ASSET_DIR.to_string(),
            temp_dir_name: DEFAULT_TEMP_DIR.to_string(),
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            bundle_name: DEFAULT_BUNDLE_NAME.to_string(),
            platform: TargetPlatform::default(),
        }
    }

    pub fn with_input(mut self, name: impl Into<String>) -> Self {
        self.input_file_name = name.into();
        self
    }

    pub fn with_output_dir(mut self, name: impl Into<String>) -> Self {
        self.output_dir_name = name.into();
        self
    }

    pub fn with_output_file(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    pub fn with_asset_dir(mut self, name: impl Into<String>) -> Self {
        self.asset_dir_name = name.into();
        self
    }

    pub fn with_temp_dir(mut self, name: impl Into<String>) -> Self {
        self.temp_dir_name = name.into();
        self
    }

    pub fn with_container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = name.into();
        self
    }

    pub fn with_bundle_name(mut self, name: impl Into<String>) -> Self {
        self.bundle_name = name.into();
        self
    }

    pub fn with_platform(mut self, platform: TargetPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Workspace root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn input_file_name(&self) -> &str {
        &self.input_file_name
    }

    pub fn output_dir_name(&self) -> &str {
        &self.output_dir_name
    }

    pub fn output_file_name(&self) -> &str {
        &self.output_file_name
    }

    pub fn asset_dir_name(&self) -> &str {
        &self.asset_dir_name
    }

    pub fn temp_dir_name(&self) -> &str {
        &self.temp_dir_name
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn bundle_name(&self) -> &str {
        &self.bundle_name
    }

    pub fn platform(&self) -> TargetPlatform {
        self.platform
    }
}

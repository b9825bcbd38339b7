//! Resolved pipeline paths
//!
//! Pure composition of [`PipelineConfig`] names against the workspace root.
//! Resolved once per run so every stage sees the same locations.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::pipeline_config::PipelineConfig;

/// A resolved location that would make the pipeline destroy data it does not own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConflict {
    pub path: PathBuf,
    pub reason: &'static str,
}

impl fmt::Display for LayoutConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Every location a conversion run reads, writes or removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    /// Workspace root
    pub root: PathBuf,
    /// `<root>/<input>`, read-only
    pub source_file: PathBuf,
    /// `<root>/Assets`
    pub asset_dir: PathBuf,
    /// `Assets/<input>`, relative to root
    pub staged_asset: PathBuf,
    /// `Assets/<container>`, relative to root
    pub container: PathBuf,
    /// `<root>/TempBuild`
    pub temp_build_dir: PathBuf,
    /// `<root>/TempBuild/<bundle>`
    pub generated_bundle: PathBuf,
    /// `<root>/<output_dir>`
    pub output_dir: PathBuf,
    /// `<root>/<output_dir>/<output_file>`
    pub final_output: PathBuf,
}

impl PipelinePaths {
    /// Resolve all paths for `config`
    pub fn resolve(config: &PipelineConfig) -> Self {
        let root = config.root().to_path_buf();
        let asset_rel = PathBuf::from(config.asset_dir_name());
        let temp_build_dir = root.join(config.temp_dir_name());
        let output_dir = root.join(config.output_dir_name());

        Self {
            source_file: root.join(config.input_file_name()),
            asset_dir: root.join(&asset_rel),
            staged_asset: asset_rel.join(config.input_file_name()),
            container: asset_rel.join(config.container_name()),
            generated_bundle: temp_build_dir.join(config.bundle_name()),
            temp_build_dir,
            final_output: output_dir.join(config.output_file_name()),
            output_dir,
            root,
        }
    }

    /// Absolute location of a root-relative path
    pub fn absolute(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Absolute location of the staged asset
    pub fn staged_asset_abs(&self) -> PathBuf {
        self.absolute(&self.staged_asset)
    }

    /// Absolute location of the container artifact
    pub fn container_abs(&self) -> PathBuf {
        self.absolute(&self.container)
    }

    /// Check that managed paths stay inside the root and never alias the
    /// input or the final output.
    ///
    /// Staging, cleanup and relocation delete whatever lives at these
    /// locations, so a layout that fails this check must not be run.
    pub fn check_layout(&self) -> Result<(), LayoutConflict> {
        let conflict = |path: &Path, reason| {
            Err(LayoutConflict {
                path: path.to_path_buf(),
                reason,
            })
        };

        let staged = self.staged_asset_abs();
        let container = self.container_abs();

        for path in [
            &self.source_file,
            &staged,
            &container,
            &self.temp_build_dir,
            &self.generated_bundle,
            &self.final_output,
        ] {
            let escapes = !path.starts_with(&self.root)
                || path.components().any(|c| matches!(c, Component::ParentDir));
            if escapes {
                return conflict(path, "escapes the workspace root");
            }
        }

        for managed in [&staged, &container, &self.temp_build_dir] {
            if *managed == self.root {
                return conflict(managed, "managed location is the workspace root");
            }
        }

        if staged == self.source_file {
            return conflict(&staged, "staged copy would replace the input");
        }
        if container == self.source_file || container == staged {
            return conflict(&container, "container would replace the input model");
        }
        if self.source_file.starts_with(&self.temp_build_dir) {
            return conflict(&self.source_file, "input lies inside the temp build directory");
        }
        if self.final_output == self.source_file {
            return conflict(&self.final_output, "output would replace the input");
        }
        if self.final_output == staged
            || self.final_output == container
            || self.final_output.starts_with(&self.temp_build_dir)
        {
            return conflict(&self.final_output, "output would be removed by cleanup");
        }

        Ok(())
    }

    /// Intermediate artifacts owned by the pipeline, as absolute paths
    pub fn managed_paths(&self) -> [PathBuf; 3] {
        [
            self.staged_asset_abs(),
            self.container_abs(),
            self.temp_build_dir.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_composes_against_root() {
        let config = PipelineConfig::new("/work")
            .with_input("model.src")
            .with_output_file("model.bundle");
        let paths = PipelinePaths::resolve(&config);

        assert_eq!(paths.source_file, PathBuf::from("/work/model.src"));
        assert_eq!(paths.staged_asset, PathBuf::from("Assets/model.src"));
        assert_eq!(paths.staged_asset_abs(), PathBuf::from("/work/Assets/model.src"));
        assert_eq!(paths.container, PathBuf::from("Assets/TempZepetoItem.prefab"));
        assert_eq!(paths.temp_build_dir, PathBuf::from("/work/TempBuild"));
        assert_eq!(
            paths.generated_bundle,
            PathBuf::from("/work/TempBuild/zepeto_bundle")
        );
        assert_eq!(paths.final_output, PathBuf::from("/work/output/model.bundle"));
    }

    #[test]
    fn resolve_is_deterministic() {
        let config = PipelineConfig::new("/work");
        assert_eq!(PipelinePaths::resolve(&config), PipelinePaths::resolve(&config));
    }

    #[test]
    fn managed_paths_exclude_input_and_output() {
        let paths = PipelinePaths::resolve(&PipelineConfig::new("/work"));
        let managed = paths.managed_paths();
        assert!(!managed.contains(&paths.source_file));
        assert!(!managed.contains(&paths.final_output));
    }

    fn conflict_for(config: PipelineConfig) -> LayoutConflict {
        PipelinePaths::resolve(&config).check_layout().unwrap_err()
    }

    #[test]
    fn default_layout_is_safe() {
        let paths = PipelinePaths::resolve(&PipelineConfig::new("/work"));
        assert_eq!(paths.check_layout(), Ok(()));
    }

    #[test]
    fn nested_input_and_output_are_safe() {
        let config = PipelineConfig::new("/work")
            .with_input("models/hero.fbx")
            .with_output_dir("dist/items");
        assert_eq!(PipelinePaths::resolve(&config).check_layout(), Ok(()));
    }

    #[test]
    fn absolute_input_escapes_root() {
        let conflict = conflict_for(PipelineConfig::new("/work").with_input("/home/me/hero.fbx"));
        assert_eq!(conflict.reason, "escapes the workspace root");
        assert_eq!(conflict.path, PathBuf::from("/home/me/hero.fbx"));
    }

    #[test]
    fn parent_components_escape_root() {
        let conflict = conflict_for(PipelineConfig::new("/work").with_input("../hero.fbx"));
        assert_eq!(conflict.reason, "escapes the workspace root");

        let conflict = conflict_for(PipelineConfig::new("/work").with_output_dir("../dist"));
        assert_eq!(conflict.reason, "escapes the workspace root");
    }

    #[test]
    fn staging_over_the_input_is_rejected() {
        let conflict = conflict_for(PipelineConfig::new("/work").with_asset_dir("."));
        assert_eq!(conflict.reason, "staged copy would replace the input");
    }

    #[test]
    fn container_named_like_input_is_rejected() {
        let conflict = conflict_for(
            PipelineConfig::new("/work")
                .with_input("hero.prefab")
                .with_container_name("hero.prefab"),
        );
        assert_eq!(conflict.reason, "container would replace the input model");
    }

    #[test]
    fn temp_dir_at_root_is_rejected() {
        let conflict = conflict_for(PipelineConfig::new("/work").with_temp_dir("."));
        assert_eq!(conflict.reason, "managed location is the workspace root");
    }

    #[test]
    fn output_inside_temp_dir_is_rejected() {
        let conflict = conflict_for(PipelineConfig::new("/work").with_output_dir("TempBuild"));
        assert_eq!(conflict.reason, "output would be removed by cleanup");
        assert_eq!(conflict.path, PathBuf::from("/work/TempBuild/model.zepeto"));
    }

    #[test]
    fn output_over_staged_copy_is_rejected() {
        let conflict = conflict_for(
            PipelineConfig::new("/work")
                .with_output_dir("Assets")
                .with_output_file("model.fbx"),
        );
        assert_eq!(conflict.reason, "output would be removed by cleanup");

        let conflict = conflict_for(
            PipelineConfig::new("/work")
                .with_output_dir("Assets")
                .with_output_file("TempZepetoItem.prefab"),
        );
        assert_eq!(conflict.reason, "output would be removed by cleanup");
    }

    #[test]
    fn output_over_input_is_rejected() {
        let conflict = conflict_for(
            PipelineConfig::new("/work")
                .with_output_dir(".")
                .with_output_file("model.fbx"),
        );
        assert_eq!(conflict.reason, "output would replace the input");
    }
}

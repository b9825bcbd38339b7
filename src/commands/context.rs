//! Shared command setup: workspace root and layered configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use itempack::config::{Config, Verbosity, CONFIG_FILE_NAME};
use itempack::infrastructure::events::ConsoleStyle;
use itempack::presentation::output::render_config_warnings;
use itempack::presentation::{Cli, ConvertArgs};

/// Everything a command needs once flags, env and config are merged
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub root: PathBuf,
    pub config: Config,
    pub json: bool,
}

impl CommandContext {
    /// Merge defaults, config file, environment and CLI flags, in that order
    pub fn load(cli: &Cli, overrides: Option<&ConvertArgs>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let root = match &cli.workspace {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd,
        };
        let explicit = cli.config.as_ref().map(|p| absolutize(&root, p));
        let source = explicit
            .clone()
            .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));

        let (config, warnings) = Config::load_or_default(&root, explicit.as_deref())?;
        let mut config = config.with_env_overrides();

        if let Some(args) = overrides {
            apply_args(&mut config, args);
        }
        if cli.verbose > 0 {
            config.output.verbosity = Verbosity::Verbose;
        } else if cli.quiet {
            config.output.verbosity = Verbosity::Quiet;
        }
        if let Some(color) = cli.color {
            config.output.color = color.into();
        }

        config.validate(&source)?;

        if !warnings.is_empty() && !cli.json {
            let unicode = ConsoleStyle::detect(config.output.color).unicode;
            eprint!("{}", render_config_warnings(&warnings, unicode));
        }

        Ok(Self {
            root,
            config,
            json: cli.json,
        })
    }

    pub fn unicode(&self) -> bool {
        ConsoleStyle::detect(self.config.output.color).unicode
    }
}

fn absolutize(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn apply_args(config: &mut Config, args: &ConvertArgs) {
    if let Some(input) = &args.input {
        config.pipeline.input = input.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.pipeline.output_dir = output_dir.clone();
    }
    if let Some(output_file) = &args.output_file {
        config.pipeline.output_file = output_file.clone();
    }
    if let Some(platform) = args.platform {
        config.packaging.platform = platform;
    }
    if let Some(engine) = args.engine {
        config.packaging.engine = engine;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itempack::config::EngineKind;
    use itempack::domain::value_objects::TargetPlatform;

    #[test]
    fn cli_args_override_config() {
        let mut config = Config::default();
        let args = ConvertArgs {
            input: Some("model.src".to_string()),
            output_file: Some("model.bundle".to_string()),
            platform: Some(TargetPlatform::WebGl),
            engine: Some(EngineKind::Command),
            ..Default::default()
        };

        apply_args(&mut config, &args);

        assert_eq!(config.pipeline.input, "model.src");
        assert_eq!(config.pipeline.output_dir, "output");
        assert_eq!(config.pipeline.output_file, "model.bundle");
        assert_eq!(config.packaging.platform, TargetPlatform::WebGl);
        assert_eq!(config.packaging.engine, EngineKind::Command);
    }

    #[test]
    fn relative_config_path_is_rooted_at_workspace() {
        assert_eq!(
            absolutize(Path::new("/work"), Path::new("ci/itempack.toml")),
            PathBuf::from("/work/ci/itempack.toml")
        );
        assert_eq!(
            absolutize(Path::new("/work"), Path::new("/etc/itempack.toml")),
            PathBuf::from("/etc/itempack.toml")
        );
    }
}

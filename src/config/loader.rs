//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::TargetPlatform;
use crate::error::{PipelineError, PipelineResult};

use super::types::{Config, EngineKind, Verbosity};

/// Config file looked up in the workspace root
pub const CONFIG_FILE_NAME: &str = "itempack.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PipelineResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| PipelineError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PipelineError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `explicit`, or `<root>/itempack.toml` if present, or defaults
///
/// An explicit path that does not exist is an error; a missing workspace
/// config is not.
pub fn load_or_default(
    root: &Path,
    explicit: Option<&Path>,
) -> PipelineResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        return load_with_warnings(path);
    }

    let workspace_config = root.join(CONFIG_FILE_NAME);
    if workspace_config.is_file() {
        return load_with_warnings(&workspace_config);
    }

    Ok((Config::default(), Vec::new()))
}

/// Apply environment variable overrides (ITEMPACK_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from `lookup`; unparseable values are ignored
pub fn apply_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(input) = non_empty("ITEMPACK_INPUT") {
        config.pipeline.input = input;
    }
    if let Some(output_dir) = non_empty("ITEMPACK_OUTPUT_DIR") {
        config.pipeline.output_dir = output_dir;
    }
    if let Some(output_file) = non_empty("ITEMPACK_OUTPUT_FILE") {
        config.pipeline.output_file = output_file;
    }

    // ITEMPACK_PLATFORM
    if let Some(platform) = non_empty("ITEMPACK_PLATFORM") {
        if let Ok(platform) = platform.parse::<TargetPlatform>() {
            config.packaging.platform = platform;
        }
    }

    // ITEMPACK_ENGINE
    if let Some(engine) = non_empty("ITEMPACK_ENGINE").and_then(|e| EngineKind::parse(&e)) {
        config.packaging.engine = engine;
    }

    // ITEMPACK_VERBOSITY
    if let Some(verbosity) = non_empty("ITEMPACK_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" | "debug" => Verbosity::Verbose,
            _ => Verbosity::Normal,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "pipeline",
        "input",
        "output_dir",
        "output_file",
        "bundle_name",
        "container_name",
        "asset_dir",
        "temp_dir",
        "packaging",
        "platform",
        "engine",
        "command",
        "args",
        "output",
        "verbosity",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

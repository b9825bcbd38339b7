//! Output Rendering
//!
//! Renders command results that are not part of the event stream: resolved
//! paths, standalone cleanup results and config warnings.

use crate::application::CleanupReport;
use crate::config::ConfigWarning;
use crate::domain::value_objects::PipelinePaths;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    trash: &'static str,
    warn: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            trash: "🗑",
            warn: "⚠",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            trash: "[DEL]",
            warn: "[WARN]",
        }
    }

    fn pick(unicode: bool) -> Self {
        if unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

fn paths_json(paths: &PipelinePaths) -> serde_json::Value {
    serde_json::json!({
        "root": paths.root.display().to_string(),
        "source_file": paths.source_file.display().to_string(),
        "staged_asset": paths.staged_asset_abs().display().to_string(),
        "container": paths.container_abs().display().to_string(),
        "temp_build_dir": paths.temp_build_dir.display().to_string(),
        "generated_bundle": paths.generated_bundle.display().to_string(),
        "output_dir": paths.output_dir.display().to_string(),
        "final_output": paths.final_output.display().to_string(),
    })
}

fn paths_text(paths: &PipelinePaths) -> String {
    let rows = [
        ("root", paths.root.clone()),
        ("source", paths.source_file.clone()),
        ("staged asset", paths.staged_asset_abs()),
        ("container", paths.container_abs()),
        ("temp build", paths.temp_build_dir.clone()),
        ("bundle", paths.generated_bundle.clone()),
        ("output", paths.final_output.clone()),
    ];

    let mut out = String::new();
    for (label, path) in rows {
        out.push_str(&format!("  {:<14}{}\n", label, path.display()));
    }
    out
}

/// Render resolved pipeline paths
pub fn render_paths(paths: &PipelinePaths, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => paths_text(paths),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&paths_json(paths)).unwrap_or_default()
        }
    }
}

/// Render the result of a standalone cleanup
pub fn render_cleanup(report: &CleanupReport, format: OutputFormat, unicode: bool) -> String {
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "event": "complete",
                "command": "clean",
                "status": if report.is_clean() { "success" } else { "failure" },
                "removed": report.removed.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                "errors": report.errors.iter().map(|e| serde_json::json!({
                    "path": e.path.display().to_string(),
                    "error": e.error,
                })).collect::<Vec<_>>(),
            });
            json.to_string()
        }
        OutputFormat::Text => {
            let icons = Icons::pick(unicode);
            let mut out = String::new();

            if report.is_clean() {
                if report.removed.is_empty() {
                    out.push_str(&format!("{} Workspace already clean\n", icons.check));
                } else {
                    out.push_str(&format!("{} Clean Complete\n", icons.check));
                }
            } else {
                out.push_str(&format!("{} Clean Incomplete\n", icons.cross));
            }

            for path in &report.removed {
                out.push_str(&format!("    {} {}\n", icons.trash, path.display()));
            }
            for failure in &report.errors {
                out.push_str(&format!(
                    "    {} {}: {}\n",
                    icons.cross,
                    failure.path.display(),
                    failure.error
                ));
            }
            out
        }
    }
}

/// Render config warnings, one line each
pub fn render_config_warnings(warnings: &[ConfigWarning], unicode: bool) -> String {
    let icons = Icons::pick(unicode);
    warnings
        .iter()
        .map(|w| format!("{} {}\n", icons.warn, w))
        .collect()
}

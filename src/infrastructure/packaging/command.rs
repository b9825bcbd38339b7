//! External Command Packaging Engine
//!
//! Delegates packaging to a real build engine run as a child process (for
//! example a game engine launched in batch mode). The configured arguments
//! come first, followed by:
//!
//! ```text
//! --output-dir <dir> --platform <platform> [--force-rebuild]
//! --bundle <name> --input <container>...   (per build unit)
//! ```

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::ports::packaging_engine::{
    BuildOptions, BuildUnit, EngineError, EngineReport, PackagingEngine,
};
use crate::domain::value_objects::TargetPlatform;

const ENGINE_NAME: &str = "command";

/// Lines of stderr kept for diagnostics
const STDERR_TAIL_LINES: usize = 10;

/// Packaging engine that shells out to an external program
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    root: PathBuf,
}

impl CommandEngine {
    /// Run `program` with `args` from the workspace `root`
    pub fn new(program: impl Into<String>, args: Vec<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            root: root.into(),
        }
    }

    fn command(
        &self,
        output_dir: &Path,
        units: &[BuildUnit],
        options: BuildOptions,
        platform: TargetPlatform,
    ) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .current_dir(&self.root)
            .arg("--output-dir")
            .arg(output_dir)
            .arg("--platform")
            .arg(platform.as_str());

        if options.force_rebuild {
            cmd.arg("--force-rebuild");
        }

        for unit in units {
            cmd.arg("--bundle").arg(&unit.name);
            for input in &unit.inputs {
                cmd.arg("--input").arg(input);
            }
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl PackagingEngine for CommandEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn build(
        &self,
        output_dir: &Path,
        units: &[BuildUnit],
        options: BuildOptions,
        platform: TargetPlatform,
    ) -> Result<EngineReport, EngineError> {
        let output = self
            .command(output_dir, units, options, platform)
            .output()
            .map_err(|e| EngineError::Launch {
                command: self.program.clone(),
                reason: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail = tail_lines(&stderr, STDERR_TAIL_LINES);

        let report = if output.status.success() {
            EngineReport::succeeded(ENGINE_NAME, tail)
        } else {
            EngineReport::failed(ENGINE_NAME, tail)
        };

        Ok(report.with_exit_code(output.status.code()))
    }
}

/// Last `n` non-empty lines of `text`, joined with ` | `
fn tail_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tail_lines_keeps_last_lines() {
        assert_eq!(tail_lines("a\n\nb\nc\n", 2), "b | c");
        assert_eq!(tail_lines("", 3), "");
    }

    #[test]
    fn missing_program_is_launch_error() {
        let dir = tempdir().unwrap();
        let engine = CommandEngine::new("itempack-no-such-engine", vec![], dir.path());

        let err = engine
            .build(
                &dir.path().join("TempBuild"),
                &[],
                BuildOptions::force_rebuild(),
                TargetPlatform::StandaloneLinux64,
            )
            .unwrap_err();

        assert!(matches!(err, EngineError::Launch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn passes_build_request_to_program() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("TempBuild");
        std::fs::create_dir_all(&out).unwrap();

        let script = r#"
            while [ $# -gt 0 ]; do
                case "$1" in
                    --output-dir) out="$2"; shift ;;
                    --bundle) bundle="$2"; shift ;;
                    --platform) platform="$2"; shift ;;
                    --force-rebuild) force=yes ;;
                esac
                shift
            done
            printf '%s:%s' "$platform" "$force" > "$out/$bundle"
            echo "packed $bundle" >&2
        "#;
        let engine = CommandEngine::new(
            "sh",
            vec!["-c".to_string(), script.to_string(), "engine".to_string()],
            dir.path(),
        );

        let report = engine
            .build(
                &out,
                &[BuildUnit::new(
                    "zepeto_bundle",
                    vec![PathBuf::from("Assets/TempZepetoItem.prefab")],
                )],
                BuildOptions::force_rebuild(),
                TargetPlatform::StandaloneLinux64,
            )
            .unwrap();

        assert!(report.success);
        assert_eq!(report.exit_code, Some(0));
        assert_eq!(report.message.as_deref(), Some("packed zepeto_bundle"));
        assert_eq!(
            std::fs::read_to_string(out.join("zepeto_bundle")).unwrap(),
            "standalone-linux64:yes"
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported_not_raised() {
        let dir = tempdir().unwrap();
        let engine = CommandEngine::new(
            "sh",
            vec![
                "-c".to_string(),
                "echo 'license check failed' >&2; exit 3".to_string(),
                "engine".to_string(),
            ],
            dir.path(),
        );

        let report = engine
            .build(
                dir.path(),
                &[],
                BuildOptions::force_rebuild(),
                TargetPlatform::StandaloneLinux64,
            )
            .unwrap();

        assert!(!report.success);
        assert_eq!(report.exit_code, Some(3));
        assert_eq!(report.message.as_deref(), Some("license check failed"));
    }
}

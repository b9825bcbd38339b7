//! Test environment builder for isolated itempack runs.
//!
//! Provides `TestEnv` - a temp workspace plus helpers to run the itempack
//! binary inside it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running an itempack CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if command succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("invalid JSON line {:?}: {}", l, e))
            })
            .collect()
    }
}

/// Isolated workspace for one test
pub struct TestEnv {
    /// Temporary workspace root
    pub root: TempDir,
    /// Path to the itempack binary
    bin: PathBuf,
}

impl TestEnv {
    /// Create a new TestEnvBuilder
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to the workspace root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Run itempack in this workspace
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run itempack in this workspace with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.root.path(), args, env_vars)
    }

    /// Run itempack from a specific directory with extra env vars
    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("NO_COLOR", "1")
            .env_remove("GITHUB_ACTIONS");

        for key in [
            "ITEMPACK_INPUT",
            "ITEMPACK_OUTPUT_DIR",
            "ITEMPACK_OUTPUT_FILE",
            "ITEMPACK_PLATFORM",
            "ITEMPACK_ENGINE",
            "ITEMPACK_VERBOSITY",
        ] {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute itempack");

        output_to_result(output)
    }

    /// Read a workspace file as bytes
    pub fn read(&self, relative: &str) -> Vec<u8> {
        std::fs::read(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Write a file into the workspace, creating parents
    pub fn write(&self, relative: &str, content: &[u8]) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    files: Vec<(String, Vec<u8>)>,
    config: Option<String>,
}

impl TestEnvBuilder {
    /// Create a new builder for an empty workspace
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            config: None,
        }
    }

    /// Place the default input model
    pub fn with_model(self, content: &[u8]) -> Self {
        self.with_file("model.fbx", content)
    }

    /// Place any file in the workspace
    pub fn with_file(mut self, relative: &str, content: &[u8]) -> Self {
        self.files.push((relative.to_string(), content.to_vec()));
        self
    }

    /// Write `itempack.toml`
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    /// Build the TestEnv
    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            root: TempDir::new().expect("Failed to create temp workspace"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_itempack")),
        };

        for (relative, content) in &self.files {
            env.write(relative, content);
        }
        if let Some(config) = &self.config {
            env.write("itempack.toml", config.as_bytes());
        }

        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

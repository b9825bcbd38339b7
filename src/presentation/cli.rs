//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --workspace, --config) are inherited by all subcommands
//! - Running without a subcommand converts with the configured defaults

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ColorMode, EngineKind};
use crate::domain::value_objects::TargetPlatform;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(value: ColorWhen) -> Self {
        match value {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

/// itempack - package a 3D model into a distributable item bundle
#[derive(Parser, Debug)]
#[command(name = "itempack")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'itempack' without arguments to convert with the configured defaults.")]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print failures
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Workspace root (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Config file (defaults to <workspace>/itempack.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Overrides for the conversion settings
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertArgs {
    /// Source model, relative to the workspace
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<String>,

    /// Output directory, relative to the workspace
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Final bundle file name
    #[arg(long, value_name = "NAME")]
    pub output_file: Option<String>,

    /// Platform to package for
    #[arg(short, long, value_enum)]
    pub platform: Option<TargetPlatform>,

    /// Packaging engine
    #[arg(short, long, value_enum)]
    pub engine: Option<EngineKind>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert the input model into a bundle (default)
    Convert(ConvertArgs),

    /// Remove intermediate artifacts left by an interrupted run
    Clean,

    /// Print the resolved pipeline paths
    Paths(ConvertArgs),
}

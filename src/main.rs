//! itempack CLI - package a 3D model into a distributable item bundle
//!
//! Usage: itempack [OPTIONS] [COMMAND]
//!
//! Commands:
//!   convert  Convert the input model into a bundle (default)
//!   clean    Remove intermediate artifacts left by an interrupted run
//!   paths    Print the resolved pipeline paths

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use itempack::error::{PipelineError, EXIT_PIPELINE_FAILURE};
use itempack::presentation::{Cli, Commands};

use commands::CommandContext;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            let code = exit_code_for(&err);
            if cli.json {
                let json = serde_json::json!({
                    "event": "error",
                    "kind": err.downcast_ref::<PipelineError>().map(|e| e.kind()),
                    "message": format!("{:#}", err),
                });
                println!("{}", json);
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    match &cli.command {
        None => {
            let ctx = CommandContext::load(cli, None)?;
            commands::cmd_convert(&ctx)
        }
        Some(Commands::Convert(args)) => {
            let ctx = CommandContext::load(cli, Some(args))?;
            commands::cmd_convert(&ctx)
        }
        Some(Commands::Clean) => {
            let ctx = CommandContext::load(cli, None)?;
            commands::cmd_clean(&ctx)
        }
        Some(Commands::Paths(args)) => {
            let ctx = CommandContext::load(cli, Some(args))?;
            commands::cmd_paths(&ctx)
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<PipelineError>()
        .map(PipelineError::exit_code)
        .unwrap_or(EXIT_PIPELINE_FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_errors_exit_with_two() {
        let err = anyhow::Error::new(PipelineError::Config {
            file: PathBuf::from("itempack.toml"),
            message: "expected a table".to_string(),
        });
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn other_errors_exit_with_one() {
        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), 1);
    }
}

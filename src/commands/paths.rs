//! Paths command handler

use anyhow::Result;

use itempack::domain::value_objects::PipelinePaths;
use itempack::presentation::output::{render_paths, OutputFormat};

use super::CommandContext;

/// Print where a conversion would read, stage and write
pub fn cmd_paths(ctx: &CommandContext) -> Result<u8> {
    let paths = PipelinePaths::resolve(&ctx.config.to_pipeline_config(&ctx.root));
    let rendered = render_paths(&paths, OutputFormat::from_json_flag(ctx.json));

    if ctx.json {
        println!("{}", rendered);
    } else {
        print!("{}", rendered);
    }
    Ok(0)
}

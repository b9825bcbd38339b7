//! Clean command handler
//!
//! Runs the cleanup sweep on its own to recover a workspace left dirty by an
//! interrupted conversion.

use anyhow::Result;

use itempack::config::Verbosity;
use itempack::error::EXIT_PIPELINE_FAILURE;
use itempack::presentation::factory;
use itempack::presentation::output::{render_cleanup, OutputFormat};

use super::CommandContext;

pub fn cmd_clean(ctx: &CommandContext) -> Result<u8> {
    let use_case = factory::create_clean_use_case(&ctx.config, &ctx.root);
    let events = factory::create_event_sink(
        ctx.json,
        ctx.config.output.verbosity,
        ctx.config.output.color,
    );

    let report = use_case.execute_with_events(events);

    let format = OutputFormat::from_json_flag(ctx.json);
    if ctx.json || ctx.config.output.verbosity != Verbosity::Quiet || !report.is_clean() {
        print!("{}", render_cleanup(&report, format, ctx.unicode()));
        if ctx.json {
            println!();
        }
    }

    Ok(if report.is_clean() {
        0
    } else {
        EXIT_PIPELINE_FAILURE
    })
}

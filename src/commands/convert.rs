//! Convert command handler

use anyhow::Result;

use itempack::presentation::factory;

use super::CommandContext;

/// Run one conversion; progress goes through the event sink
pub fn cmd_convert(ctx: &CommandContext) -> Result<u8> {
    let use_case = factory::create_convert_use_case(&ctx.config, &ctx.root);
    let events = factory::create_event_sink(
        ctx.json,
        ctx.config.output.verbosity,
        ctx.config.output.color,
    );

    let outcome = use_case.execute_with_events(events);
    Ok(outcome.exit_code())
}

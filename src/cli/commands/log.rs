use crate::cli::commands::Ctx;
use crate::core::log;
use crate::errors::AppResult;

pub fn handle(print: bool, ctx: &mut Ctx) -> AppResult<()> {
    if !print {
        return ctx.ui.info("Use --print to show the internal log.");
    }

    ctx.storage.ensure_schema()?;
    let entries = log::load(&ctx.storage)?;
    if entries.is_empty() {
        return ctx.ui.info("The internal log is empty.");
    }

    ctx.ui.line("Internal log:\n")?;
    for line in log::render(&entries, ctx.ui.color()) {
        ctx.ui.line(line)?;
    }
    Ok(())
}

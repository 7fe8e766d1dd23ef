use crate::cli::commands::Ctx;
use crate::core::backup;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

pub fn handle(file: &str, compress: bool, force: bool, ctx: &mut Ctx) -> AppResult<()> {
    ctx.storage.ensure_schema()?;
    let dest = expand_tilde(file);

    let target = backup::target_path(&dest, compress);
    let mut force = force;
    if target.exists() && !force {
        let prompt = format!(
            "The file '{}' already exists. Overwrite it?",
            target.display()
        );
        if !ctx.ask_confirmation(&prompt, false)? {
            ctx.ui.info("Backup cancelled.")?;
            return Ok(());
        }
        force = true;
    }

    let written = backup::backup(&ctx.storage, &dest, compress, force)?;
    ctx.ui
        .success(format!("Backup created: {}", written.display()))?;
    Ok(())
}

use crate::cli::commands::Ctx;
use crate::cli::parser::FsCmd;
use crate::core::fsops;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

pub fn handle(action: &FsCmd, ctx: &mut Ctx) -> AppResult<()> {
    match action {
        FsCmd::Copy { src, dest } => {
            let target = fsops::copy(&expand_tilde(src), &expand_tilde(dest))?;
            ctx.ui.success(format!("Copied {src} to {}", target.display()))?;
        }

        FsCmd::Move { src, dest } => {
            let target = fsops::move_to(&expand_tilde(src), &expand_tilde(dest))?;
            ctx.ui.success(format!("Moved {src} to {}", target.display()))?;
        }

        FsCmd::Delete { path, yes } => {
            if !ctx.ask_confirmation(&format!("Delete file {path}?"), *yes)? {
                ctx.ui.info("Deletion cancelled.")?;
                return Ok(());
            }
            fsops::delete(&expand_tilde(path))?;
            ctx.ui.success(format!("Deleted {path}"))?;
        }

        FsCmd::Rename { path, new_name } => {
            let target = fsops::rename(&expand_tilde(path), new_name)?;
            ctx.ui.success(format!("Renamed {path} to {}", target.display()))?;
        }

        FsCmd::Mkdir { path } => {
            fsops::create_dir(&expand_tilde(path))?;
            ctx.ui.success(format!("Directory {path} is ready"))?;
        }

        FsCmd::List { dir } => {
            for name in fsops::list(&expand_tilde(dir))? {
                ctx.ui.line(name)?;
            }
        }

        FsCmd::Zip { src, dest } => {
            let archive = fsops::zip(&expand_tilde(src), &expand_tilde(dest))?;
            ctx.ui.success(format!("Zipped {src} into {}", archive.display()))?;
        }
    }

    Ok(())
}

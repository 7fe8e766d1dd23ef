use crate::cli::commands::Ctx;
use crate::config::Config;
use crate::errors::AppResult;
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

/// Handle the `config` subcommand
pub fn handle(
    print_config: bool,
    edit_config: bool,
    editor: Option<&str>,
    ctx: &mut Ctx,
) -> AppResult<()> {
    let path = Config::config_file();

    if print_config {
        ctx.ui.info(format!("Current configuration ({}):", path.display()))?;
        let yaml = serde_yaml::to_string(ctx.cfg)?;
        ctx.ui.line(yaml.trim_end())?;
    }

    if edit_config {
        if !path.exists() {
            ctx.cfg.save_to(&path)?;
        }

        let fallback = default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        match Command::new(&requested).arg(&path).status() {
            Ok(s) if s.success() => {
                ctx.ui.success(format!(
                    "Configuration file edited successfully using '{requested}'"
                ))?;
            }
            _ => {
                ctx.ui.warning(format!(
                    "Editor '{requested}' not available, falling back to '{fallback}'"
                ))?;
                match Command::new(&fallback).arg(&path).status() {
                    Ok(s) if s.success() => {
                        ctx.ui.success(format!(
                            "Configuration file edited successfully using fallback '{fallback}'"
                        ))?;
                    }
                    _ => {
                        ctx.ui.warning(format!(
                            "Failed to edit configuration file using fallback '{fallback}'"
                        ))?;
                    }
                }
            }
        }
    }

    Ok(())
}

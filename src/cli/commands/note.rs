use crate::cli::commands::{Ctx, resolve_target};
use crate::cli::parser::NoteCmd;
use crate::core::NoteManager;
use crate::errors::{AppError, AppResult};
use crate::models::NoteUpdate;

pub fn handle(action: &NoteCmd, ctx: &mut Ctx) -> AppResult<()> {
    let notes = NoteManager::new(&ctx.storage)?;

    match action {
        NoteCmd::Add { name, content } => {
            let note = notes.add(name, content)?;
            ctx.ui.success(format!("Note #{} added: {}", note.id, note.name))?;
        }

        NoteCmd::Search { keyword } => {
            let found = notes.search(keyword)?;
            ctx.ui.records(&found)?;
        }

        NoteCmd::List { json } => {
            let all = notes.list()?;
            if *json {
                ctx.ui.json(&all)?;
            } else {
                ctx.ui.records(&all)?;
            }
        }

        NoteCmd::Show { target } => {
            let id = resolve_target(target, |k| notes.search(k))?;
            let note = notes.get(id)?;
            ctx.ui.panel(&note.name, &note.content)?;
            ctx.ui.line(format!("#{} · {}", note.id, note.modified_at))?;
        }

        NoteCmd::Update {
            target,
            name,
            content,
        } => {
            let patch = NoteUpdate {
                name: name.clone(),
                content: content.clone(),
            };
            if patch.is_empty() {
                return Err(AppError::Validation(
                    "nothing to update: pass --name and/or --content".into(),
                ));
            }
            let id = resolve_target(target, |k| notes.search(k))?;
            let before = notes.get(id)?;
            let after = notes.update(id, patch)?;
            ctx.ui.changes(&before, &after)?;
            ctx.ui.success(format!("Note #{id} updated"))?;
        }

        NoteCmd::Delete { target, yes } => {
            let id = resolve_target(target, |k| notes.search(k))?;
            let note = notes.get(id)?;
            let prompt = format!("Delete note #{id} '{}'?", note.name);
            if !ctx.ask_confirmation(&prompt, *yes)? {
                ctx.ui.info("Deletion cancelled.")?;
                return Ok(());
            }
            notes.delete(id)?;
            ctx.ui.success(format!("Note #{id} deleted"))?;
        }
    }

    Ok(())
}

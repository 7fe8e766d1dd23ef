use crate::cli::commands::{Ctx, resolve_target};
use crate::cli::parser::TodoCmd;
use crate::core::ToDoManager;
use crate::errors::{AppError, AppResult};
use crate::models::ToDoUpdate;

pub fn handle(action: &TodoCmd, ctx: &mut Ctx) -> AppResult<()> {
    let todos = ToDoManager::new(&ctx.storage)?;

    match action {
        TodoCmd::Add { content, deadline } => {
            let todo = todos.add(content, deadline.as_deref())?;
            ctx.ui.success(format!("To-do #{} added", todo.id))?;
        }

        TodoCmd::Search { keyword } => {
            let found = todos.search(keyword)?;
            ctx.ui.records(&found)?;
        }

        TodoCmd::List { completed, json } => match (*completed, *json) {
            (true, true) => ctx.ui.json(&todos.list_completed()?)?,
            (true, false) => ctx.ui.records(&todos.list_completed()?)?,
            (false, true) => ctx.ui.json(&todos.list()?)?,
            (false, false) => ctx.ui.records(&todos.list()?)?,
        },

        TodoCmd::Show { target } => {
            let id = resolve_target(target, |k| todos.search(k))?;
            let todo = todos.get(id)?;
            ctx.ui.records(&[todo])?;
        }

        TodoCmd::Update {
            target,
            content,
            deadline,
            clear_deadline,
        } => {
            let patch = ToDoUpdate {
                content: content.clone(),
                deadline: if *clear_deadline {
                    Some(None)
                } else {
                    deadline.clone().map(Some)
                },
            };
            if patch.is_empty() {
                return Err(AppError::Validation(
                    "nothing to update: pass --content, --deadline or --clear-deadline".into(),
                ));
            }
            let id = resolve_target(target, |k| todos.search(k))?;
            let before = todos.get(id)?;
            let after = todos.update(id, patch)?;
            ctx.ui.changes(&before, &after)?;
            ctx.ui.success(format!("To-do #{id} updated"))?;
        }

        TodoCmd::Delete { target, yes } => {
            let id = resolve_target(target, |k| todos.search(k))?;
            let todo = todos.get(id)?;
            let prompt = format!("Delete to-do #{id} '{}' without archiving?", todo.content);
            if !ctx.ask_confirmation(&prompt, *yes)? {
                ctx.ui.info("Deletion cancelled.")?;
                return Ok(());
            }
            todos.delete(id)?;
            ctx.ui.success(format!("To-do #{id} deleted"))?;
        }

        TodoCmd::Done { target } => {
            let id = resolve_target(target, |k| todos.search(k))?;
            let done = todos.complete(id)?;
            ctx.ui.success(format!(
                "To-do #{id} completed at {}: {}",
                done.completed_at, done.content
            ))?;
        }
    }

    Ok(())
}

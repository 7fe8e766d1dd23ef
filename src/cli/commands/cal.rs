use crate::cli::commands::{Ctx, resolve_target};
use crate::cli::parser::CalCmd;
use crate::core::CalendarManager;
use crate::errors::{AppError, AppResult};
use crate::models::AppointmentUpdate;

/// `--flag value` sets, `--clear-flag` clears, neither keeps.
fn optional_patch(value: &Option<String>, clear: bool) -> Option<Option<String>> {
    if clear {
        Some(None)
    } else {
        value.clone().map(Some)
    }
}

pub fn handle(action: &CalCmd, ctx: &mut Ctx) -> AppResult<()> {
    let cal = CalendarManager::new(&ctx.storage)?;

    match action {
        CalCmd::Add {
            title,
            date,
            time,
            description,
        } => {
            let a = cal.add(title, date, time.as_deref(), description.as_deref())?;
            let when = a.time.as_deref().unwrap_or("all day");
            ctx.ui.success(format!(
                "Appointment #{} added: {} on {} ({when})",
                a.id, a.title, a.date
            ))?;
        }

        CalCmd::List { date, json } => {
            let list = cal.list(date.as_deref())?;
            if *json {
                ctx.ui.json(&list)?;
            } else {
                ctx.ui.records(&list)?;
            }
        }

        CalCmd::Show { target } => {
            let id = resolve_target(target, |k| cal.search(k))?;
            let a = cal.get(id)?;
            let when = match &a.time {
                Some(t) => format!("{} {t}", a.date),
                None => format!("{} (All Day)", a.date),
            };
            let body = match &a.description {
                Some(d) => format!("{when}\n\n{d}"),
                None => format!("{when}\n\nNo description"),
            };
            ctx.ui.panel(&a.title, &body)?;
        }

        CalCmd::Update {
            target,
            title,
            date,
            time,
            all_day,
            description,
            clear_description,
        } => {
            let patch = AppointmentUpdate {
                title: title.clone(),
                date: date.clone(),
                time: optional_patch(time, *all_day),
                description: optional_patch(description, *clear_description),
            };
            if patch.is_empty() {
                return Err(AppError::Validation(
                    "nothing to update: pass at least one field to change".into(),
                ));
            }
            let id = resolve_target(target, |k| cal.search(k))?;
            let before = cal.get(id)?;
            let after = cal.update(id, patch)?;
            ctx.ui.changes(&before, &after)?;
            ctx.ui.success(format!("Appointment #{id} updated"))?;
        }

        CalCmd::Delete { target, yes } => {
            let id = resolve_target(target, |k| cal.search(k))?;
            let a = cal.get(id)?;
            let prompt = format!("Delete appointment #{id} '{}' on {}?", a.title, a.date);
            if !ctx.ask_confirmation(&prompt, *yes)? {
                ctx.ui.info("Deletion cancelled.")?;
                return Ok(());
            }
            cal.delete(id)?;
            ctx.ui.success(format!("Appointment #{id} deleted"))?;
        }
    }

    Ok(())
}

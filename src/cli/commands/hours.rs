use crate::cli::commands::{Ctx, resolve_target};
use crate::cli::parser::HoursCmd;
use crate::core::HourTracker;
use crate::errors::{AppError, AppResult};
use crate::models::HourEntryUpdate;
use crate::utils::colors::{RESET, color_for_balance};

pub fn handle(action: &HoursCmd, ctx: &mut Ctx) -> AppResult<()> {
    let tracker = HourTracker::new(&ctx.storage)?;

    match action {
        HoursCmd::Total { hours } => {
            let balance = tracker.set_total(*hours)?;
            ctx.ui.success(format!(
                "Total set to {} hours ({} remaining)",
                balance.total_hours, balance.remaining_hours
            ))?;
        }

        HoursCmd::Log { job, hours, date } => {
            let entry = tracker.log_hours(job, *hours, date.as_deref())?;
            ctx.ui.success(format!(
                "Logged {}h for '{}' on {} (#{})",
                entry.hours_worked, entry.job_name, entry.date, entry.id
            ))?;
            print_remaining(ctx, tracker.remaining()?)?;
        }

        HoursCmd::List { date, json } => {
            let entries = tracker.list(date.as_deref())?;
            if *json {
                ctx.ui.json(&entries)?;
            } else {
                ctx.ui.records(&entries)?;
                if let Some(balance) = tracker.balance()? {
                    ctx.ui.line(format!(
                        "Total: {}  Logged: {}",
                        balance.total_hours,
                        balance.total_hours - balance.remaining_hours
                    ))?;
                    print_remaining(ctx, balance.remaining_hours)?;
                }
            }
        }

        HoursCmd::Update {
            target,
            job,
            hours,
            date,
        } => {
            let patch = HourEntryUpdate {
                job_name: job.clone(),
                hours: *hours,
                date: date.clone(),
            };
            if patch.is_empty() {
                return Err(AppError::Validation(
                    "nothing to update: pass --job, --hours and/or --date".into(),
                ));
            }
            let id = resolve_target(target, |k| tracker.search(k))?;
            let before = tracker.get(id)?;
            let after = tracker.update_entry(id, patch)?;
            ctx.ui.changes(&before, &after)?;
            print_remaining(ctx, tracker.remaining()?)?;
        }

        HoursCmd::Delete { target, yes } => {
            let id = resolve_target(target, |k| tracker.search(k))?;
            let entry = tracker.get(id)?;
            let prompt = format!(
                "Delete {}h for '{}' on {}?",
                entry.hours_worked, entry.job_name, entry.date
            );
            if !ctx.ask_confirmation(&prompt, *yes)? {
                ctx.ui.info("Deletion cancelled.")?;
                return Ok(());
            }
            tracker.delete_entry(id)?;
            ctx.ui.success(format!("Hour entry #{id} deleted"))?;
            if let Some(balance) = tracker.balance()? {
                print_remaining(ctx, balance.remaining_hours)?;
            }
        }

        HoursCmd::Remaining => {
            print_remaining(ctx, tracker.remaining()?)?;
        }
    }

    Ok(())
}

fn print_remaining(ctx: &mut Ctx, remaining: f64) -> AppResult<()> {
    if ctx.ui.color() {
        let color = color_for_balance(remaining);
        ctx.ui.line(format!("Remaining hours: {color}{remaining}{RESET}"))
    } else {
        ctx.ui.line(format!("Remaining hours: {remaining}"))
    }
}

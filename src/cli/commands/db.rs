use crate::cli::commands::Ctx;
use crate::core::inspect::Inspector;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, RESET, YELLOW};

pub struct DbFlags<'a> {
    pub tables: bool,
    pub schema: Option<&'a str>,
    pub summary: bool,
    pub info: bool,
    pub check: bool,
    pub vacuum: bool,
}

pub fn handle(flags: DbFlags, ctx: &mut Ctx) -> AppResult<()> {
    let inspector = Inspector::new(&ctx.storage)?;
    let fmt = ctx.ui.formatter();
    let mut did_something = false;

    if flags.tables {
        did_something = true;
        let rows: Vec<Vec<String>> = inspector
            .list_tables()?
            .into_iter()
            .map(|t| vec![t])
            .collect();
        ctx.ui.line(fmt.grid(&rows, &["Table"]))?;
    }

    if let Some(table) = flags.schema {
        did_something = true;
        let rows: Vec<Vec<String>> = inspector
            .table_info(table)?
            .into_iter()
            .map(|c| {
                vec![
                    c.cid.to_string(),
                    c.name,
                    c.decl_type,
                    if c.not_null { "yes" } else { "" }.to_string(),
                    c.default.unwrap_or_default(),
                    if c.primary_key { "yes" } else { "" }.to_string(),
                ]
            })
            .collect();
        ctx.ui.line(fmt.grid(
            &rows,
            &["#", "Column", "Type", "Not Null", "Default", "PK"],
        ))?;
    }

    if flags.summary {
        did_something = true;
        let rows: Vec<Vec<String>> = inspector
            .summary()?
            .into_iter()
            .map(|(t, n)| vec![t, n.to_string()])
            .collect();
        ctx.ui.line(fmt.grid(&rows, &["Table", "Rows"]))?;
    }

    if flags.info {
        did_something = true;
        let info = inspector.info()?;
        let mb = info.size_bytes as f64 / (1024.0 * 1024.0);
        if ctx.ui.color() {
            ctx.ui.line(format!(
                "{CYAN}• File:{RESET} {YELLOW}{}{RESET}",
                info.path.display()
            ))?;
            ctx.ui.line(format!("{CYAN}• Size:{RESET} {mb:.2} MB"))?;
            ctx.ui.line(format!("{CYAN}• Tables:{RESET} {}", info.tables))?;
            ctx.ui.line(format!("{CYAN}• Rows:{RESET} {}", info.total_rows))?;
        } else {
            ctx.ui.line(format!("• File: {}", info.path.display()))?;
            ctx.ui.line(format!("• Size: {mb:.2} MB"))?;
            ctx.ui.line(format!("• Tables: {}", info.tables))?;
            ctx.ui.line(format!("• Rows: {}", info.total_rows))?;
        }
    }

    if flags.check {
        did_something = true;
        ctx.ui.info("Running integrity check…")?;
        match inspector.integrity_check()? {
            None => ctx.ui.success("Integrity check passed.")?,
            Some(problems) => ctx.ui.warning(format!("Integrity check failed: {problems}"))?,
        }
    }

    if flags.vacuum {
        did_something = true;
        ctx.ui.info("Running VACUUM…")?;
        inspector.vacuum()?;
        ctx.ui.success("Vacuum completed.")?;
    }

    if !did_something {
        ctx.ui
            .info("Nothing to do: pass --tables, --schema, --summary, --info, --check or --vacuum")?;
    }

    Ok(())
}

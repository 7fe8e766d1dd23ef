use crate::db::{Storage, log};
use crate::errors::AppResult;
use crate::models::LogEntry;
use crate::ui::formatter::strip_ansi;
use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

const OP_TARGET_MAX: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "done" => Colour::Cyan,
        "total" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn load(storage: &Storage) -> AppResult<Vec<LogEntry>> {
    let pool = storage.open()?;
    log::load_entries(&pool.conn)
}

/// One aligned line per entry: `id: date | op (target) => message`.
/// The `op (target)` column is cut at 60 visible characters.
pub fn render(entries: &[LogEntry], color: bool) -> Vec<String> {
    let rows: Vec<(String, String, String)> = entries
        .iter()
        .map(|e| {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or_else(|_| e.date.clone());
            let visible = if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            };
            let visible = if visible.chars().count() > OP_TARGET_MAX {
                let mut s: String = visible.chars().take(OP_TARGET_MAX - 3).collect();
                s.push_str("...");
                s
            } else {
                visible
            };
            (e.id.to_string(), date, visible)
        })
        .collect();

    let id_w = rows.iter().map(|r| r.0.len()).max().unwrap_or(0);
    let date_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(0);
    let op_w = rows.iter().map(|r| r.2.width()).max().unwrap_or(0);

    rows.into_iter()
        .zip(entries)
        .map(|((id, date, op_target), e)| {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op_target).width()));
            // Only the operation word is coloured.
            let shown = match (color, op_target.split_once(' ')) {
                (false, _) => op_target,
                (true, Some((op, rest))) => {
                    format!("{} {rest}", color_for_operation(&e.operation).paint(op))
                }
                (true, None) => color_for_operation(&e.operation)
                    .paint(op_target.as_str())
                    .to_string(),
            };
            format!(
                "{id:>id_w$}: {date:<date_w$} | {shown}{padding} => {}",
                e.message
            )
        })
        .collect()
}

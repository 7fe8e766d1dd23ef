//! Box-drawn grids, before/after comparisons and titled panels.
//!
//! Rendering is pure: every method returns a `String` and never fails.
//! Widths are measured on the visible text, so cells may carry ANSI colour.

use ansi_term::{Colour, Style};
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[A-Za-z]").ok());

/// Text wrap width used by `panel`.
pub const PANEL_WIDTH: usize = 72;

pub fn strip_ansi(s: &str) -> String {
    match ANSI_RE.as_ref() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// Display width in terminal columns, ignoring escape sequences.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

fn cell_lines<S: AsRef<str>>(row: &[S], c: usize) -> Vec<String> {
    row.get(c)
        .map(|s| s.as_ref().lines().map(str::to_string).collect())
        .unwrap_or_default()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(s));
    format!("{s}{}", " ".repeat(fill))
}

#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    color: bool,
}

impl Formatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    fn header(&self, s: &str) -> String {
        if self.color {
            Style::new().bold().fg(Colour::Purple).paint(s).to_string()
        } else {
            s.to_string()
        }
    }

    fn border(&self, s: &str) -> String {
        if self.color {
            Colour::Green.paint(s).to_string()
        } else {
            s.to_string()
        }
    }

    /// Bordered table. Rows shorter than the header are padded with empty
    /// cells; embedded newlines split a cell over several lines.
    pub fn grid<S: AsRef<str>>(&self, rows: &[Vec<S>], headers: &[&str]) -> String {
        let cols = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);
        if cols == 0 {
            return String::new();
        }

        let mut widths = vec![0usize; cols];
        for (c, w) in widths.iter_mut().enumerate() {
            *w = headers.get(c).map_or(0, |h| visible_width(h));
            for row in rows {
                for line in cell_lines(row, c) {
                    *w = (*w).max(visible_width(&line));
                }
            }
        }

        let rule = |left: &str, mid: &str, right: &str| -> String {
            let inner = widths
                .iter()
                .map(|w| "─".repeat(w + 2))
                .collect::<Vec<_>>()
                .join(mid);
            format!("{left}{inner}{right}")
        };
        let line = |cells: &[String]| -> String {
            let body = widths
                .iter()
                .enumerate()
                .map(|(c, w)| pad(cells.get(c).map_or("", String::as_str), *w))
                .collect::<Vec<_>>()
                .join(" │ ");
            format!("│ {body} │")
        };

        let mut out = vec![rule("┌", "┬", "┐")];
        let header_cells: Vec<String> = (0..cols)
            .map(|c| {
                let h = headers.get(c).copied().unwrap_or("");
                pad(&self.header(h), widths[c])
            })
            .collect();
        out.push(line(&header_cells));
        out.push(rule("├", "┼", "┤"));

        for row in rows {
            let split: Vec<Vec<String>> = (0..cols).map(|c| cell_lines(row, c)).collect();
            let height = split.iter().map(Vec::len).max().unwrap_or(0).max(1);
            for i in 0..height {
                let cells: Vec<String> = split
                    .iter()
                    .map(|lines| lines.get(i).cloned().unwrap_or_default())
                    .collect();
                out.push(line(&cells));
            }
        }

        out.push(rule("└", "┴", "┘"));
        out.join("\n")
    }

    /// Pair rows by position (truncating to the shorter side) and show
    /// `old → new` for every cell that changed.
    pub fn comparison<S: AsRef<str>>(
        &self,
        old_rows: &[Vec<S>],
        new_rows: &[Vec<S>],
        headers: &[&str],
    ) -> String {
        let merged: Vec<Vec<String>> = old_rows
            .iter()
            .zip(new_rows)
            .map(|(old, new)| {
                let len = old.len().max(new.len());
                (0..len)
                    .map(|c| {
                        let o = old.get(c).map_or("", |s| s.as_ref());
                        let n = new.get(c).map_or("", |s| s.as_ref());
                        if o == n {
                            n.to_string()
                        } else if self.color {
                            format!("{} → {}", Colour::Red.paint(o), Colour::Green.paint(n))
                        } else {
                            format!("{o} → {n}")
                        }
                    })
                    .collect()
            })
            .collect();
        self.grid(&merged, headers)
    }

    /// Rounded box with `title` set into the top border and `content`
    /// wrapped to `PANEL_WIDTH`.
    pub fn panel(&self, title: &str, content: &str) -> String {
        let lines: Vec<String> = if content.is_empty() {
            Vec::new()
        } else {
            content
                .lines()
                .flat_map(|l| {
                    if l.is_empty() {
                        vec![String::new()]
                    } else {
                        textwrap::wrap(l, PANEL_WIDTH)
                            .into_iter()
                            .map(|c| c.into_owned())
                            .collect()
                    }
                })
                .collect()
        };

        let title_w = visible_width(title);
        let inner = lines
            .iter()
            .map(|l| visible_width(l))
            .max()
            .unwrap_or(0)
            .max(title_w + 2);

        let top = if title.is_empty() {
            self.border(&format!("╭{}╮", "─".repeat(inner + 2)))
        } else {
            let fill = "─".repeat(inner - title_w - 1);
            let title = if self.color {
                Style::new().bold().paint(title).to_string()
            } else {
                title.to_string()
            };
            format!(
                "{}{title}{}",
                self.border("╭─ "),
                self.border(&format!(" {fill}╮"))
            )
        };

        let mut out = vec![top];
        for l in &lines {
            out.push(format!(
                "{} {} {}",
                self.border("│"),
                pad(l, inner),
                self.border("│")
            ));
        }
        out.push(self.border(&format!("╰{}╯", "─".repeat(inner + 2))));
        out.join("\n")
    }
}

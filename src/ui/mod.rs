//! Terminal output. Handlers write through `Ui` so tests can capture it.

pub mod formatter;
pub mod messages;

use crate::errors::AppResult;
use crate::models::Record;
use formatter::Formatter;
use serde::Serialize;
use std::fmt;
use std::io::Write;

pub struct Ui<'a> {
    out: &'a mut dyn Write,
    fmt: Formatter,
}

impl<'a> Ui<'a> {
    pub fn new(out: &'a mut dyn Write, color: bool) -> Self {
        Self {
            out,
            fmt: Formatter::new(color),
        }
    }

    pub fn color(&self) -> bool {
        self.fmt.color()
    }

    pub fn formatter(&self) -> Formatter {
        self.fmt
    }

    pub fn line<T: fmt::Display>(&mut self, msg: T) -> AppResult<()> {
        writeln!(self.out, "{msg}")?;
        Ok(())
    }

    pub fn info<T: fmt::Display>(&mut self, msg: T) -> AppResult<()> {
        Ok(messages::info(self.out, self.fmt.color(), msg)?)
    }

    pub fn success<T: fmt::Display>(&mut self, msg: T) -> AppResult<()> {
        Ok(messages::success(self.out, self.fmt.color(), msg)?)
    }

    pub fn warning<T: fmt::Display>(&mut self, msg: T) -> AppResult<()> {
        Ok(messages::warning(self.out, self.fmt.color(), msg)?)
    }

    /// Grid of records, or a short notice when there are none.
    pub fn records<T: Record>(&mut self, records: &[T]) -> AppResult<()> {
        if records.is_empty() {
            return self.info(format!("No {} records found.", T::ENTITY));
        }
        let rows: Vec<Vec<String>> = records.iter().map(|r| r.cells(self.color())).collect();
        let grid = self.fmt.grid(&rows, T::headers());
        self.line(grid)
    }

    /// Before/after grid for a single updated record.
    pub fn changes<T: Record>(&mut self, before: &T, after: &T) -> AppResult<()> {
        let old = vec![before.cells(false)];
        let new = vec![after.cells(false)];
        let table = self.fmt.comparison(&old, &new, T::headers());
        self.line(table)
    }

    pub fn panel(&mut self, title: &str, content: &str) -> AppResult<()> {
        let panel = self.fmt.panel(title, content);
        self.line(panel)
    }

    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> AppResult<()> {
        serde_json::to_writer_pretty(&mut *self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

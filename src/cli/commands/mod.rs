//! One handler per top-level command. Handlers read from `Ctx::input`
//! and write everything through `Ctx::ui`.

pub mod backup;
pub mod cal;
pub mod config;
pub mod db;
pub mod fs;
pub mod hours;
pub mod init;
pub mod log;
pub mod note;
pub mod todo;

use crate::cli::parser::Target;
use crate::config::Config;
use crate::core::select;
use crate::db::Storage;
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::ui::Ui;
use std::io::BufRead;

pub struct Ctx<'a> {
    pub cfg: &'a Config,
    pub storage: Storage,
    pub ui: Ui<'a>,
    pub input: &'a mut dyn BufRead,
    pub test: bool,
}

impl Ctx<'_> {
    /// Ask a yes/no question. Anything but `y`/`yes` is a no.
    pub fn ask_confirmation(&mut self, prompt: &str, assume_yes: bool) -> AppResult<bool> {
        if assume_yes {
            return Ok(true);
        }
        self.ui.warning(format!("{prompt} [y/N]: "))?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        let answer = answer.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// Resolve a CLI target to an id. `search` runs only for keyword targets.
pub fn resolve_target<T, F>(target: &Target, search: F) -> AppResult<i64>
where
    T: Record,
    F: FnOnce(&str) -> AppResult<Vec<T>>,
{
    match (&target.keyword, target.id) {
        (Some(keyword), _) => {
            let matches = search(keyword)?;
            select::resolve(&matches, target.pick)
        }
        (None, Some(id)) => Ok(id),
        (None, None) => Err(AppError::InvalidSelection(
            "give a record id or --match <KEYWORD>".into(),
        )),
    }
}

//! kpr library root.
//! Exposes the CLI parser, the high-level `run()` function and the record managers.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logger;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands::{self, Ctx};
use cli::parser::{Cli, Commands};
use config::Config;
use db::Storage;
use errors::AppResult;
use std::io::{self, BufRead, IsTerminal, Write};
use ui::Ui;

/// Central command dispatcher
pub fn dispatch(
    cli: &Cli,
    cfg: &Config,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> AppResult<()> {
    let color = cfg.color && !cli.no_color;
    let mut ctx = Ctx {
        cfg,
        storage: Storage::new(cfg.database_path()),
        ui: Ui::new(out, color),
        input,
        test: cli.test,
    };

    match &cli.command {
        Commands::Init => commands::init::handle(cli.db.as_deref(), &mut ctx),
        Commands::Config {
            print_config,
            edit_config,
            editor,
        } => commands::config::handle(*print_config, *edit_config, editor.as_deref(), &mut ctx),
        Commands::Db {
            tables,
            schema,
            summary,
            info,
            check,
            vacuum,
        } => commands::db::handle(
            commands::db::DbFlags {
                tables: *tables,
                schema: schema.as_deref(),
                summary: *summary,
                info: *info,
                check: *check,
                vacuum: *vacuum,
            },
            &mut ctx,
        ),
        Commands::Log { print } => commands::log::handle(*print, &mut ctx),
        Commands::Backup {
            file,
            compress,
            force,
        } => commands::backup::handle(file, *compress, *force, &mut ctx),
        Commands::Note { action } => commands::note::handle(action, &mut ctx),
        Commands::Todo { action } => commands::todo::handle(action, &mut ctx),
        Commands::Hours { action } => commands::hours::handle(action, &mut ctx),
        Commands::Cal { action } => commands::cal::handle(action, &mut ctx),
        Commands::Fs { action } => commands::fs::handle(action, &mut ctx),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(custom_db)
            .to_string_lossy()
            .into_owned();
    }
    if !io::stdout().is_terminal() {
        cfg.color = false;
    }

    // Test runs leave no log files behind.
    if !cli.test
        && let Err(e) = logger::install(&cfg.log_settings())
    {
        eprintln!("Warning: logging disabled: {e}");
    }
    tracing::debug!(db = %cfg.database, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    dispatch(&cli, &cfg, &mut out, &mut input)
}

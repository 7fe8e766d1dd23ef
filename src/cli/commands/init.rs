use crate::cli::commands::Ctx;
use crate::config::Config;
use crate::core::audit;
use crate::db::Storage;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with every table
///  - any pending legacy migration
pub fn handle(db_override: Option<&str>, ctx: &mut Ctx) -> AppResult<()> {
    let cfg = Config::init_all(db_override, ctx.test)?;
    let db_path = cfg.database_path();

    ctx.ui.info("Initializing kpr…")?;
    if !ctx.test {
        ctx.ui
            .line(format!("Config file : {}", Config::config_file().display()))?;
    }
    ctx.ui.line(format!("Database    : {}", db_path.display()))?;

    let storage = Storage::new(&db_path);
    storage.ensure_schema()?;

    let pool = storage.open()?;
    audit(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path.display()),
    );

    ctx.ui
        .success(format!("Database initialized at {}", db_path.display()))?;
    Ok(())
}

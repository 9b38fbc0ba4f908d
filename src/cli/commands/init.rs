use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::store::EntryStore;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli, config_path: &Path) -> AppResult<()> {
    let cfg = Config::init_all(config_path, cli.db.as_deref(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing timesquish…");
    println!("📄 Config file : {}", config_path.display());
    println!("🗄️  Database   : {}", &db_path);

    let store = EntryStore::open(&db_path)?;
    success(format!("Database initialized at {}", &db_path));

    if let Err(e) = log::ttlog(
        store.conn(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 timesquish initialization completed!");
    Ok(())
}

pub mod add;
pub mod clock;
pub mod config;
pub mod del;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod squish;
pub mod submit;
pub mod summary;

use crate::config::Config;
use crate::core::prefs::parse_rate;
use crate::db::store::EntryStore;
use crate::errors::AppResult;

/// Open the configured entry store.
pub(crate) fn open_store(cfg: &Config) -> AppResult<EntryStore> {
    EntryStore::open(&cfg.database)
}

/// `--rate` if given, otherwise the configured default.
pub(crate) fn resolve_rate(rate: Option<&String>, cfg: &Config) -> AppResult<f64> {
    match rate {
        Some(r) => parse_rate(r),
        None => Ok(cfg.hourly_rate),
    }
}

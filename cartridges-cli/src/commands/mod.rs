pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod list;
pub(crate) mod manage;
pub(crate) mod show;

use cartridges_catalog::Catalog;
use cartridges_lib::AppDirs;

use crate::CliError;

/// Open the catalog under the data directory, creating it on first use.
pub(crate) fn open_catalog(dirs: &AppDirs) -> Result<Catalog, CliError> {
    let root = dirs.catalog_dir();
    log::debug!("Opening catalog at {}", root.display());
    Ok(Catalog::open(&root)?)
}

/// Current time as a unix timestamp.
pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

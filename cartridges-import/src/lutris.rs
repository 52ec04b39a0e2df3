//! One full Lutris import cycle.

use cartridges_catalog::Catalog;
use cartridges_lib::{AppDirs, ImportConfig};

use crate::error::ImportError;
use crate::extract;
use crate::locate::{self, Resolution};
use crate::progress::ImportProgress;
use crate::reconcile::{self, ImportStats};
use crate::sink::CatalogImporter;
use crate::snapshot::Snapshot;

/// Launcher name, used for the scratch directory and fallback locations.
pub const LAUNCHER: &str = "lutris";

/// What an import cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Lutris is not installed, or has no database yet. Nothing was changed.
    Unavailable,
    Imported(ImportStats),
}

/// Result of [`import_lutris`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCycle {
    pub outcome: ImportOutcome,
    /// The config after location discovery. Persist it if it differs from
    /// the one passed in.
    pub config: ImportConfig,
}

/// Import installed Lutris games into `catalog`.
///
/// Runs synchronously to completion. The scratch copy under
/// `<cache>/cartridges/lutris/` is removed on every path, and a failure to
/// read the Lutris database leaves the catalog untouched.
pub fn import_lutris(
    config: &ImportConfig,
    dirs: &AppDirs,
    catalog: &mut Catalog,
    now: i64,
    progress: &dyn ImportProgress,
) -> Result<ImportCycle, ImportError> {
    let (locations, config) = match locate::resolve_locations(config, dirs) {
        Resolution::Resolved { locations, config } => (locations, config),
        Resolution::Unavailable => {
            return Ok(ImportCycle {
                outcome: ImportOutcome::Unavailable,
                config: config.clone(),
            });
        }
    };

    progress.on_phase(&format!(
        "Importing from Lutris ({})",
        locations.database_dir.display()
    ));

    let Some(snapshot) = Snapshot::take(&locations.database_dir, &dirs.scratch_dir(LAUNCHER))?
    else {
        return Ok(ImportCycle {
            outcome: ImportOutcome::Unavailable,
            config,
        });
    };

    let extraction = extract::extract(&snapshot, config.include_steam);
    snapshot.cleanup();
    let extraction = extraction?;

    let plan = reconcile::reconcile(&extraction, &*catalog, now, &locations.cache_dir);

    let mut sink = CatalogImporter::new(catalog, progress);
    let mut stats = reconcile::apply_plan(plan, &mut sink)?;
    stats.covers = sink.covers();
    if !sink.is_done() {
        log::warn!(
            "Import finished with {} of {} game(s) unanswered",
            sink.queue(),
            sink.total_queue()
        );
    }

    progress.on_complete(&format!(
        "Lutris: {} new, {} already imported, {} removed, {} filtered",
        stats.created, stats.existing, stats.removed, stats.filtered
    ));

    Ok(ImportCycle {
        outcome: ImportOutcome::Imported(stats),
        config,
    })
}

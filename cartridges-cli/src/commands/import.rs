use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cartridges_catalog::Catalog;
use cartridges_import::{ImportOutcome, ImportStats, import_lutris};
use cartridges_lib::{AppDirs, ImportConfig, Settings};

use super::{now, open_catalog};
use crate::CliError;
use crate::progress::ImportBar;

/// Run one Lutris import cycle.
///
/// Removed games are left in place. They stay removed and are skipped.
pub(crate) fn run_import(dirs: &AppDirs, quiet: bool) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    let mut catalog = open_catalog(dirs)?;

    match import_into(&mut catalog, &mut settings, dirs, quiet)? {
        ImportOutcome::Unavailable => {
            log::warn!("Lutris is not installed, or has no game database yet.");
        }
        ImportOutcome::Imported(stats) => print_summary(&stats),
    }
    Ok(())
}

/// Import into an open catalog and persist any newly discovered Lutris
/// location.
fn import_into(
    catalog: &mut Catalog,
    settings: &mut Settings,
    dirs: &AppDirs,
    quiet: bool,
) -> Result<ImportOutcome, CliError> {
    let config = ImportConfig::from_settings(&*settings);
    let bar = ImportBar::new(quiet);
    let result = import_lutris(&config, dirs, catalog, now(), &bar);
    bar.clear();
    let cycle = result?;

    if cycle.config != config {
        cycle.config.store(&mut *settings);
        settings.save()?;
        log::info!(
            "Using Lutris data at {}",
            cycle
                .config
                .db_location
                .if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(cycle.outcome)
}

fn print_summary(stats: &ImportStats) {
    log::info!("");
    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} new game(s) imported",
        stats.created.if_supports_color(Stdout, |t| t.green()),
    );
    if stats.covers > 0 {
        log::info!("  {} cover(s) copied", stats.covers);
    }
    if stats.existing > 0 {
        log::info!("  {} already in library", stats.existing);
    }
    if stats.removed > 0 {
        log::info!(
            "  {} removed by you, left out",
            stats.removed.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if stats.filtered > 0 {
        log::info!(
            "  {} Steam game(s) skipped (set import-secondary-runner to include them)",
            stats.filtered.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if stats.duplicates > 0 {
        log::info!("  {} duplicate row(s) ignored", stats.duplicates);
    }
    if stats.malformed > 0 {
        log::warn!(
            "  {} unreadable row(s) in the Lutris database",
            stats.malformed.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
}

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cartridges_catalog::{CatalogError, GameId, last_played_label, time_label};
use cartridges_lib::AppDirs;

use super::{now, open_catalog};
use crate::CliError;

/// Print everything the catalog knows about one game.
pub(crate) fn run_show(dirs: &AppDirs, id: &str) -> Result<(), CliError> {
    let catalog = open_catalog(dirs)?;
    let id = GameId::new(id);
    let game = catalog
        .get(&id)
        .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
    let now = now();

    log::info!("{}", game.name.if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Id:          {}", game.game_id);
    log::info!("  Source:      {}", game.source);
    log::info!("  Added:       {}", time_label(game.added, now));
    log::info!("  Last played: {}", last_played_label(game.last_played, now));
    log::info!("  Command:     {}", game.executable.join(" "));
    match &game.cover_path {
        Some(cover) => log::info!(
            "  Cover:       {}",
            cover.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::info!(
            "  Cover:       {}",
            "none".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    if game.hidden {
        log::info!("  {}", "Hidden".if_supports_color(Stdout, |t| t.yellow()));
    }
    if game.removed {
        log::info!(
            "  {} (restore with 'cartridges undo-remove {}')",
            "Removed".if_supports_color(Stdout, |t| t.red()),
            game.game_id,
        );
    }
    Ok(())
}

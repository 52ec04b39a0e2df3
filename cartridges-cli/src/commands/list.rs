use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cartridges_catalog::{Game, SortMode, matches_search, sort_games, time_label};
use cartridges_lib::{AppDirs, Settings, SettingsStore, keys};

use super::{now, open_catalog};
use crate::CliError;

/// Print the library (or the hidden list), filtered and sorted.
///
/// An explicit `--sort` becomes the remembered sort order.
pub(crate) fn run_list(
    dirs: &AppDirs,
    hidden: bool,
    sort: Option<SortMode>,
    search: Option<String>,
) -> Result<(), CliError> {
    let mut settings = Settings::load()?;
    let mode = match sort {
        Some(mode) => {
            settings.set_string(keys::SORT_MODE, mode.as_str());
            settings.save()?;
            mode
        }
        None => stored_sort_mode(&settings),
    };

    let catalog = open_catalog(dirs)?;
    let query = search.as_deref().unwrap_or("");
    let mut games: Vec<&Game> = if hidden {
        catalog.hidden_games().collect()
    } else {
        catalog.visible().collect()
    };
    games.retain(|game| matches_search(game, query));
    sort_games(&mut games, mode);

    if games.is_empty() {
        if !query.trim().is_empty() {
            log::info!("No games match '{}'.", query.trim());
        } else if hidden {
            log::info!("No hidden games.");
        } else {
            log::info!("No games yet. Run 'cartridges import' to add some.");
        }
        return Ok(());
    }

    let now = now();
    let width = games.iter().map(|g| g.name.chars().count()).max().unwrap_or(0);
    for game in &games {
        let padding = width - game.name.chars().count();
        log::info!(
            "  {}{}  {}  {}",
            game.name.if_supports_color(Stdout, |t| t.bold()),
            " ".repeat(padding),
            time_label(game.added, now).if_supports_color(Stdout, |t| t.dimmed()),
            game.game_id.if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    log::info!("");
    log::info!("{} game(s), sorted {}", games.len(), mode);
    Ok(())
}

fn stored_sort_mode(settings: &Settings) -> SortMode {
    let stored = settings.get_string(keys::SORT_MODE);
    stored.parse().unwrap_or_else(|e| {
        log::warn!("{}; using {}", e, SortMode::default());
        SortMode::default()
    })
}

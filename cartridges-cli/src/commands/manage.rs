use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cartridges_catalog::{Catalog, GameId};
use cartridges_lib::AppDirs;

use super::open_catalog;
use crate::CliError;

/// A change to one game's library state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameAction {
    Remove,
    UndoRemove,
    Hide,
    Unhide,
}

impl GameAction {
    fn apply(self, catalog: &mut Catalog, id: &GameId) -> Result<(), CliError> {
        match self {
            GameAction::Remove => catalog.remove_game(id)?,
            GameAction::UndoRemove => catalog.undo_remove(id)?,
            GameAction::Hide => catalog.set_hidden(id, true)?,
            GameAction::Unhide => catalog.set_hidden(id, false)?,
        }
        Ok(())
    }

    fn past_tense(self) -> &'static str {
        match self {
            GameAction::Remove => "Removed",
            GameAction::UndoRemove => "Restored",
            GameAction::Hide => "Hid",
            GameAction::Unhide => "Unhid",
        }
    }
}

pub(crate) fn run_game_action(dirs: &AppDirs, id: &str, action: GameAction) -> Result<(), CliError> {
    let mut catalog = open_catalog(dirs)?;
    let id = GameId::new(id);
    action.apply(&mut catalog, &id)?;

    let name = catalog.get(&id).map(|g| g.name.as_str()).unwrap_or(id.as_str());
    log::info!(
        "{} {}",
        action.past_tense(),
        name.if_supports_color(Stdout, |t| t.bold()),
    );
    if action == GameAction::Remove {
        log::info!(
            "  It stays out of the library on future imports. Undo with 'cartridges undo-remove {}'.",
            id,
        );
    }
    Ok(())
}

/// Permanently delete removed games and their covers.
///
/// A purged game no longer blocks re-import, so the next `import` brings it
/// back as a new game.
pub(crate) fn run_purge(dirs: &AppDirs) -> Result<(), CliError> {
    let mut catalog = open_catalog(dirs)?;
    let purged = catalog.purge_removed()?;
    if purged.is_empty() {
        log::info!("No removed games to purge.");
        return Ok(());
    }
    for id in &purged {
        log::info!("  Purged {}", id.if_supports_color(Stdout, |t| t.dimmed()));
    }
    log::info!(
        "Purged {} game(s). They will be imported again if Lutris still has them.",
        purged.len(),
    );
    Ok(())
}

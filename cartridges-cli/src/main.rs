//! cartridges CLI
//!
//! Command-line front end for importing games from Lutris and managing the
//! resulting library.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;

use clap::Parser;

use cartridges_lib::AppDirs;

use cli_types::{Cli, Commands, ConfigAction};
use commands::manage::GameAction;
pub(crate) use error::CliError;

fn main() {
    let Cli {
        quiet,
        verbose,
        logfile,
        data_dir,
        cache_dir,
        command,
    } = Cli::parse();

    if let Err(e) = logging::init(quiet, verbose, logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let dirs = AppDirs::from_env().with_overrides(data_dir, cache_dir);
    log::debug!(
        "Data dir: {}, cache dir: {}",
        dirs.data_dir.display(),
        dirs.cache_dir.display()
    );

    if let Err(e) = run(command, &dirs, quiet) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Commands, dirs: &AppDirs, quiet: bool) -> Result<(), CliError> {
    match command {
        Commands::Import => commands::import::run_import(dirs, quiet),
        Commands::List {
            hidden,
            sort,
            search,
        } => commands::list::run_list(dirs, hidden, sort, search),
        Commands::Show { id } => commands::show::run_show(dirs, &id),
        Commands::Remove { id } => commands::manage::run_game_action(dirs, &id, GameAction::Remove),
        Commands::UndoRemove { id } => {
            commands::manage::run_game_action(dirs, &id, GameAction::UndoRemove)
        }
        Commands::Hide { id } => commands::manage::run_game_action(dirs, &id, GameAction::Hide),
        Commands::Unhide { id } => commands::manage::run_game_action(dirs, &id, GameAction::Unhide),
        Commands::Purge => commands::manage::run_purge(dirs),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Set { key, value } => commands::config::run_config_set(&key, &value),
        },
    }
}

//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cartridges_catalog::SortMode;

#[derive(Parser)]
#[command(name = "cartridges")]
#[command(about = "Import and organize your game library", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Base data directory (defaults to ~/.local/share)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Base cache directory (defaults to ~/.cache)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import installed games from Lutris
    Import,

    /// List games in the library
    List {
        /// List hidden games instead of the main library
        #[arg(long)]
        hidden: bool,

        /// Sort order: a-z, z-a, newest, oldest, last_played (remembered)
        #[arg(short, long)]
        sort: Option<SortMode>,

        /// Only show games whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show details for one game
    Show {
        /// Game id (e.g., lutris_wine_3)
        id: String,
    },

    /// Remove a game from the library (stays removed across imports until undone)
    Remove {
        /// Game id
        id: String,
    },

    /// Restore a removed game
    UndoRemove {
        /// Game id
        id: String,
    },

    /// Move a game to the hidden list
    Hide {
        /// Game id
        id: String,
    },

    /// Move a game back to the main library
    Unhide {
        /// Game id
        id: String,
    },

    /// Permanently delete removed games (they can then be imported again)
    Purge,

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Change a setting
    Set {
        /// Setting name (e.g., import-secondary-runner)
        key: String,

        /// New value
        value: String,
    },
}

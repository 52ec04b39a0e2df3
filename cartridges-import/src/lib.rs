//! Import games from external launchers into the local catalog.
//!
//! This crate owns the import pipeline for Lutris: locating its data,
//! snapshotting its database into private scratch space, extracting the
//! installed games, reconciling them against the catalog, and committing the
//! result through an [`ImporterSink`].

pub mod error;
pub mod extract;
pub mod locate;
pub mod lutris;
pub mod progress;
pub mod reconcile;
pub mod sink;
pub mod snapshot;

pub use error::ImportError;
pub use extract::{ExternalGameRecord, Extraction, GAMES_QUERY, STEAM_RUNNER, extract, read_games};
pub use locate::{LutrisLocations, Resolution, resolve_locations};
pub use lutris::{ImportCycle, ImportOutcome, LAUNCHER, import_lutris};
pub use progress::{ImportProgress, SilentProgress};
pub use reconcile::{
    ImportStats, Mutation, ProgressDelta, ReconcilePlan, SkipReason, apply_plan, game_id,
    reconcile,
};
pub use sink::{CatalogImporter, ImporterSink};
pub use snapshot::{DATABASE_FILE, Snapshot};

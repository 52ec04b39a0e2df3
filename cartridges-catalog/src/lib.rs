//! Game catalog data model, JSON persistence, and library view logic.
//!
//! This crate defines the canonical game record shared by every import
//! source, the on-disk catalog that stores one JSON file per game, and the
//! sorting/search/label helpers the frontends use to present it.

pub mod error;
pub mod library;
pub mod store;
pub mod types;

pub use error::CatalogError;
pub use library::{ParseSortModeError, SortMode, last_played_label, matches_search, sort_games, time_label};
pub use store::{Catalog, GameLookup};
pub use types::*;

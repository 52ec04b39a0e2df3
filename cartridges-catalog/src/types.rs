//! Data model types for the game catalog.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ── Identity ────────────────────────────────────────────────────────────────

/// Catalog-wide game identifier, e.g. `lutris_steam_7`.
///
/// Built as `<source-prefix>_<runner>_<source-id>` so ids from different
/// import sources can never collide, and the same external game always maps
/// to the same id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Compose an id from an import source prefix, runner, and the source's own id.
    pub fn from_parts(prefix: &str, runner: &str, source_id: i64) -> Self {
        Self(format!("{prefix}_{runner}_{source_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// A game in the local catalog, stored as `games/<game_id>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: GameId,
    pub name: String,
    /// Unix timestamp of the import that created this entry.
    pub added: i64,
    /// Unix timestamp of the last launch, 0 if never played.
    #[serde(default)]
    pub last_played: i64,
    #[serde(default)]
    pub hidden: bool,
    /// Import source, e.g. `lutris_wine`.
    pub source: String,
    /// Launch command and arguments.
    pub executable: Vec<String>,
    /// Soft-delete marker. Only user actions set or clear it.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub removed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_path: Option<PathBuf>,
}

impl Game {
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

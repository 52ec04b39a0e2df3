//! Read installed games out of a Lutris database snapshot.

use std::path::Path;

use rusqlite::{Connection, OpenFlags, Row};

use crate::error::ImportError;
use crate::snapshot::Snapshot;

/// Installed, named, configured games.
pub const GAMES_QUERY: &str = "SELECT id, name, slug, runner, hidden FROM games
WHERE name IS NOT NULL AND slug IS NOT NULL
  AND configPath IS NOT NULL AND installed IS TRUE;";

/// Runner Lutris uses for games it launches through Steam.
pub const STEAM_RUNNER: &str = "steam";

/// One game row from the Lutris `games` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalGameRecord {
    /// Lutris' own id for the game.
    pub source_id: i64,
    pub name: String,
    /// Lutris slug, also the cover-art file stem.
    pub slug: String,
    pub runner: String,
    pub hidden: bool,
}

/// Rows extracted from one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<ExternalGameRecord>,
    /// Rows dropped by the Steam runner filter.
    pub filtered: usize,
    /// Rows skipped for missing a required field.
    pub malformed: usize,
}

/// A row as SQLite returned it, before validation.
struct RawRow {
    id: Option<i64>,
    name: Option<String>,
    slug: Option<String>,
    runner: Option<String>,
    hidden: Option<i64>,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> Self {
        // Type mismatches read as missing; validation decides what is fatal
        Self {
            id: row.get::<_, Option<i64>>(0).ok().flatten(),
            name: row.get::<_, Option<String>>(1).ok().flatten(),
            slug: row.get::<_, Option<String>>(2).ok().flatten(),
            runner: row.get::<_, Option<String>>(3).ok().flatten(),
            hidden: row.get::<_, Option<i64>>(4).ok().flatten(),
        }
    }

    fn into_record(self) -> Result<ExternalGameRecord, &'static str> {
        let source_id = self.id.ok_or("id")?;
        let name = self.name.ok_or("name")?;
        let slug = self.slug.ok_or("slug")?;
        let runner = self.runner.filter(|r| !r.is_empty()).ok_or("runner")?;
        Ok(ExternalGameRecord {
            source_id,
            name,
            slug,
            runner,
            hidden: self.hidden == Some(1),
        })
    }
}

/// Extract games from a snapshot.
pub fn extract(snapshot: &Snapshot, include_steam: bool) -> Result<Extraction, ImportError> {
    read_games(snapshot.primary(), include_steam)
}

/// Extract games from a private copy of a Lutris database.
///
/// The file is opened writable so SQLite can roll back a hot journal left by
/// a copy taken mid-transaction; queries are then restricted with
/// `query_only`. Never point this at Lutris' own database.
///
/// When `include_steam` is false, rows using the Steam runner are dropped
/// and counted in [`Extraction::filtered`].
pub fn read_games(path: &Path, include_steam: bool) -> Result<Extraction, ImportError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| ImportError::extraction(path, e))?;

    let rows = conn
        .pragma_update(None, "query_only", true)
        .and_then(|()| query_games(&conn));
    if let Err((_, e)) = conn.close() {
        log::debug!("Error closing {}: {}", path.display(), e);
    }
    let rows = rows.map_err(|e| ImportError::extraction(path, e))?;

    let mut extraction = Extraction::default();
    for raw in rows {
        let id = raw.id;
        match raw.into_record() {
            Ok(record) if !include_steam && record.runner == STEAM_RUNNER => {
                extraction.filtered += 1;
            }
            Ok(record) => extraction.records.push(record),
            Err(field) => {
                log::warn!("Skipping Lutris game {:?}: missing {}", id, field);
                extraction.malformed += 1;
            }
        }
    }

    log::debug!(
        "Extracted {} game(s) from {} ({} filtered, {} malformed)",
        extraction.records.len(),
        path.display(),
        extraction.filtered,
        extraction.malformed,
    );
    Ok(extraction)
}

fn query_games(conn: &Connection) -> rusqlite::Result<Vec<RawRow>> {
    let mut stmt = conn.prepare(GAMES_QUERY)?;
    let rows = stmt.query_map([], |row| Ok(RawRow::from_row(row)))?;
    rows.collect()
}

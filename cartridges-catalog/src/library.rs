//! Sorting, search, and date labels for the library view.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use thiserror::Error;

use crate::types::Game;

const SECONDS_PER_DAY: i64 = 86_400;

/// Library sort order, persisted as its string form (`a-z`, `newest`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    AToZ,
    ZToA,
    Newest,
    Oldest,
    LastPlayed,
}

#[derive(Debug, Error)]
#[error("Unknown sort mode '{0}' (expected a-z, z-a, newest, oldest or last_played)")]
pub struct ParseSortModeError(String);

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::AToZ,
        SortMode::ZToA,
        SortMode::Newest,
        SortMode::Oldest,
        SortMode::LastPlayed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::AToZ => "a-z",
            SortMode::ZToA => "z-a",
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::LastPlayed => "last_played",
        }
    }

    /// Compare two games for this sort order.
    ///
    /// Names compare case-insensitively; equal names fall back to the game
    /// id, and equal timestamps fall back to the `a-z` order.
    pub fn compare(self, a: &Game, b: &Game) -> Ordering {
        match self {
            SortMode::AToZ => by_name(a, b),
            SortMode::ZToA => fold_name(b).cmp(&fold_name(a)).then_with(|| by_name(a, b)),
            SortMode::Newest => b.added.cmp(&a.added).then_with(|| by_name(a, b)),
            SortMode::Oldest => a.added.cmp(&b.added).then_with(|| by_name(a, b)),
            SortMode::LastPlayed => b.last_played.cmp(&a.last_played).then_with(|| by_name(a, b)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseSortModeError(s.to_string()))
    }
}

fn fold_name(game: &Game) -> String {
    game.name.to_lowercase()
}

fn by_name(a: &Game, b: &Game) -> Ordering {
    fold_name(a)
        .cmp(&fold_name(b))
        .then_with(|| a.game_id.cmp(&b.game_id))
}

/// Sort games in place for display.
pub fn sort_games(games: &mut [&Game], mode: SortMode) {
    games.sort_by(|a, b| mode.compare(a, b));
}

/// Whether a game matches the search box text.
pub fn matches_search(game: &Game, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || game.name.to_lowercase().contains(&query.to_lowercase())
}

/// Human label for a timestamp relative to `now`.
///
/// Elapsed time is counted in whole days: under one day is "Today", one day
/// is "Yesterday", under eight days is the weekday name, and anything older
/// is a short date.
pub fn time_label(timestamp: i64, now: i64) -> String {
    let days = (now - timestamp).div_euclid(SECONDS_PER_DAY);
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        _ => {
            let Some(date) = DateTime::from_timestamp(timestamp, 0) else {
                return "Unknown".to_string();
            };
            if days < 8 {
                date.format("%A").to_string()
            } else {
                date.format("%x").to_string()
            }
        }
    }
}

/// Like [`time_label`], but a zero timestamp reads as "Never".
pub fn last_played_label(timestamp: i64, now: i64) -> String {
    if timestamp == 0 {
        "Never".to_string()
    } else {
        time_label(timestamp, now)
    }
}

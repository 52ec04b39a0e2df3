//! Decide what an extracted batch means for the catalog.
//!
//! Each Lutris game maps to the id `lutris_<runner>_<id>`. A game whose id
//! is not in the catalog yet is created; a game that is already there is
//! skipped, whether it is active or soft-deleted. Stored entries are never
//! updated from Lutris: renames and play times the user changed locally
//! survive re-import, and a removed game stays removed.
//!
//! [`reconcile`] only plans; [`apply_plan`] hands the plan to a sink.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use cartridges_catalog::{CatalogError, Game, GameId, GameLookup};

use crate::extract::{ExternalGameRecord, Extraction};
use crate::sink::ImporterSink;

/// Prefix for ids and sources of games imported from Lutris.
pub const SOURCE_PREFIX: &str = "lutris";

/// Command used to hand a `lutris:` URI to Lutris.
const OPEN_COMMAND: &str = "xdg-open";

/// Why a record produced no new catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Already imported and active.
    Existing,
    /// Already imported and soft-deleted by the user.
    Removed,
    /// Same id appeared earlier in this batch.
    Duplicate,
}

/// One planned catalog change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create {
        game: Game,
        /// Existing cover-art file to import alongside the game.
        cover: Option<PathBuf>,
    },
    Skip {
        game_id: GameId,
        reason: SkipReason,
    },
}

/// Queue counter increments for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressDelta {
    pub total: usize,
    pub queue: usize,
}

/// The planned outcome of one import cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub progress: ProgressDelta,
    pub mutations: Vec<Mutation>,
    /// Rows counted in `progress` that produce no mutation.
    pub filtered: usize,
    pub malformed: usize,
}

/// Statistics from an import cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Games counted toward progress (records plus filtered rows).
    pub found: usize,
    pub created: usize,
    pub existing: usize,
    pub removed: usize,
    pub duplicates: usize,
    pub filtered: usize,
    pub malformed: usize,
    pub covers: usize,
}

impl ReconcilePlan {
    pub fn creates(&self) -> impl Iterator<Item = &Game> {
        self.mutations.iter().filter_map(|m| match m {
            Mutation::Create { game, .. } => Some(game),
            Mutation::Skip { .. } => None,
        })
    }

    pub fn stats(&self) -> ImportStats {
        let mut stats = ImportStats {
            found: self.progress.total,
            filtered: self.filtered,
            malformed: self.malformed,
            ..Default::default()
        };
        for mutation in &self.mutations {
            match mutation {
                Mutation::Create { .. } => stats.created += 1,
                Mutation::Skip { reason, .. } => match reason {
                    SkipReason::Existing => stats.existing += 1,
                    SkipReason::Removed => stats.removed += 1,
                    SkipReason::Duplicate => stats.duplicates += 1,
                },
            }
        }
        stats
    }
}

/// Catalog id for a Lutris record. Depends only on runner and Lutris id.
pub fn game_id(record: &ExternalGameRecord) -> GameId {
    GameId::from_parts(SOURCE_PREFIX, &record.runner, record.source_id)
}

/// Plan the catalog changes for an extracted batch.
///
/// `now` becomes the `added` time of created games. Covers are looked up as
/// `<cache_dir>/coverart/<slug>.jpg`.
pub fn reconcile<L: GameLookup + ?Sized>(
    extraction: &Extraction,
    catalog: &L,
    now: i64,
    cache_dir: &Path,
) -> ReconcilePlan {
    let queued = extraction.records.len() + extraction.filtered;
    let mut plan = ReconcilePlan {
        progress: ProgressDelta {
            total: queued,
            queue: queued,
        },
        mutations: Vec::with_capacity(extraction.records.len()),
        filtered: extraction.filtered,
        malformed: extraction.malformed,
    };

    let mut seen = HashSet::new();
    for record in &extraction.records {
        let id = game_id(record);

        if !seen.insert(id.clone()) {
            plan.mutations.push(Mutation::Skip {
                game_id: id,
                reason: SkipReason::Duplicate,
            });
            continue;
        }

        let mutation = match catalog.lookup(&id) {
            Some(existing) if existing.is_removed() => {
                log::debug!("{} was removed by the user; leaving it removed", id);
                Mutation::Skip {
                    game_id: id,
                    reason: SkipReason::Removed,
                }
            }
            Some(_) => Mutation::Skip {
                game_id: id,
                reason: SkipReason::Existing,
            },
            None => {
                let cover = cache_dir.join("coverart").join(format!("{}.jpg", record.slug));
                Mutation::Create {
                    game: new_game(id, record, now),
                    cover: cover.exists().then_some(cover),
                }
            }
        };
        plan.mutations.push(mutation);
    }

    plan
}

fn new_game(game_id: GameId, record: &ExternalGameRecord, now: i64) -> Game {
    Game {
        game_id,
        name: record.name.clone(),
        added: now,
        last_played: 0,
        hidden: record.hidden,
        source: format!("{SOURCE_PREFIX}_{}", record.runner),
        executable: vec![
            OPEN_COMMAND.to_string(),
            format!("lutris:rungameid/{}", record.source_id),
        ],
        removed: false,
        cover_path: None,
    }
}

/// Submit a plan to a sink.
///
/// The whole batch is queued before the first submission, so progress can
/// be shown from the start. Creates are submitted with their cover; skips
/// are submitted as `None`. Filtered rows are settled at the end.
pub fn apply_plan(
    plan: ReconcilePlan,
    sink: &mut impl ImporterSink,
) -> Result<ImportStats, CatalogError> {
    let stats = plan.stats();

    sink.increase_total_queue(plan.progress.total);
    sink.increase_queue(plan.progress.queue);

    for mutation in plan.mutations {
        match mutation {
            Mutation::Create { game, cover } => sink.submit(Some(game), cover.as_deref())?,
            Mutation::Skip { .. } => sink.submit(None, None)?,
        }
    }

    if plan.filtered > 0 {
        sink.decrease_queue(plan.filtered);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source_id: i64, runner: &str) -> ExternalGameRecord {
        ExternalGameRecord {
            source_id,
            name: "Anything".to_string(),
            slug: "anything".to_string(),
            runner: runner.to_string(),
            hidden: false,
        }
    }

    #[test]
    fn id_depends_on_runner_and_source_id_only() {
        let mut a = record(7, "steam");
        assert_eq!(game_id(&a).as_str(), "lutris_steam_7");

        a.name = "Renamed".to_string();
        a.slug = "renamed".to_string();
        a.hidden = true;
        assert_eq!(game_id(&a).as_str(), "lutris_steam_7");

        assert_ne!(game_id(&record(7, "wine")), game_id(&record(7, "steam")));
    }

    #[test]
    fn new_game_fields() {
        let mut r = record(2, "dosbox");
        r.hidden = true;
        let game = new_game(game_id(&r), &r, 42);
        assert_eq!(game.source, "lutris_dosbox");
        assert_eq!(game.executable, ["xdg-open", "lutris:rungameid/2"]);
        assert_eq!(game.added, 42);
        assert_eq!(game.last_played, 0);
        assert!(game.hidden);
        assert!(!game.removed);
    }
}

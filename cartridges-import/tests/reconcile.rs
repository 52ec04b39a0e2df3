mod common;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cartridges_catalog::{CatalogError, Game, GameId};
use cartridges_import::*;
use common::{create_cover, create_lutris_db, row};
use tempfile::TempDir;

const NOW: i64 = 1_700_000_000;

/// Sink that records every call instead of persisting.
#[derive(Default)]
struct RecordingSink {
    total_queue: usize,
    queue: usize,
    /// Counter values when the first submission arrived.
    queued_at_first_submit: Option<(usize, usize)>,
    submissions: Vec<(Option<Game>, Option<PathBuf>)>,
}

impl RecordingSink {
    fn created(&self) -> Vec<&Game> {
        self.submissions.iter().filter_map(|(g, _)| g.as_ref()).collect()
    }
}

impl ImporterSink for RecordingSink {
    fn increase_total_queue(&mut self, n: usize) {
        self.total_queue += n;
    }

    fn increase_queue(&mut self, n: usize) {
        self.queue += n;
    }

    fn decrease_queue(&mut self, n: usize) {
        self.queue -= n;
    }

    fn submit(&mut self, game: Option<Game>, cover: Option<&Path>) -> Result<(), CatalogError> {
        if self.queued_at_first_submit.is_none() {
            self.queued_at_first_submit = Some((self.total_queue, self.queue));
        }
        self.submissions.push((game, cover.map(Path::to_path_buf)));
        self.queue -= 1;
        Ok(())
    }
}

fn record(source_id: i64, name: &str, slug: &str, runner: &str, hidden: bool) -> ExternalGameRecord {
    ExternalGameRecord {
        source_id,
        name: name.to_string(),
        slug: slug.to_string(),
        runner: runner.to_string(),
        hidden,
    }
}

fn extraction(records: Vec<ExternalGameRecord>) -> Extraction {
    Extraction {
        records,
        ..Default::default()
    }
}

fn empty_catalog() -> BTreeMap<GameId, Game> {
    BTreeMap::new()
}

fn existing(id: &str, removed: bool) -> Game {
    Game {
        game_id: GameId::new(id),
        name: "Edited By User".to_string(),
        added: 1_600_000_000,
        last_played: 1_650_000_000,
        hidden: false,
        source: "lutris_steam".to_string(),
        executable: vec!["xdg-open".to_string(), "lutris:rungameid/7".to_string()],
        removed,
        cover_path: None,
    }
}

#[test]
fn scenario_filtered_steam_row_and_hidden_lutris_row() {
    let tmp = TempDir::new().unwrap();
    let db = create_lutris_db(
        &tmp.path().join("lutris"),
        &[
            row(1, "Portal", "portal", "steam", 0),
            row(2, "Doom", "doom", "lutris", 1),
        ],
    );
    let extraction = read_games(&db, false).unwrap();
    let catalog = empty_catalog();

    let plan = reconcile(&extraction, &catalog, NOW, &tmp.path().join("cache"));
    assert_eq!(plan.progress, ProgressDelta { total: 2, queue: 2 });

    let mut sink = RecordingSink::default();
    let stats = apply_plan(plan, &mut sink).unwrap();

    assert_eq!(sink.queued_at_first_submit, Some((2, 2)));
    assert_eq!(sink.submissions.len(), 1);

    let (game, cover) = &sink.submissions[0];
    let game = game.as_ref().unwrap();
    assert_eq!(game.game_id.as_str(), "lutris_lutris_2");
    assert_eq!(game.name, "Doom");
    assert!(game.hidden);
    assert_eq!(game.added, NOW);
    assert_eq!(game.last_played, 0);
    assert_eq!(game.source, "lutris_lutris");
    assert_eq!(game.executable, ["xdg-open", "lutris:rungameid/2"]);
    assert!(cover.is_none());

    assert_eq!(sink.total_queue, 2);
    assert_eq!(sink.queue, 0);
    assert_eq!(stats.found, 2);
    assert_eq!(stats.created, 1);
    assert_eq!(stats.filtered, 1);
}

#[test]
fn second_run_creates_nothing() {
    let tmp = TempDir::new().unwrap();
    let batch = extraction(vec![
        record(1, "Celeste", "celeste", "linux", false),
        record(2, "Doom", "doom", "dosbox", false),
        record(7, "Portal", "portal", "steam", false),
    ]);
    let mut catalog = empty_catalog();

    let mut first = RecordingSink::default();
    apply_plan(reconcile(&batch, &catalog, NOW, tmp.path()), &mut first).unwrap();
    assert_eq!(first.created().len(), 3);
    for game in first.created() {
        catalog.insert(game.game_id.clone(), game.clone());
    }

    let mut second = RecordingSink::default();
    let stats = apply_plan(reconcile(&batch, &catalog, NOW + 60, tmp.path()), &mut second).unwrap();
    assert!(second.created().is_empty());
    assert_eq!(second.submissions.len(), 3);
    assert_eq!(second.total_queue, 3);
    assert_eq!(second.queue, 0);
    assert_eq!(stats.existing, 3);
    assert_eq!(stats.created, 0);
}

#[test]
fn existing_entries_are_not_overwritten() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = empty_catalog();
    catalog.insert(GameId::new("lutris_steam_7"), existing("lutris_steam_7", false));

    let batch = extraction(vec![record(7, "Portal", "portal", "steam", true)]);
    let plan = reconcile(&batch, &catalog, NOW, tmp.path());

    assert_eq!(
        plan.mutations,
        vec![Mutation::Skip {
            game_id: GameId::new("lutris_steam_7"),
            reason: SkipReason::Existing,
        }]
    );
}

#[test]
fn removed_entries_stay_removed() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = empty_catalog();
    catalog.insert(GameId::new("lutris_steam_7"), existing("lutris_steam_7", true));

    let batch = extraction(vec![record(7, "Portal", "portal", "steam", false)]);
    let plan = reconcile(&batch, &catalog, NOW, tmp.path());
    assert_eq!(plan.creates().count(), 0);
    assert_eq!(
        plan.mutations[0],
        Mutation::Skip {
            game_id: GameId::new("lutris_steam_7"),
            reason: SkipReason::Removed,
        }
    );

    let mut sink = RecordingSink::default();
    let stats = apply_plan(plan, &mut sink).unwrap();
    assert_eq!(stats.removed, 1);
    assert_eq!(sink.submissions.len(), 1);
    assert!(sink.submissions[0].0.is_none());
    assert_eq!(sink.queue, 0);
    assert!(catalog[&GameId::new("lutris_steam_7")].removed);
}

#[test]
fn steam_rows_count_toward_queue_without_submissions() {
    let tmp = TempDir::new().unwrap();
    let db = create_lutris_db(
        &tmp.path().join("lutris"),
        &[
            row(1, "Portal", "portal", "steam", 0),
            row(2, "Half-Life 2", "halflife2", "steam", 0),
            row(3, "Celeste", "celeste", "linux", 0),
        ],
    );
    let extraction = read_games(&db, false).unwrap();

    let mut sink = RecordingSink::default();
    apply_plan(
        reconcile(&extraction, &empty_catalog(), NOW, tmp.path()),
        &mut sink,
    )
    .unwrap();

    assert_eq!(sink.queued_at_first_submit, Some((3, 3)));
    assert_eq!(sink.submissions.len(), 1);
    assert!(
        sink.created()
            .iter()
            .all(|g| !g.game_id.as_str().starts_with("lutris_steam_"))
    );
    assert_eq!(sink.queue, 0);
}

#[test]
fn cover_is_passed_only_when_present() {
    let tmp = TempDir::new().unwrap();
    let cache = tmp.path().join("cache");
    let cover = create_cover(&cache, "halflife2");

    let batch = extraction(vec![
        record(1, "Half-Life 2", "halflife2", "wine", false),
        record(2, "Braid", "braid", "linux", false),
    ]);
    let mut sink = RecordingSink::default();
    apply_plan(reconcile(&batch, &empty_catalog(), NOW, &cache), &mut sink).unwrap();

    assert_eq!(sink.submissions[0].1.as_deref(), Some(cover.as_path()));
    assert_eq!(sink.submissions[1].1, None);
}

#[test]
fn duplicate_ids_in_one_batch_create_once() {
    let tmp = TempDir::new().unwrap();
    let batch = extraction(vec![
        record(4, "Braid", "braid", "linux", false),
        record(4, "Braid (copy)", "braid", "linux", false),
    ]);

    let plan = reconcile(&batch, &empty_catalog(), NOW, tmp.path());
    assert_eq!(plan.creates().count(), 1);
    assert_eq!(plan.stats().duplicates, 1);
    assert_eq!(plan.progress.total, 2);
}

#[test]
fn malformed_rows_are_reported_but_not_queued() {
    let tmp = TempDir::new().unwrap();
    let batch = Extraction {
        records: vec![record(1, "Celeste", "celeste", "linux", false)],
        filtered: 0,
        malformed: 2,
    };

    let plan = reconcile(&batch, &empty_catalog(), NOW, tmp.path());
    assert_eq!(plan.progress.total, 1);
    assert_eq!(plan.stats().malformed, 2);
}

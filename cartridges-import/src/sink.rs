//! The persistence side of an import: queue counters plus catalog writes.

use std::fs;
use std::path::Path;

use cartridges_catalog::{Catalog, CatalogError, Game};

use crate::progress::ImportProgress;

/// Receives the outcome of reconciliation.
///
/// `total_queue` only ever grows and drives progress display; `queue` is the
/// number of games still to be committed. Every queued game is answered by
/// exactly one [`ImporterSink::submit`] or one unit of
/// [`ImporterSink::decrease_queue`].
pub trait ImporterSink {
    fn increase_total_queue(&mut self, n: usize);
    fn increase_queue(&mut self, n: usize);
    /// Settle queued games that will never be submitted (filtered rows).
    fn decrease_queue(&mut self, n: usize);
    /// Commit one game, or with `None`, mark one queued game as skipped.
    fn submit(&mut self, game: Option<Game>, cover: Option<&Path>) -> Result<(), CatalogError>;
}

/// An [`ImporterSink`] that writes into a [`Catalog`].
///
/// Holds the catalog exclusively for the whole cycle, so the existence
/// check in [`ImporterSink::submit`] and the write that follows cannot be
/// interleaved with other catalog changes.
pub struct CatalogImporter<'a> {
    catalog: &'a mut Catalog,
    progress: &'a dyn ImportProgress,
    total_queue: usize,
    queue: usize,
    created: usize,
    covers: usize,
}

impl<'a> CatalogImporter<'a> {
    pub fn new(catalog: &'a mut Catalog, progress: &'a dyn ImportProgress) -> Self {
        Self {
            catalog,
            progress,
            total_queue: 0,
            queue: 0,
            created: 0,
            covers: 0,
        }
    }

    pub fn total_queue(&self) -> usize {
        self.total_queue
    }

    pub fn queue(&self) -> usize {
        self.queue
    }

    /// Whether every queued game has been answered.
    pub fn is_done(&self) -> bool {
        self.queue == 0
    }

    /// Games written to the catalog by this importer.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Covers copied into the catalog by this importer.
    pub fn covers(&self) -> usize {
        self.covers
    }

    fn finish_one(&mut self, name: Option<&str>) {
        self.queue = self.queue.saturating_sub(1);
        self.progress
            .on_game(self.total_queue.saturating_sub(self.queue), self.total_queue, name);
    }
}

impl ImporterSink for CatalogImporter<'_> {
    fn increase_total_queue(&mut self, n: usize) {
        self.total_queue += n;
    }

    fn increase_queue(&mut self, n: usize) {
        self.queue += n;
        self.progress.on_queued(self.total_queue, self.queue);
    }

    fn decrease_queue(&mut self, n: usize) {
        self.queue = self.queue.saturating_sub(n);
        self.progress.on_queued(self.total_queue, self.queue);
    }

    fn submit(&mut self, game: Option<Game>, cover: Option<&Path>) -> Result<(), CatalogError> {
        let Some(mut game) = game else {
            self.finish_one(None);
            return Ok(());
        };

        // Something else may have created (or removed) this id since reconciliation
        if self.catalog.contains(&game.game_id) {
            log::debug!("{} already in catalog; skipping", game.game_id);
            self.finish_one(None);
            return Ok(());
        }

        if let Some(cover) = cover {
            match self.catalog.store_cover(&game.game_id, cover) {
                Ok(stored) => game.cover_path = Some(stored),
                Err(e) => log::warn!("Importing {} without a cover: {}", game.name, e),
            }
        }

        let name = game.name.clone();
        let stored_cover = game.cover_path.clone();
        if let Err(e) = self.catalog.save_game(game) {
            // No record points at the copied cover
            if let Some(stored) = stored_cover {
                if let Err(remove_err) = fs::remove_file(&stored) {
                    log::debug!("Could not remove {}: {}", stored.display(), remove_err);
                }
            }
            return Err(e);
        }
        if stored_cover.is_some() {
            self.covers += 1;
        }
        self.created += 1;
        self.finish_one(Some(&name));
        Ok(())
    }
}

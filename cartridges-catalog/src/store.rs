//! JSON file persistence for the game catalog.
//!
//! Layout under the catalog root:
//! ```text
//! games/<game_id>.json
//! covers/<game_id>.<ext>
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::types::{Game, GameId};

/// Read access to the games already known to the catalog.
///
/// Import code dedups against this instead of a concrete store so it can be
/// tested against a plain map.
pub trait GameLookup {
    fn lookup(&self, id: &GameId) -> Option<&Game>;
}

impl GameLookup for BTreeMap<GameId, Game> {
    fn lookup(&self, id: &GameId) -> Option<&Game> {
        self.get(id)
    }
}

/// The on-disk game catalog, fully loaded into memory.
#[derive(Debug)]
pub struct Catalog {
    root: PathBuf,
    games: BTreeMap<GameId, Game>,
}

impl GameLookup for Catalog {
    fn lookup(&self, id: &GameId) -> Option<&Game> {
        self.games.get(id)
    }
}

impl Catalog {
    /// Open (or create) the catalog rooted at `root` and load every game file.
    ///
    /// Files that cannot be parsed are skipped with a warning so one bad
    /// entry does not hide the rest of the library.
    pub fn open(root: &Path) -> Result<Self, CatalogError> {
        let games_dir = root.join("games");
        fs::create_dir_all(&games_dir).map_err(|e| CatalogError::io(&games_dir, e))?;

        let mut entries: Vec<_> = fs::read_dir(&games_dir)
            .map_err(|e| CatalogError::io(&games_dir, e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort_by_key(|e| e.file_name());

        let mut games = BTreeMap::new();
        for entry in entries {
            let path = entry.path();
            match read_game(&path) {
                Ok(game) => {
                    games.insert(game.game_id.clone(), game);
                }
                Err(e) => log::warn!("Skipping unreadable game file: {}", e),
            }
        }

        log::debug!("Loaded {} games from {}", games.len(), root.display());
        Ok(Self {
            root: root.to_path_buf(),
            games,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn games_dir(&self) -> PathBuf {
        self.root.join("games")
    }

    pub fn covers_dir(&self) -> PathBuf {
        self.root.join("covers")
    }

    pub fn get(&self, id: &GameId) -> Option<&Game> {
        self.games.get(id)
    }

    pub fn contains(&self, id: &GameId) -> bool {
        self.games.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// All games, including removed ones, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    /// Games shown in the main library: not hidden, not removed.
    pub fn visible(&self) -> impl Iterator<Item = &Game> {
        self.games.values().filter(|g| !g.removed && !g.hidden)
    }

    /// Games shown in the hidden library: hidden, not removed.
    pub fn hidden_games(&self) -> impl Iterator<Item = &Game> {
        self.games.values().filter(|g| !g.removed && g.hidden)
    }

    /// Write a game file and update the in-memory entry.
    pub fn save_game(&mut self, game: Game) -> Result<(), CatalogError> {
        let path = self.game_path(&game.game_id);
        let json = serde_json::to_string_pretty(&game).map_err(|e| CatalogError::Json {
            path: path.display().to_string(),
            source: e,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| CatalogError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| CatalogError::io(&path, e))?;

        self.games.insert(game.game_id.clone(), game);
        Ok(())
    }

    /// Copy a cover image into the catalog and return its stored path.
    ///
    /// The source extension is kept; files without one are stored as `.jpg`.
    pub fn store_cover(&self, id: &GameId, source: &Path) -> Result<PathBuf, CatalogError> {
        let covers = self.covers_dir();
        fs::create_dir_all(&covers).map_err(|e| CatalogError::io(&covers, e))?;

        let ext = source
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "jpg".to_string());
        let dest = covers.join(format!("{id}.{ext}"));
        fs::copy(source, &dest).map_err(|e| CatalogError::io(source, e))?;
        Ok(dest)
    }

    /// Soft-delete a game. It stays on disk until [`Catalog::purge_removed`].
    pub fn remove_game(&mut self, id: &GameId) -> Result<(), CatalogError> {
        self.update(id, |game| game.removed = true)
    }

    /// Undo a soft delete.
    pub fn undo_remove(&mut self, id: &GameId) -> Result<(), CatalogError> {
        self.update(id, |game| game.removed = false)
    }

    /// Move a game between the main and hidden libraries.
    pub fn set_hidden(&mut self, id: &GameId, hidden: bool) -> Result<(), CatalogError> {
        self.update(id, |game| game.hidden = hidden)
    }

    /// Physically delete every removed game and its cover.
    ///
    /// Returns the ids that were purged.
    pub fn purge_removed(&mut self) -> Result<Vec<GameId>, CatalogError> {
        let removed: Vec<GameId> = self
            .games
            .values()
            .filter(|g| g.removed)
            .map(|g| g.game_id.clone())
            .collect();

        for id in &removed {
            let path = self.game_path(id);
            remove_if_exists(&path)?;
            if let Some(cover) = self.games.get(id).and_then(|g| g.cover_path.as_deref()) {
                // Only delete covers this catalog owns
                if cover.starts_with(self.covers_dir()) {
                    remove_if_exists(cover)?;
                }
            }
            self.games.remove(id);
            log::debug!("Purged removed game {}", id);
        }

        Ok(removed)
    }

    fn update(&mut self, id: &GameId, f: impl FnOnce(&mut Game)) -> Result<(), CatalogError> {
        let mut game = self
            .games
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        f(&mut game);
        self.save_game(game)
    }

    fn game_path(&self, id: &GameId) -> PathBuf {
        self.games_dir().join(format!("{id}.json"))
    }
}

fn read_game(path: &Path) -> Result<Game, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| CatalogError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

fn remove_if_exists(path: &Path) -> Result<(), CatalogError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CatalogError::io(path, e)),
    }
}

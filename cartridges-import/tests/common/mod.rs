#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use cartridges_lib::{AppDirs, ImportConfig};
use rusqlite::{Connection, params};
use tempfile::TempDir;

/// A row in the fixture `games` table.
pub struct LutrisRow {
    pub id: i64,
    pub name: Option<&'static str>,
    pub slug: Option<&'static str>,
    pub runner: Option<&'static str>,
    pub hidden: i64,
    pub installed: bool,
    pub configpath: Option<&'static str>,
}

/// An installed, configured game.
pub fn row(id: i64, name: &'static str, slug: &'static str, runner: &'static str, hidden: i64) -> LutrisRow {
    LutrisRow {
        id,
        name: Some(name),
        slug: Some(slug),
        runner: Some(runner),
        hidden,
        installed: true,
        configpath: Some(slug),
    }
}

/// Write a minimal Lutris `pga.db` into `dir` and return its path.
pub fn create_lutris_db(dir: &Path, rows: &[LutrisRow]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join("pga.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE games (
            id INTEGER PRIMARY KEY,
            name TEXT,
            slug TEXT,
            installer_slug TEXT,
            platform TEXT,
            runner TEXT,
            directory TEXT,
            lastplayed INTEGER,
            installed INTEGER,
            configpath TEXT,
            hidden INTEGER
        );",
    )
    .unwrap();
    for r in rows {
        conn.execute(
            "INSERT INTO games (id, name, slug, runner, installed, configpath, hidden)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![r.id, r.name, r.slug, r.runner, r.installed, r.configpath, r.hidden],
        )
        .unwrap();
    }
    path
}

/// Write a fake cover image into `<cache_dir>/coverart/<slug>.jpg`.
pub fn create_cover(cache_dir: &Path, slug: &str) -> PathBuf {
    let coverart = cache_dir.join("coverart");
    fs::create_dir_all(&coverart).unwrap();
    let path = coverart.join(format!("{slug}.jpg"));
    fs::write(&path, b"\xff\xd8\xff\xe0 fake jpeg").unwrap();
    path
}

/// A fake home directory with XDG-style data and cache bases.
pub struct TestHome {
    pub tmp: TempDir,
    pub dirs: AppDirs,
}

impl TestHome {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        let dirs = AppDirs {
            data_dir: home.join(".local").join("share"),
            cache_dir: home.join(".cache"),
            home,
        };
        fs::create_dir_all(&dirs.data_dir).unwrap();
        fs::create_dir_all(&dirs.cache_dir).unwrap();
        Self { tmp, dirs }
    }

    /// Native Lutris data directory (`~/.local/share/lutris`).
    pub fn lutris_data(&self) -> PathBuf {
        self.dirs.data_dir.join("lutris")
    }

    /// Native Lutris cache directory (`~/.cache/lutris`).
    pub fn lutris_cache(&self) -> PathBuf {
        self.dirs.cache_dir.join("lutris")
    }

    pub fn scratch(&self) -> PathBuf {
        self.dirs.scratch_dir("lutris")
    }

    /// Files left in the scratch directory that look like database copies.
    pub fn scratch_leftovers(&self) -> Vec<PathBuf> {
        match fs::read_dir(self.scratch()) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.file_name().unwrap().to_string_lossy().starts_with("pga.db"))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// The default config, pointing at the native Lutris directories.
pub fn default_config(include_steam: bool) -> ImportConfig {
    ImportConfig {
        db_location: "~/.local/share/lutris/".to_string(),
        cache_location: "~/.cache/lutris/".to_string(),
        include_steam,
    }
}

//! Private copies of the Lutris database.
//!
//! Lutris may hold its database open, and it may live somewhere SQLite
//! cannot lock (e.g. under `/run/user/`). Each import cycle therefore copies
//! `pga.db` and its sidecars (`-wal`, `-shm`, `-journal`) into scratch space
//! it owns, and reads the copy. The copy is deleted when the [`Snapshot`] is
//! dropped, whatever happened in between.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ImportError;

/// File name of the Lutris database. Sidecar files share it as a prefix.
pub const DATABASE_FILE: &str = "pga.db";

/// A scoped copy of the Lutris database files.
#[derive(Debug)]
pub struct Snapshot {
    primary: PathBuf,
    files: Vec<PathBuf>,
}

impl Snapshot {
    /// Copy the database files from `database_dir` into `scratch_dir`.
    ///
    /// Returns `Ok(None)` when there is no `pga.db` to copy (Lutris has no
    /// games yet). Files copied before a failed copy are removed again, and
    /// copies an interrupted cycle left in `scratch_dir` are removed first.
    pub fn take(database_dir: &Path, scratch_dir: &Path) -> Result<Option<Self>, ImportError> {
        remove_stale(scratch_dir);

        let mut sources: Vec<PathBuf> = match fs::read_dir(database_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter(|e| e.file_name().to_string_lossy().starts_with(DATABASE_FILE))
                .map(|e| e.path())
                .filter(|p| p.is_file())
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(ImportError::snapshot(database_dir, e)),
        };
        sources.sort();

        if !sources.iter().any(|p| p.file_name().is_some_and(|n| n == DATABASE_FILE)) {
            log::debug!("No {} in {}", DATABASE_FILE, database_dir.display());
            return Ok(None);
        }

        fs::create_dir_all(scratch_dir).map_err(|e| ImportError::snapshot(scratch_dir, e))?;

        let mut snapshot = Snapshot {
            primary: scratch_dir.join(DATABASE_FILE),
            files: Vec::with_capacity(sources.len()),
        };

        for source in &sources {
            let Some(name) = source.file_name() else {
                continue;
            };
            let dest = scratch_dir.join(name);
            // Track before copying so a partial file is cleaned up too
            snapshot.files.push(dest.clone());
            fs::copy(source, &dest).map_err(|e| ImportError::snapshot(source, e))?;
        }

        log::debug!(
            "Copied {} database file(s) to {}",
            snapshot.files.len(),
            scratch_dir.display()
        );
        Ok(Some(snapshot))
    }

    /// Scratch path of the copied `pga.db`.
    pub fn primary(&self) -> &Path {
        &self.primary
    }

    /// Every copied file, sidecars included.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Delete the copied files now rather than at end of scope.
    pub fn cleanup(self) {
        drop(self);
    }
}

impl Drop for Snapshot {
    fn drop(&mut self) {
        for file in self.files.drain(..) {
            match fs::remove_file(&file) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => log::debug!("Could not remove {}: {}", file.display(), e),
            }
        }
    }
}

/// Remove database files a previous, interrupted cycle may have left behind.
fn remove_stale(scratch_dir: &Path) {
    let Ok(entries) = fs::read_dir(scratch_dir) else {
        return;
    };
    for entry in entries.filter_map(|e| e.ok()) {
        if entry.file_name().to_string_lossy().starts_with(DATABASE_FILE) {
            if let Err(e) = fs::remove_file(entry.path()) {
                log::debug!("Could not remove {}: {}", entry.path().display(), e);
            }
        }
    }
}

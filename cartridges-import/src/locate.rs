//! Find the Lutris database and cover-art cache on disk.
//!
//! The configured locations are tried first. When they do not exist, the
//! Flatpak install and then the native XDG directories are tried, and the
//! first hit is written into the returned config so the next cycle finds it
//! directly.

use std::path::PathBuf;

use cartridges_lib::{AppDirs, ImportConfig};

/// Lutris data directory inside the Flatpak sandbox.
pub const FLATPAK_DATA_DIR: &str = "~/.var/app/net.lutris.Lutris/data/lutris/";

/// Lutris cache directory inside the Flatpak sandbox.
pub const FLATPAK_CACHE_DIR: &str = "~/.var/app/net.lutris.Lutris/cache/lutris/";

/// Resolved Lutris directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LutrisLocations {
    /// Directory containing `pga.db`.
    pub database_dir: PathBuf,
    /// Directory containing `coverart/`.
    pub cache_dir: PathBuf,
}

/// Result of location resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        locations: LutrisLocations,
        /// The input config with any discovered locations filled in.
        config: ImportConfig,
    },
    /// Lutris does not appear to be installed.
    Unavailable,
}

/// Resolve both Lutris directories. Both must exist for the import to run.
pub fn resolve_locations(config: &ImportConfig, dirs: &AppDirs) -> Resolution {
    let data_fallback = dirs.data_dir.join(crate::LAUNCHER);
    let Some((db_location, database_dir)) = resolve_dir(
        &config.db_location,
        &[
            FLATPAK_DATA_DIR.to_string(),
            data_fallback.to_string_lossy().into_owned(),
        ],
        dirs,
    ) else {
        log::debug!("No Lutris data directory found");
        return Resolution::Unavailable;
    };

    let cache_fallback = dirs.cache_dir.join(crate::LAUNCHER);
    let Some((cache_location, cache_dir)) = resolve_dir(
        &config.cache_location,
        &[
            FLATPAK_CACHE_DIR.to_string(),
            cache_fallback.to_string_lossy().into_owned(),
        ],
        dirs,
    ) else {
        log::debug!("No Lutris cache directory found");
        return Resolution::Unavailable;
    };

    Resolution::Resolved {
        locations: LutrisLocations {
            database_dir,
            cache_dir,
        },
        config: ImportConfig {
            db_location,
            cache_location,
            include_steam: config.include_steam,
        },
    }
}

/// Return the first existing location as (config value, expanded path).
fn resolve_dir(
    configured: &str,
    fallbacks: &[String],
    dirs: &AppDirs,
) -> Option<(String, PathBuf)> {
    std::iter::once(configured)
        .chain(fallbacks.iter().map(String::as_str))
        .filter(|candidate| !candidate.is_empty())
        .find_map(|candidate| {
            let path = dirs.expand_home(candidate);
            if path.exists() {
                if candidate != configured {
                    log::info!("Found Lutris directory at {}", path.display());
                }
                Some((candidate.to_string(), path))
            } else {
                None
            }
        })
}

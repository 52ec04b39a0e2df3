//! Well-known base directories.

use std::path::PathBuf;

/// Directory name used under the data and cache bases.
const APP_DIR: &str = "cartridges";

/// The base directories the application and its import sources resolve
/// paths against.
///
/// `data_dir` and `cache_dir` are the XDG bases (`~/.local/share`,
/// `~/.cache`), not the application's own subdirectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub home: PathBuf,
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl AppDirs {
    /// Resolve the base directories for the current user.
    pub fn from_env() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let data_dir = dirs::data_dir().unwrap_or_else(|| home.join(".local").join("share"));
        let cache_dir = dirs::cache_dir().unwrap_or_else(|| home.join(".cache"));
        Self {
            home,
            data_dir,
            cache_dir,
        }
    }

    /// Replace the data and/or cache bases, keeping the rest.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, cache_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = cache_dir {
            self.cache_dir = dir;
        }
        self
    }

    /// Expand a leading `~` to the home directory.
    pub fn expand_home(&self, path: &str) -> PathBuf {
        if path == "~" {
            return self.home.clone();
        }
        match path.strip_prefix("~/") {
            Some(rest) => self.home.join(rest),
            None => PathBuf::from(path),
        }
    }

    /// Root of the local game catalog: `<data>/cartridges`.
    pub fn catalog_dir(&self) -> PathBuf {
        self.data_dir.join(APP_DIR)
    }

    /// Private scratch directory for one import source: `<cache>/cartridges/<source>`.
    pub fn scratch_dir(&self, source: &str) -> PathBuf {
        self.cache_dir.join(APP_DIR).join(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs() -> AppDirs {
        AppDirs {
            home: PathBuf::from("/home/user"),
            data_dir: PathBuf::from("/home/user/.local/share"),
            cache_dir: PathBuf::from("/home/user/.cache"),
        }
    }

    #[test]
    fn expands_tilde() {
        let d = dirs();
        assert_eq!(d.expand_home("~"), PathBuf::from("/home/user"));
        assert_eq!(
            d.expand_home("~/.var/app/net.lutris.Lutris/data/lutris/"),
            PathBuf::from("/home/user/.var/app/net.lutris.Lutris/data/lutris/")
        );
        assert_eq!(d.expand_home("/opt/lutris"), PathBuf::from("/opt/lutris"));
        assert_eq!(d.expand_home("~user/x"), PathBuf::from("~user/x"));
    }

    #[test]
    fn app_subdirectories() {
        let d = dirs();
        assert_eq!(d.catalog_dir(), PathBuf::from("/home/user/.local/share/cartridges"));
        assert_eq!(
            d.scratch_dir("lutris"),
            PathBuf::from("/home/user/.cache/cartridges/lutris")
        );
    }

    #[test]
    fn overrides_replace_bases() {
        let d = dirs().with_overrides(Some(PathBuf::from("/tmp/data")), None);
        assert_eq!(d.data_dir, PathBuf::from("/tmp/data"));
        assert_eq!(d.cache_dir, PathBuf::from("/home/user/.cache"));
    }
}

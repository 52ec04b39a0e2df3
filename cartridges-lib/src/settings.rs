//! Shared application settings.
//!
//! The settings file is always `~/.config/cartridges/settings.toml`. Values
//! live in a flat table keyed by the names in [`keys`]; anything missing
//! falls back to the built-in default, so a fresh install needs no file.

use std::path::{Path, PathBuf};

use crate::error::SettingsError;

/// Setting names understood by the frontends and import sources.
pub mod keys {
    /// Directory holding the Lutris `pga.db` database.
    pub const DB_LOCATION: &str = "external-db-location";
    /// Directory holding the Lutris cover-art cache (`coverart/`).
    pub const CACHE_LOCATION: &str = "external-cache-location";
    /// Whether games Lutris manages through its Steam runner are imported.
    pub const IMPORT_SECONDARY_RUNNER: &str = "import-secondary-runner";
    /// Library sort order (`a-z`, `z-a`, `newest`, `oldest`, `last_played`).
    pub const SORT_MODE: &str = "sort-mode";
}

/// Canonical path to the shared settings file: `~/.config/cartridges/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("cartridges").join("settings.toml")
}

/// The key/value contract import sources and frontends rely on.
///
/// Getters never fail: unset keys read as their default, and unknown keys
/// read as the empty string or `false`.
pub trait SettingsStore {
    fn get_string(&self, key: &str) -> String;
    fn set_string(&mut self, key: &str, value: &str);
    fn get_boolean(&self, key: &str) -> bool;
    fn set_boolean(&mut self, key: &str, value: bool);
}

fn default_value(key: &str) -> Option<toml::Value> {
    let value = match key {
        keys::DB_LOCATION => toml::Value::String("~/.local/share/lutris/".to_string()),
        keys::CACHE_LOCATION => toml::Value::String("~/.cache/lutris/".to_string()),
        keys::IMPORT_SECONDARY_RUNNER => toml::Value::Boolean(false),
        keys::SORT_MODE => toml::Value::String("a-z".to_string()),
        _ => return None,
    };
    Some(value)
}

/// TOML-backed settings.
///
/// Changes stay in memory until [`Settings::save`] is called. Settings
/// created with [`Settings::in_memory`] have no backing file and `save` is a
/// no-op for them.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    path: Option<PathBuf>,
    values: toml::Table,
    dirty: bool,
}

impl Settings {
    /// Load the shared settings file, or start from defaults if it is missing.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let values = match std::fs::read_to_string(path) {
            Ok(contents) => contents.parse::<toml::Table>().map_err(|e| SettingsError::Parse {
                path: path.display().to_string(),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
            Err(e) => return Err(SettingsError::io(path, e)),
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
            dirty: false,
        })
    }

    /// Settings with no backing file. Useful for testing.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether any value changed since the settings were loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the settings file if anything changed.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        let Some(path) = self.path.as_deref() else {
            self.dirty = false;
            return Ok(());
        };
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;
        }
        let serialized = toml::to_string_pretty(&self.values)?;

        // Write atomically
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized).map_err(|e| SettingsError::io(&tmp, e))?;
        std::fs::rename(&tmp, path).map_err(|e| SettingsError::io(path, e))?;

        log::debug!("Saved settings to {}", path.display());
        self.dirty = false;
        Ok(())
    }

    /// Pretty-printed effective settings (stored values over defaults) for display.
    pub fn to_display_string(&self) -> String {
        let mut merged = toml::Table::new();
        for key in [
            keys::DB_LOCATION,
            keys::CACHE_LOCATION,
            keys::IMPORT_SECONDARY_RUNNER,
            keys::SORT_MODE,
        ] {
            if let Some(value) = default_value(key) {
                merged.insert(key.to_string(), value);
            }
        }
        for (key, value) in &self.values {
            merged.insert(key.clone(), value.clone());
        }
        toml::to_string_pretty(&merged).unwrap_or_default()
    }

    fn lookup(&self, key: &str) -> Option<toml::Value> {
        self.values.get(key).cloned().or_else(|| default_value(key))
    }

    fn insert(&mut self, key: &str, value: toml::Value) {
        if self.values.get(key) != Some(&value) {
            self.values.insert(key.to_string(), value);
            self.dirty = true;
        }
    }
}

impl SettingsStore for Settings {
    fn get_string(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(toml::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.insert(key, toml::Value::String(value.to_string()));
    }

    fn get_boolean(&self, key: &str) -> bool {
        match self.lookup(key) {
            Some(toml::Value::Boolean(b)) => b,
            Some(toml::Value::String(s)) => matches!(s.as_str(), "true" | "1" | "yes"),
            _ => false,
        }
    }

    fn set_boolean(&mut self, key: &str, value: bool) {
        self.insert(key, toml::Value::Boolean(value));
    }
}

/// The Lutris import configuration, read once from a [`SettingsStore`].
///
/// Import code receives this by reference and hands back an updated copy
/// when it discovers a better location; the caller decides when to persist
/// it with [`ImportConfig::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Configured database directory, possibly starting with `~`.
    pub db_location: String,
    /// Configured cover-art cache directory, possibly starting with `~`.
    pub cache_location: String,
    /// Include games using the Steam runner.
    pub include_steam: bool,
}

impl ImportConfig {
    pub fn from_settings(settings: &impl SettingsStore) -> Self {
        Self {
            db_location: settings.get_string(keys::DB_LOCATION),
            cache_location: settings.get_string(keys::CACHE_LOCATION),
            include_steam: settings.get_boolean(keys::IMPORT_SECONDARY_RUNNER),
        }
    }

    /// Write the location values back. The Steam flag is user-owned and
    /// never written from here.
    pub fn store(&self, settings: &mut impl SettingsStore) {
        settings.set_string(keys::DB_LOCATION, &self.db_location);
        settings.set_string(keys::CACHE_LOCATION, &self.cache_location);
    }
}

//! Shared configuration for the cartridges frontends.
//!
//! Owns the key/value settings contract, the TOML-backed settings file, and
//! the well-known base directories (home, data, cache) every import source
//! resolves its paths against.

pub mod error;
pub mod paths;
pub mod settings;

pub use error::SettingsError;
pub use paths::AppDirs;
pub use settings::{ImportConfig, Settings, SettingsStore, keys, settings_path};

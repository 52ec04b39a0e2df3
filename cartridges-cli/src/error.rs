use thiserror::Error;

use cartridges_catalog::CatalogError;
use cartridges_import::ImportError;
use cartridges_lib::SettingsError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be read or written
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    /// Catalog could not be read or written
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Import cycle failed
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    /// Invalid setting name or value
    #[error("Config error: {0}")]
    Config(String),

    /// Logger could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}

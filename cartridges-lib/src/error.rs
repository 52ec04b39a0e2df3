use thiserror::Error;

/// Errors that can occur while loading or saving the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error while reading or writing the settings file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The settings file exists but is not valid TOML
    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    /// The in-memory settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl SettingsError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

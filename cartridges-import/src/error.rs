use std::path::Path;

use cartridges_catalog::CatalogError;
use thiserror::Error;

/// Errors that abort an import cycle.
///
/// A launcher that is simply not installed is not an error; see
/// [`crate::ImportOutcome::Unavailable`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to copy launcher database {path}: {source}")]
    Snapshot {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to read launcher database {path}: {source}")]
    Extraction {
        path: String,
        source: rusqlite::Error,
    },
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl ImportError {
    pub(crate) fn snapshot(path: &Path, source: std::io::Error) -> Self {
        Self::Snapshot {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn extraction(path: &Path, source: rusqlite::Error) -> Self {
        Self::Extraction {
            path: path.display().to_string(),
            source,
        }
    }

    /// Whether the external data could not be read (as opposed to a failure
    /// writing the local catalog).
    pub fn is_extraction_failure(&self) -> bool {
        matches!(self, Self::Snapshot { .. } | Self::Extraction { .. })
    }
}

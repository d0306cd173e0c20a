use std::path::PathBuf;

use thiserror::Error;

use crate::entry::EntryError;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The games directory does not exist.
    #[error("Games directory not found: {}", .0.display())]
    MissingGamesDir(PathBuf),

    /// A category directory has no table of contents file.
    #[error("Category {} has no table of contents ({})", .category, .path.display())]
    MissingToc { category: String, path: PathBuf },

    /// The table of contents does not start with a `# ` heading.
    #[error("Table of contents {} does not start with a '# ' heading", .0.display())]
    InvalidToc(PathBuf),

    /// An entry file could not be parsed.
    #[error("Invalid entry {}: {source}", .path.display())]
    Entry {
        path: PathBuf,
        #[source]
        source: EntryError,
    },

    /// Filesystem error.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

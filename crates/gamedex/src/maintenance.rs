//! Generated catalog artifacts and consistency checks.
//!
//! Regular maintenance regenerates the category TOCs, the README summary,
//! the statistics page and the JSON export. The template and lint checks
//! only report.

mod export;
mod lint;
mod readme;
mod statistics;
mod template;
mod toc;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::CatalogError;

pub use export::{ExportDocument, export_document, export_json};
pub use lint::{LintFinding, lint};
pub use readme::{render_readme, update_readme};
pub use statistics::{Frequency, Statistics, write_statistics};
pub use template::{TemplateLeftover, find_template_leftovers, template_check_lines};
pub use toc::{render_category_toc, update_category_tocs};

/// Opens a generated block.
pub const START_MARKER: &str = "[comment]: # (start of autogenerated content, do not edit)";

/// Closes a generated block.
pub const END_MARKER: &str = "[comment]: # (end of autogenerated content)";

/// Errors that can occur while regenerating catalog files.
#[derive(Debug, Error)]
pub enum MaintenanceError {
    /// The README lacks the heading or tail that delimit the generated block.
    #[error("README does not contain a block starting with {heading:?} and ending before {tail:?}")]
    ReadmeStructure { heading: String, tail: String },

    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for maintenance operations.
pub type Result<T> = std::result::Result<T, MaintenanceError>;

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| MaintenanceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| MaintenanceError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, text).map_err(|source| MaintenanceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Wrote file");
    Ok(())
}

/// Share of `count` in `total` as a percentage, 0 for an empty total.
fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

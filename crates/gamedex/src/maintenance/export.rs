use serde::Serialize;

use crate::catalog::Catalog;

use super::{Result, write_file};

/// Table data for the dynamic table on the project web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDocument {
    pub headings: Vec<String>,
    pub data: Vec<Vec<String>>,
}

/// One row per entry: name and first download link (empty if none).
pub fn export_document(catalog: &Catalog) -> ExportDocument {
    let data = catalog
        .entries()
        .map(|item| {
            vec![
                item.entry.title().to_string(),
                item.entry.download().unwrap_or_default().to_string(),
            ]
        })
        .collect();

    ExportDocument {
        headings: vec!["Name".to_string(), "Download".to_string()],
        data,
    }
}

/// Write the export document as JSON.
pub fn export_json(catalog: &Catalog) -> Result<ExportDocument> {
    let document = export_document(catalog);
    let path = catalog.layout().json_export_path();
    tracing::info!(path = %path.display(), rows = document.data.len(), "Exporting JSON");
    write_file(&path, &serde_json::to_string(&document)?)?;
    Ok(document)
}

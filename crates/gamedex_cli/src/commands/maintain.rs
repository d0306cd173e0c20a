use gamedex::maintenance;
use gamedex::{Catalog, CatalogLayout};

use crate::commands::shared::{load_catalog, report_done};

pub(crate) fn handle_readme(layout: CatalogLayout) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(layout)?;
    readme(&catalog)
}

pub(crate) fn handle_toc(layout: CatalogLayout) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(layout)?;
    tocs(&catalog)
}

pub(crate) fn handle_stats(layout: CatalogLayout) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(layout)?;
    statistics(&catalog)
}

pub(crate) fn handle_export(layout: CatalogLayout) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(layout)?;
    export(&catalog)
}

/// The regular maintenance run: every generated file, from one catalog load.
pub(crate) fn handle_maintain(layout: CatalogLayout) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(layout)?;
    readme(&catalog)?;
    tocs(&catalog)?;
    statistics(&catalog)?;
    export(&catalog)?;
    tracing::info!(entries = catalog.len(), "Maintenance complete");
    Ok(())
}

fn readme(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    maintenance::update_readme(catalog)?;
    report_done(&format!(
        "Updated {} ({} entries)",
        catalog.layout().readme.display(),
        catalog.len()
    ));
    Ok(())
}

fn tocs(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let written = maintenance::update_category_tocs(catalog)?;
    report_done(&format!("Updated {} category tables of contents", written));
    Ok(())
}

fn statistics(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let now = chrono::Local::now().naive_local();
    let stats = maintenance::write_statistics(catalog, now)?;
    report_done(&format!(
        "Wrote statistics for {} entries ({} mature, {} beta)",
        stats.total, stats.mature, stats.beta
    ));
    Ok(())
}

fn export(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let document = maintenance::export_json(catalog)?;
    report_done(&format!(
        "Exported {} entries to {}",
        document.data.len(),
        catalog.layout().json_export.display()
    ));
    Ok(())
}

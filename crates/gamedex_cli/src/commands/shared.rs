use clap::ValueEnum;
use console::Term;
use gamedex::{Catalog, CatalogLayout};

/// Output format for findings.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display as JSON
    Json,
}

/// Load the catalog, logging where it was read from.
pub(crate) fn load_catalog(layout: CatalogLayout) -> Result<Catalog, Box<dyn std::error::Error>> {
    tracing::debug!(root = %layout.root.display(), "Loading catalog");
    let catalog = Catalog::load(layout)?;
    tracing::info!(
        categories = catalog.categories().len(),
        entries = catalog.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

/// Print a one-line completion message on a TTY.
///
/// In non-TTY mode the library's structured logs already cover it.
pub(crate) fn report_done(message: &str) {
    if Term::stdout().is_term() {
        println!("{} {}", console::style("✓").green(), message);
    }
}

/// Print rows as a rounded table or pretty JSON.
pub(crate) fn print_rows<T>(
    rows: Vec<T>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>>
where
    T: tabled::Tabled + serde::Serialize,
{
    match format {
        OutputFormat::Table => {
            let mut table = tabled::Table::new(rows);
            table.with(tabled::settings::Style::rounded());
            println!("{}", table);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

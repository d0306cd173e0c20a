use crate::catalog::{Catalog, CatalogEntry};

use super::{END_MARKER, Result, START_MARKER, write_file};

/// Render a category TOC: the kept header line, then one line per entry
/// sorted by title.
pub fn render_category_toc<'a>(
    header: &str,
    entries: impl IntoIterator<Item = &'a CatalogEntry>,
) -> String {
    let mut listed: Vec<(&str, &str, String)> = entries
        .into_iter()
        .map(|e| (e.entry.title(), e.file_name.as_str(), e.entry.overview()))
        .collect();
    listed.sort_by(|a, b| a.0.cmp(b.0));

    let mut text = String::with_capacity(header.len() + listed.len() * 64);
    text.push_str(header);
    text.push('\n');
    text.push_str(START_MARKER);
    text.push('\n');
    for (title, file_name, overview) in listed {
        text.push_str(&format!("- **[{}]({})** ({})\n", title, file_name, overview));
    }
    text.push('\n');
    text.push_str(END_MARKER);
    text
}

/// Rewrite the TOC of every category. Returns the number of files written.
pub fn update_category_tocs(catalog: &Catalog) -> Result<usize> {
    for category in catalog.categories() {
        tracing::info!(category = %category.dir_name, "Generating table of contents");
        let text = render_category_toc(&category.toc_header, &category.entries);
        write_file(&category.toc_path, &text)?;
    }
    Ok(catalog.categories().len())
}

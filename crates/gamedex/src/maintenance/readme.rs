use regex::Regex;

use crate::catalog::{Catalog, CatalogLayout, Category};

use super::{END_MARKER, MaintenanceError, Result, START_MARKER, read_file, write_file};

/// Replace the generated category summary in the README text.
///
/// The block starts after the layout's `<heading>\n\n` and runs up to the
/// last line starting with its tail. Everything outside the block is kept.
pub fn render_readme(
    readme: &str,
    categories: &[Category],
    layout: &CatalogLayout,
) -> Result<String> {
    let heading = layout.readme_heading.as_str();
    let tail = layout.readme_tail.as_str();
    let games_dir = layout.games_dir.to_string_lossy().replace('\\', "/");
    let pattern = format!(
        r"(?s)({}\n\n)(.*)(\n{}.*)",
        regex::escape(heading),
        regex::escape(tail)
    );
    let structure_error = || MaintenanceError::ReadmeStructure {
        heading: heading.to_string(),
        tail: tail.to_string(),
    };
    let regex = Regex::new(&pattern).map_err(|_| structure_error())?;
    let caps = regex.captures(readme).ok_or_else(structure_error)?;

    let mut listed: Vec<&Category> = categories.iter().collect();
    listed.sort_by(|a, b| a.title.cmp(&b.title));

    let total: usize = categories.iter().map(|c| c.entries.len()).sum();

    let mut text = String::with_capacity(readme.len());
    text.push_str(&readme[..caps.get(1).map_or(0, |m| m.end())]);
    text.push_str(START_MARKER);
    text.push('\n');
    text.push_str(&format!("{} entries\n", total));
    for category in listed {
        text.push_str(&format!(
            "- **[{}]({}/{}/{})** ({})\n",
            category.title,
            games_dir,
            category.dir_name,
            layout.toc_file,
            category.entries.len()
        ));
    }
    text.push('\n');
    text.push_str(END_MARKER);
    text.push_str(&caps[3]);

    Ok(text)
}

/// Recount the entries and rewrite the README summary.
pub fn update_readme(catalog: &Catalog) -> Result<()> {
    let layout = catalog.layout();
    let path = layout.readme_path();
    tracing::info!(path = %path.display(), "Updating readme");

    let readme = read_file(&path)?;
    let text = render_readme(&readme, catalog.categories(), layout)?;
    write_file(&path, &text)
}

//! Loading the catalog from disk.
//!
//! The catalog lives under a root directory:
//!
//! ```text
//! <root>/README.md
//! <root>/docs/data.json
//! <root>/games/template.md
//! <root>/games/statistics.md
//! <root>/games/<category>/_toc.md
//! <root>/games/<category>/<entry>.md
//! ```
//!
//! Categories are the sub-directories of the games directory. Everything is
//! enumerated in file name order so generated output is stable.

mod errors;

use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::{Entry, parse_entry};

pub use errors::{CatalogError, Result};

/// Default name of the per-category table of contents.
pub const DEFAULT_TOC_FILE: &str = "_toc.md";

/// Where the pieces of a catalog live, relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    pub root: PathBuf,
    pub games_dir: PathBuf,
    pub readme: PathBuf,
    pub toc_file: String,
    pub template: PathBuf,
    pub statistics: PathBuf,
    pub json_export: PathBuf,
    /// First line of the README block that is regenerated.
    pub readme_heading: String,
    /// Start of the README line that ends the regenerated block.
    pub readme_tail: String,
}

impl CatalogLayout {
    /// Layout with the default file names under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            games_dir: PathBuf::from("games"),
            readme: PathBuf::from("README.md"),
            toc_file: DEFAULT_TOC_FILE.to_string(),
            template: PathBuf::from("games/template.md"),
            statistics: PathBuf::from("games/statistics.md"),
            json_export: PathBuf::from("docs/data.json"),
            readme_heading: "# Open Source Games".to_string(),
            readme_tail: "A collection".to_string(),
        }
    }

    pub fn games_path(&self) -> PathBuf {
        self.root.join(&self.games_dir)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join(&self.readme)
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join(&self.template)
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.root.join(&self.statistics)
    }

    pub fn json_export_path(&self) -> PathBuf {
        self.root.join(&self.json_export)
    }
}

/// An entry together with where it was found.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub entry: Entry,
    /// Title of the category (from its TOC heading).
    pub category: String,
    /// Directory name of the category.
    pub category_dir: String,
    /// File name including the `.md` extension.
    pub file_name: String,
    /// File name without the `.md` extension.
    pub stem: String,
    pub path: PathBuf,
    /// Full text of the entry file.
    pub text: String,
}

/// A category directory and its entries.
#[derive(Debug, Clone)]
pub struct Category {
    pub dir_name: String,
    pub title: String,
    /// First line of the TOC file, with a trailing newline.
    pub toc_header: String,
    pub toc_path: PathBuf,
    pub entries: Vec<CatalogEntry>,
}

/// The whole collection of entries.
#[derive(Debug, Clone)]
pub struct Catalog {
    layout: CatalogLayout,
    categories: Vec<Category>,
}

impl Catalog {
    /// Read every category and entry below the games directory.
    pub fn load(layout: CatalogLayout) -> Result<Self> {
        let games = layout.games_path();
        if !games.is_dir() {
            return Err(CatalogError::MissingGamesDir(games));
        }

        let mut categories = Vec::new();
        for dir in sorted_children(&games, |p| p.is_dir())? {
            categories.push(load_category(&dir, &layout.toc_file)?);
        }

        tracing::debug!(
            root = %layout.root.display(),
            categories = categories.len(),
            "Catalog loaded"
        );

        Ok(Self { layout, categories })
    }

    /// Build a catalog from already loaded parts.
    pub fn from_parts(layout: CatalogLayout, categories: Vec<Category>) -> Self {
        Self { layout, categories }
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All entries, category by category.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn load_category(dir: &Path, toc_file: &str) -> Result<Category> {
    let dir_name = file_name_of(dir);
    let toc_path = dir.join(toc_file);
    if !toc_path.is_file() {
        return Err(CatalogError::MissingToc {
            category: dir_name,
            path: toc_path,
        });
    }

    let toc_text = fs::read_to_string(&toc_path).map_err(|e| CatalogError::io(&toc_path, e))?;
    let first_line = toc_text.lines().next().unwrap_or_default().trim_end();
    let title = first_line
        .strip_prefix("# ")
        .ok_or_else(|| CatalogError::InvalidToc(toc_path.clone()))?
        .to_string();
    let toc_header = format!("{}\n", first_line);

    let mut entries = Vec::new();
    for path in sorted_children(dir, |p| p.is_file())? {
        let file_name = file_name_of(&path);
        if file_name == toc_file {
            continue;
        }

        let text = fs::read_to_string(&path).map_err(|e| CatalogError::io(&path, e))?;
        let entry = parse_entry(&text).map_err(|source| CatalogError::Entry {
            path: path.clone(),
            source,
        })?;
        let stem = file_name
            .strip_suffix(".md")
            .unwrap_or(&file_name)
            .to_string();

        entries.push(CatalogEntry {
            entry,
            category: title.clone(),
            category_dir: dir_name.clone(),
            file_name,
            stem,
            path,
            text,
        });
    }

    tracing::debug!(category = %title, entries = entries.len(), "Category loaded");

    Ok(Category {
        dir_name,
        title,
        toc_header,
        toc_path,
        entries,
    })
}

fn sorted_children(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let read = fs::read_dir(dir).map_err(|e| CatalogError::io(dir, e))?;

    let mut paths = Vec::new();
    for item in read {
        let path = item.map_err(|e| CatalogError::io(dir, e))?.path();
        if keep(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, text: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }

    #[test]
    fn default_layout_paths() {
        let layout = CatalogLayout::new("/catalog");
        assert_eq!(layout.games_path(), PathBuf::from("/catalog/games"));
        assert_eq!(layout.readme_path(), PathBuf::from("/catalog/README.md"));
        assert_eq!(
            layout.template_path(),
            PathBuf::from("/catalog/games/template.md")
        );
        assert_eq!(
            layout.json_export_path(),
            PathBuf::from("/catalog/docs/data.json")
        );
        assert_eq!(layout.toc_file, "_toc.md");
    }

    #[test]
    fn loads_categories_and_entries_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let games = dir.path().join("games");
        write(&games.join("template.md"), "# Game\n");
        write(&games.join("strategy/_toc.md"), "# Strategy\n\nold list\n");
        write(&games.join("strategy/zz.md"), "# Zz\n\n- Home: h\n- State: beta\n");
        write(&games.join("strategy/aa.md"), "# Aa\n\n- Home: h\n- State: beta\n");
        write(&games.join("arcade/_toc.md"), "# Arcade");

        let catalog = Catalog::load(CatalogLayout::new(dir.path())).unwrap();

        let dirs: Vec<_> = catalog.categories().iter().map(|c| c.dir_name.as_str()).collect();
        assert_eq!(dirs, vec!["arcade", "strategy"]);
        assert_eq!(catalog.categories()[0].toc_header, "# Arcade\n");
        assert_eq!(catalog.len(), 2);

        let stems: Vec<_> = catalog.entries().map(|e| e.stem.as_str()).collect();
        assert_eq!(stems, vec!["aa", "zz"]);
        let first = catalog.entries().next().unwrap();
        assert_eq!(first.category, "Strategy");
        assert_eq!(first.file_name, "aa.md");
    }

    #[test]
    fn missing_games_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(CatalogLayout::new(dir.path())).unwrap_err();
        assert!(matches!(err, CatalogError::MissingGamesDir(_)));
    }

    #[test]
    fn category_without_toc_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("games/puzzle/a.md"), "# A\n");

        let err = Catalog::load(CatalogLayout::new(dir.path())).unwrap_err();
        match err {
            CatalogError::MissingToc { category, .. } => assert_eq!(category, "puzzle"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unparsable_entry_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("games/puzzle/_toc.md"), "# Puzzle\n");
        write(&dir.path().join("games/puzzle/broken.md"), "no title here\n");

        let err = Catalog::load(CatalogLayout::new(dir.path())).unwrap_err();
        assert!(err.to_string().contains("broken.md"));
    }
}

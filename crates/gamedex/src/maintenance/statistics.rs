use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::catalog::Catalog;

use super::{Result, percent, write_file};

/// How often a language or license occurs among all mentions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frequency {
    pub name: String,
    pub count: usize,
    /// Percentage of all mentions.
    pub share: f64,
}

/// Aggregate figures over the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub mature: usize,
    pub beta: usize,
    /// `(file stem, year)`, most recently abandoned first.
    pub inactive: Vec<(String, i32)>,
    pub without_state: Vec<String>,
    pub without_language: Vec<String>,
    pub languages: Vec<Frequency>,
    pub without_license: Vec<String>,
    pub licenses: Vec<Frequency>,
}

impl Statistics {
    pub fn collect(catalog: &Catalog) -> Self {
        let mut stats = Statistics {
            total: catalog.len(),
            ..Statistics::default()
        };
        let mut languages: Vec<&str> = Vec::new();
        let mut licenses: Vec<&str> = Vec::new();

        for item in catalog.entries() {
            let entry = &item.entry;

            if entry.is_mature() {
                stats.mature += 1;
            }
            if entry.is_beta() {
                stats.beta += 1;
            }
            if let Some(year) = entry.inactive_since() {
                stats.inactive.push((item.stem.clone(), year));
            }
            if !entry.has("state") {
                stats.without_state.push(item.stem.clone());
            }

            match entry.languages() {
                Some(values) => languages.extend(values.iter().map(String::as_str)),
                None => stats.without_language.push(item.stem.clone()),
            }
            match entry.licenses() {
                Some(values) => licenses.extend(values.iter().map(String::as_str)),
                None => stats.without_license.push(item.stem.clone()),
            }
        }

        stats
            .inactive
            .sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats.without_state.sort();
        stats.without_language.sort();
        stats.without_license.sort();
        stats.languages = frequencies(&languages);
        stats.licenses = frequencies(&licenses);

        stats
    }

    /// Render the statistics page, stamped with `now`.
    pub fn render(&self, now: NaiveDateTime) -> String {
        let rel = |count: usize| percent(count, self.total);
        let mut out = String::new();

        out.push_str("[comment]: # (autogenerated content, do not edit)\n# Statistics\n\n");
        let _ = write!(
            out,
            "analyzed {} entries on {}\n\n",
            self.total,
            now.format("%Y-%m-%d %H:%M:%S")
        );

        out.push_str("## State\n\n");
        let _ = write!(
            out,
            "- mature: {} ({:.1}%)\n- beta: {} ({:.1}%)\n- inactive: {} ({:.1}%)\n\n",
            self.mature,
            rel(self.mature),
            self.beta,
            rel(self.beta),
            self.inactive.len(),
            rel(self.inactive.len())
        );

        if !self.inactive.is_empty() {
            let listed: Vec<String> = self
                .inactive
                .iter()
                .map(|(name, year)| format!("{} ({})", name, year))
                .collect();
            let _ = write!(out, "##### Inactive State\n\n{}\n\n", listed.join(", "));
        }

        if !self.without_state.is_empty() {
            let _ = write!(
                out,
                "##### Without state tag ({})\n\n{}\n\n",
                self.without_state.len(),
                self.without_state.join(", ")
            );
        }

        out.push_str("## Languages\n\n");
        render_untagged(&mut out, "language", &self.without_language, self.total);
        render_frequencies(&mut out, "Language frequency", &self.languages);

        out.push_str("## Code licenses\n\n");
        render_untagged(&mut out, "license", &self.without_license, self.total);
        render_frequencies(&mut out, "Licenses frequency", &self.licenses);

        out
    }
}

/// Collect and write the statistics page.
pub fn write_statistics(catalog: &Catalog, now: NaiveDateTime) -> Result<Statistics> {
    let stats = Statistics::collect(catalog);
    let path = catalog.layout().statistics_path();
    tracing::info!(path = %path.display(), entries = stats.total, "Generating statistics");
    write_file(&path, &stats.render(now))?;
    Ok(stats)
}

fn render_untagged(out: &mut String, tag: &str, names: &[String], total: usize) {
    if names.is_empty() {
        return;
    }
    let _ = write!(
        out,
        "Without {} tag: {} ({:.1}%)\n\n{}\n\n",
        tag,
        names.len(),
        percent(names.len(), total),
        names.join(", ")
    );
}

fn render_frequencies(out: &mut String, heading: &str, items: &[Frequency]) {
    let _ = write!(out, "##### {}\n\n", heading);
    for item in items {
        let _ = writeln!(out, "- {} ({:.1}%)", item.name, item.share);
    }
    out.push('\n');
}

/// Count occurrences, most frequent first, ties by name.
fn frequencies(values: &[&str]) -> Vec<Frequency> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(*value).or_insert(0) += 1;
    }

    let mut items: Vec<Frequency> = counts
        .into_iter()
        .map(|(name, count)| Frequency {
            name: name.to_string(),
            count,
            share: percent(count, values.len()),
        })
        .collect();
    items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    items
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use crate::catalog::{CatalogEntry, CatalogLayout, Category};
    use crate::entry::parse_entry;

    use super::*;

    fn catalog(entries: &[(&str, &str)]) -> Catalog {
        let entries = entries
            .iter()
            .map(|(stem, text)| CatalogEntry {
                entry: parse_entry(text).unwrap(),
                category: "Misc".to_string(),
                category_dir: "misc".to_string(),
                file_name: format!("{}.md", stem),
                stem: stem.to_string(),
                path: PathBuf::from(format!("{}.md", stem)),
                text: text.to_string(),
            })
            .collect();

        Catalog::from_parts(
            CatalogLayout::new("/catalog"),
            vec![Category {
                dir_name: "misc".to_string(),
                title: "Misc".to_string(),
                toc_header: "# Misc\n".to_string(),
                toc_path: PathBuf::from("/catalog/games/misc/_toc.md"),
                entries,
            }],
        )
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap()
    }

    fn sample() -> Catalog {
        catalog(&[
            (
                "alpha",
                "# Alpha\n\n- Home: h\n- State: mature, inactive since 2010\n- Code language: C++\n- Code license: GPL-2.0\n",
            ),
            (
                "beta",
                "# Beta\n\n- Home: h\n- State: beta\n- Code language: C++, Lua\n- Code license: MIT\n",
            ),
            (
                "gamma",
                "# Gamma\n\n- Home: h\n- State: beta, inactive since 2015\n- Code license: GPL-2.0\n",
            ),
        ])
    }

    #[test]
    fn collects_counts() {
        let stats = Statistics::collect(&sample());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.mature, 1);
        assert_eq!(stats.beta, 2);
        assert_eq!(
            stats.inactive,
            vec![("gamma".to_string(), 2015), ("alpha".to_string(), 2010)]
        );
        assert!(stats.without_state.is_empty());
        assert_eq!(stats.without_language, vec!["gamma".to_string()]);
        assert!(stats.without_license.is_empty());
    }

    #[test]
    fn frequencies_sorted_by_count_then_name() {
        let stats = Statistics::collect(&sample());

        let names: Vec<_> = stats.languages.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["C++", "Lua"]);
        assert_eq!(stats.languages[0].count, 2);

        let names: Vec<_> = stats.licenses.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["GPL-2.0", "MIT"]);
    }

    #[test]
    fn renders_page() {
        let page = Statistics::collect(&sample()).render(now());

        let expected = "[comment]: # (autogenerated content, do not edit)
# Statistics

analyzed 3 entries on 2024-03-01 12:30:05

## State

- mature: 1 (33.3%)
- beta: 2 (66.7%)
- inactive: 2 (66.7%)

##### Inactive State

gamma (2015), alpha (2010)

## Languages

Without language tag: 1 (33.3%)

gamma

##### Language frequency

- C++ (66.7%)
- Lua (33.3%)

## Code licenses

##### Licenses frequency

- GPL-2.0 (66.7%)
- MIT (33.3%)

";
        assert_eq!(page, expected);
    }

    #[test]
    fn entries_without_state_are_listed() {
        let stats = Statistics::collect(&catalog(&[
            ("zed", "# Zed\n\n- Home: h\n"),
            ("amy", "# Amy\n\n- Home: h\n"),
        ]));
        let page = stats.render(now());

        assert!(page.contains("##### Without state tag (2)\n\namy, zed\n\n"));
        assert!(page.contains("Without license tag: 2 (100.0%)"));
    }

    #[test]
    fn empty_catalog_renders_zero_percentages() {
        let page = Statistics::collect(&catalog(&[])).render(now());
        assert!(page.contains("analyzed 0 entries"));
        assert!(page.contains("- mature: 0 (0.0%)"));
    }
}

use serde::Serialize;

use crate::catalog::Catalog;
use crate::entry::EntryIssue;

/// An issue found in one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintFinding {
    /// Directory name of the category, as on disk.
    pub category_dir: String,
    pub file: String,
    pub title: String,
    pub issue: EntryIssue,
}

/// Collect the issues of every entry in catalog order.
pub fn lint(catalog: &Catalog) -> Vec<LintFinding> {
    let findings: Vec<LintFinding> = catalog
        .entries()
        .flat_map(|item| {
            item.entry.issues().iter().map(move |issue| LintFinding {
                category_dir: item.category_dir.clone(),
                file: item.file_name.clone(),
                title: item.entry.title().to_string(),
                issue: issue.clone(),
            })
        })
        .collect();

    for finding in &findings {
        tracing::warn!(
            category = %finding.category_dir,
            file = %finding.file,
            title = %finding.title,
            issue = %finding.issue,
            "Entry issue"
        );
    }

    findings
}

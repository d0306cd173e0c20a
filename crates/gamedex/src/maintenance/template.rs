use serde::Serialize;

use crate::catalog::Catalog;

use super::{Result, read_file};

/// A line of the entry template that was left in an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateLeftover {
    pub file: String,
    pub line: String,
}

/// Template lines worth looking for: non-empty and not a `##` heading.
pub fn template_check_lines(template: &str) -> Vec<&str> {
    template
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty() && !line.starts_with("##"))
        .collect()
}

/// Report every template line that still appears verbatim in an entry.
pub fn find_template_leftovers(catalog: &Catalog) -> Result<Vec<TemplateLeftover>> {
    let template = read_file(&catalog.layout().template_path())?;
    let lines = template_check_lines(&template);

    let mut found = Vec::new();
    for item in catalog.entries() {
        for line in &lines {
            if item.text.contains(line) {
                tracing::warn!(file = %item.file_name, line = %line, "Template leftover");
                found.push(TemplateLeftover {
                    file: item.file_name.clone(),
                    line: line.to_string(),
                });
            }
        }
    }

    Ok(found)
}

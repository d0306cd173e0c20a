use gamedex::CatalogLayout;
use gamedex::maintenance::{self, LintFinding, TemplateLeftover};

use crate::commands::shared::{OutputFormat, load_catalog, print_rows, report_done};

/// Entry issue for display.
#[derive(Debug, Clone, serde::Serialize, tabled::Tabled)]
pub(crate) struct FindingDisplay {
    #[tabled(rename = "Category")]
    pub category_dir: String,
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Issue")]
    pub issue: String,
}

impl From<LintFinding> for FindingDisplay {
    fn from(finding: LintFinding) -> Self {
        Self {
            category_dir: finding.category_dir,
            file: finding.file,
            title: finding.title,
            issue: finding.issue.to_string(),
        }
    }
}

/// Template leftover for display.
#[derive(Debug, Clone, serde::Serialize, tabled::Tabled)]
pub(crate) struct LeftoverDisplay {
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "Line")]
    pub line: String,
}

impl From<TemplateLeftover> for LeftoverDisplay {
    fn from(leftover: TemplateLeftover) -> Self {
        Self {
            file: leftover.file,
            line: leftover.line,
        }
    }
}

/// Print every entry issue; fails when there is at least one.
pub(crate) fn handle_lint(
    layout: CatalogLayout,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(layout)?;
    let findings = maintenance::lint(&catalog);

    if findings.is_empty() {
        report_done(&format!("{} entries, no issues", catalog.len()));
        if let OutputFormat::Json = output {
            print_rows(Vec::<FindingDisplay>::new(), output)?;
        }
        return Ok(());
    }

    let count = findings.len();
    print_rows(findings.into_iter().map(FindingDisplay::from).collect(), output)?;
    Err(format!("{} issue(s) found in {} entries", count, catalog.len()).into())
}

/// Print the template lines still present in entries.
pub(crate) fn handle_template(
    layout: CatalogLayout,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(layout)?;
    let leftovers = maintenance::find_template_leftovers(&catalog)?;

    if leftovers.is_empty() {
        report_done("No template leftovers");
        if let OutputFormat::Json = output {
            print_rows(Vec::<LeftoverDisplay>::new(), output)?;
        }
        return Ok(());
    }

    print_rows(leftovers.into_iter().map(LeftoverDisplay::from).collect(), output)
}

//! End-to-end maintenance run over a small catalog on disk.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use gamedex::maintenance::{
    self, END_MARKER, START_MARKER, Statistics, TemplateLeftover,
};
use gamedex::{Catalog, CatalogLayout, EntryIssue};
use tempfile::TempDir;

const README: &str = "# Open Source Games

Some intro that is replaced.

A collection of information about open source games.
";

const TEMPLATE: &str = "# {Name}

_{One line description}_

- Home: {URL}
- State: {beta, mature}

## Building

- Build system: {Name}
";

const LINCITY: &str = "# LinCity-NG

_City simulation game._

- Home: https://github.com/lincity-ng/lincity-ng
- State: mature
- Keywords: simulation, city building
- Code repository: https://github.com/lincity-ng/lincity-ng.git
- Code language: C++
- Code license: GPL-2.0
- Download: https://github.com/lincity-ng/lincity-ng/releases

## Building

- Build system: CMake
";

const SLAM_SOCCER: &str = "# Slam Soccer 2006

_Arcade football game._

- Home: http://slamsoccer.sourceforge.net/
- State: beta, inactive since 2008
- Code language: C++
- Code license: GPL-2.0

## Building

- Build system: {Name}
";

const NO_STATE: &str = "# Kick Off Remake

- Home: http://kickoff.example/
";

fn write(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn setup_catalog() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();

    write(&root.join("README.md"), README);
    write(&root.join("games/template.md"), TEMPLATE);
    write(&root.join("games/simulation/_toc.md"), "# Simulation\n\nstale\n");
    write(&root.join("games/simulation/lincity-ng.md"), LINCITY);
    write(&root.join("games/sports/_toc.md"), "# Sports\n");
    write(&root.join("games/sports/slam_soccer_2006.md"), SLAM_SOCCER);
    write(&root.join("games/sports/kick_off_remake.md"), NO_STATE);

    dir
}

fn load(dir: &TempDir) -> Catalog {
    Catalog::load(CatalogLayout::new(dir.path())).expect("catalog should load")
}

#[test]
fn category_tocs_are_regenerated() {
    let dir = setup_catalog();
    let catalog = load(&dir);

    let written = maintenance::update_category_tocs(&catalog).unwrap();
    assert_eq!(written, 2);

    let toc = fs::read_to_string(dir.path().join("games/sports/_toc.md")).unwrap();
    assert_eq!(
        toc,
        format!(
            "# Sports\n\n{}\n\
             - **[Kick Off Remake](kick_off_remake.md)** ()\n\
             - **[Slam Soccer 2006](slam_soccer_2006.md)** (C++, GPL-2.0, beta, inactive since 2008)\n\
             \n{}",
            START_MARKER, END_MARKER
        )
    );

    // Regenerated TOCs still load with their title.
    let reloaded = load(&dir);
    assert_eq!(reloaded.categories()[1].title, "Sports");
}

#[test]
fn readme_summary_counts_entries() {
    let dir = setup_catalog();
    let catalog = load(&dir);

    maintenance::update_readme(&catalog).unwrap();

    let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.starts_with("# Open Source Games\n\n"));
    assert!(readme.contains("3 entries\n"));
    assert!(readme.contains("- **[Simulation](games/simulation/_toc.md)** (1)\n"));
    assert!(readme.contains("- **[Sports](games/sports/_toc.md)** (2)\n"));
    assert!(!readme.contains("Some intro"));
    assert!(readme.ends_with("A collection of information about open source games.\n"));
}

#[test]
fn statistics_page_is_written() {
    let dir = setup_catalog();
    let catalog = load(&dir);
    let now = NaiveDate::from_ymd_opt(2025, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();

    let stats: Statistics = maintenance::write_statistics(&catalog, now).unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.without_state, vec!["kick_off_remake".to_string()]);

    let page = fs::read_to_string(dir.path().join("games/statistics.md")).unwrap();
    assert!(page.contains("analyzed 3 entries on 2025-01-02 03:04:05"));
    assert!(page.contains("##### Inactive State\n\nslam_soccer_2006 (2008)\n\n"));
    assert!(page.contains("- C++ (100.0%)"));
}

#[test]
fn json_export_is_written() {
    let dir = setup_catalog();
    let catalog = load(&dir);

    maintenance::export_json(&catalog).unwrap();

    let json = fs::read_to_string(dir.path().join("docs/data.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["headings"], serde_json::json!(["Name", "Download"]));
    assert_eq!(
        value["data"][0],
        serde_json::json!(["LinCity-NG", "https://github.com/lincity-ng/lincity-ng/releases"])
    );
    assert_eq!(value["data"].as_array().unwrap().len(), 3);
}

#[test]
fn template_leftovers_are_found() {
    let dir = setup_catalog();
    let catalog = load(&dir);

    let leftovers = maintenance::find_template_leftovers(&catalog).unwrap();

    assert_eq!(
        leftovers,
        vec![TemplateLeftover {
            file: "slam_soccer_2006.md".to_string(),
            line: "- Build system: {Name}".to_string(),
        }]
    );
}

#[test]
fn lint_reports_missing_state() {
    let dir = setup_catalog();
    let catalog = load(&dir);

    let findings = maintenance::lint(&catalog);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].file, "kick_off_remake.md");
    assert_eq!(
        findings[0].issue,
        EntryIssue::MissingField("state".to_string())
    );
}
